use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Gender {
    M,
    F,
}

impl Gender {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "M" | "m" | "Male" | "male" => Some(Self::M),
            "F" | "f" | "Female" | "female" => Some(Self::F),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LifeStatus {
    Living,
    Deceased,
}

impl LifeStatus {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "Living" | "living" => Some(Self::Living),
            "Deceased" | "deceased" => Some(Self::Deceased),
            _ => None,
        }
    }
}

/// One row of the people table. Every field except `id` is optional in the
/// source data; unknown gender/status tokens deserialize to `None` instead of
/// failing the whole dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub preferred_name: Option<String>,
    #[serde(default, deserialize_with = "gender_opt")]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub generation: Option<i64>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub birth_place: Option<String>,
    #[serde(default)]
    pub death_date: Option<String>,
    #[serde(default)]
    pub death_place: Option<String>,
    #[serde(default, deserialize_with = "status_opt")]
    pub status: Option<LifeStatus>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
}

impl Person {
    /// Name shown on a card and matched by search: preferred name if set,
    /// else first name, followed by the last name.
    pub fn display_name(&self) -> String {
        let given = self
            .preferred_name
            .as_deref()
            .or(self.first_name.as_deref())
            .unwrap_or("");
        let last = self.last_name.as_deref().unwrap_or("");
        format!("{given} {last}")
    }

    /// "last first" lowercased, the tie-break key for sibling ordering.
    pub fn sort_name(&self) -> String {
        let last = self.last_name.as_deref().unwrap_or("");
        let first = self.first_name.as_deref().unwrap_or("");
        format!("{last} {first}").to_lowercase()
    }
}

fn gender_opt<'de, D>(de: D) -> Result<Option<Gender>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(de)?;
    Ok(raw.as_deref().and_then(Gender::from_token))
}

fn status_opt<'de, D>(de: D) -> Result<Option<LifeStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(de)?;
    Ok(raw.as_deref().and_then(LifeStatus::from_token))
}

/// An unordered spouse pair. Nothing forbids a person appearing in several
/// marriages, or in both slots of one record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marriage {
    pub id: String,
    pub partner_a: String,
    pub partner_b: String,
}

/// A directed parent -> child edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParentChild {
    pub id: String,
    pub parent_id: String,
    pub child_id: String,
}

/// The record snapshot a layout pass operates on. Owned by the persistence
/// layer; the engine never mutates it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub marriages: Vec<Marriage>,
    #[serde(default)]
    pub parent_child: Vec<ParentChild>,
}

impl Dataset {
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
}
