use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ir::Marriage;
use crate::layout::NodeMap;

/// Canonical key for an unordered couple: the lexicographically smaller id
/// first, pipe-joined.
pub fn couple_key(a: &str, b: &str) -> String {
    if a < b {
        format!("{a}|{b}")
    } else {
        format!("{b}|{a}")
    }
}

/// User-facing collapse state, passed explicitly into every layout pass so
/// the engine stays a pure function of its inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    /// Couple keys whose descendants are hidden.
    pub collapsed_couples: BTreeSet<String>,
    /// Single parents whose descendants are hidden.
    pub collapsed_singles: BTreeSet<String>,
    /// Couple keys drawn as just their anchor card. Hides nothing; the
    /// partner keeps its records but is not positioned.
    pub anchored_couples: BTreeSet<String>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_couple_collapsed(&self, a: &str, b: &str) -> bool {
        self.collapsed_couples.contains(&couple_key(a, b))
    }

    /// Flips collapse state for one person. Someone with no partner toggles
    /// their single-parent entry; otherwise all of their couple pairings flip
    /// together: cleared when every pairing is collapsed, set otherwise.
    /// Partner lookup uses the full (unfiltered) graph so the toggle behaves
    /// the same regardless of what is currently hidden.
    pub fn toggle_person(&mut self, id: &str, nodes: &NodeMap) {
        let partners: &[String] = nodes.get(id).map(|n| n.partners.as_slice()).unwrap_or(&[]);
        if partners.is_empty() {
            if !self.collapsed_singles.remove(id) {
                self.collapsed_singles.insert(id.to_string());
            }
            return;
        }
        let all_collapsed = partners
            .iter()
            .all(|mate| self.collapsed_couples.contains(&couple_key(id, mate)));
        for mate in partners {
            let key = couple_key(id, mate);
            if all_collapsed {
                self.collapsed_couples.remove(&key);
            } else {
                self.collapsed_couples.insert(key);
            }
        }
    }

    /// Replaces the collapse state with every couple and childbearing single
    /// of the given recorded generation.
    pub fn collapse_generation(&mut self, nodes: &NodeMap, marriages: &[Marriage], generation: i64) {
        let (couples, singles) = generation_collapse_sets(nodes, marriages, generation);
        self.collapsed_couples = couples;
        self.collapsed_singles = singles;
    }

    /// True when every couple and single of the generation is collapsed.
    pub fn is_generation_collapsed(
        &self,
        nodes: &NodeMap,
        marriages: &[Marriage],
        generation: i64,
    ) -> bool {
        let (couples, singles) = generation_collapse_sets(nodes, marriages, generation);
        couples.is_subset(&self.collapsed_couples) && singles.is_subset(&self.collapsed_singles)
    }

    pub fn expand_all(&mut self) {
        self.collapsed_couples.clear();
        self.collapsed_singles.clear();
    }
}

/// Collapse candidates of one recorded generation: couple keys for marriages
/// whose partners both sit in it, and ids of members with children but no
/// partner. Recorded generations, not normalized ones, match what the data
/// entry sees.
pub fn generation_collapse_sets(
    nodes: &NodeMap,
    marriages: &[Marriage],
    generation: i64,
) -> (BTreeSet<String>, BTreeSet<String>) {
    let in_generation = |id: &str| {
        nodes
            .get(id)
            .is_some_and(|n| n.person.generation.unwrap_or(0) == generation)
    };

    let mut couples: BTreeSet<String> = BTreeSet::new();
    for m in marriages {
        if in_generation(&m.partner_a) && in_generation(&m.partner_b) {
            couples.insert(couple_key(&m.partner_a, &m.partner_b));
        }
    }

    let mut singles: BTreeSet<String> = BTreeSet::new();
    for node in nodes.values() {
        if node.person.generation.unwrap_or(0) != generation {
            continue;
        }
        if node.partners.is_empty() && !node.children.is_empty() {
            singles.insert(node.id().to_string());
        }
    }

    (couples, singles)
}
