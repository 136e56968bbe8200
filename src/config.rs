use serde::{Deserialize, Serialize};
use std::path::Path;

/// Geometry constants for one layout pass. All distances are in drawing
/// units (SVG pixels downstream).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Vertical distance between generation rows.
    pub level_gap: f32,
    /// Horizontal gap between the two cards of a couple.
    pub partner_gap: f32,
    pub card_width: f32,
    pub card_height: f32,
    /// Horizontal margin between adjacent blocks in a row.
    pub block_margin: f32,
    /// How far generation guide lines extend past the outermost cards.
    pub guide_margin: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            level_gap: 220.0,
            partner_gap: 150.0,
            card_width: 140.0,
            card_height: 150.0,
            block_margin: 40.0,
            guide_margin: 200.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub layout: LayoutConfig,
}

/// Loads a config file, JSON or JSON5. No path means defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    let config = match serde_json::from_str(&contents) {
        Ok(config) => config,
        Err(_) => json5::from_str(&contents)?,
    };
    Ok(config)
}
