//! Theme configuration

use crate::error::Result;
use crate::presets::ThemePreset;
use aura_animation::Palette;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Resting palette preset
    #[serde(default)]
    pub preset: ThemePreset,
    /// Custom resting palette, takes precedence over `preset`
    #[serde(default)]
    pub palette: Option<Palette>,
    /// Palette transition length; falls back to the motion config
    #[serde(default)]
    pub transition_ms: Option<u32>,
}

impl ThemeConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Palette the engine starts with and resets to
    pub fn resting_palette(&self) -> Palette {
        self.palette.unwrap_or_else(|| self.preset.palette())
    }
}
