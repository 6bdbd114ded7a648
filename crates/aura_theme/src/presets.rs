//! Built-in palette presets.

use aura_animation::{Palette, Rgb};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Built-in palette catalog.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreset {
    /// Deep navy with a coral accent; the app's resting theme.
    #[default]
    Midnight,
    /// Midnight base with the violet used when artwork has no dominant color.
    Violet,
}

impl ThemePreset {
    /// Stable preset id for config/serialization.
    pub fn id(self) -> &'static str {
        match self {
            Self::Midnight => "midnight",
            Self::Violet => "violet",
        }
    }

    /// User-facing display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Midnight => "Midnight",
            Self::Violet => "Violet",
        }
    }

    /// Full preset list.
    pub fn all() -> &'static [ThemePreset] {
        const PRESETS: [ThemePreset; 2] = [ThemePreset::Midnight, ThemePreset::Violet];
        &PRESETS
    }

    pub fn from_id(id: &str) -> Option<ThemePreset> {
        Self::all().iter().copied().find(|p| p.id() == id)
    }

    pub fn palette(self) -> Palette {
        match self {
            Self::Midnight => Palette::new(
                Rgb::new(0x1a, 0x1a, 0x2e),
                Rgb::new(0x16, 0x21, 0x3e),
                Rgb::new(0xe9, 0x45, 0x60),
            ),
            Self::Violet => Palette::new(
                Rgb::new(0x1a, 0x1a, 0x2e),
                Rgb::new(0x16, 0x21, 0x3e),
                Rgb::new(0xbc, 0x77, 0xff),
            ),
        }
    }
}

impl Display for ThemePreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
