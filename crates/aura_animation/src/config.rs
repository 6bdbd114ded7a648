//! Motion configuration
//!
//! Every field has a default, so a partial TOML document (or none at all)
//! yields a usable configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors loading a [`MotionConfig`]
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionConfig {
    /// Spring simulation rate in samples per second
    #[serde(default = "default_sample_rate")]
    pub sample_rate: f64,
    #[serde(default)]
    pub durations: Durations,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            durations: Durations::default(),
        }
    }
}

impl MotionConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: MotionConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), "loaded motion config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "sample_rate must be positive, got {}",
                self.sample_rate
            )));
        }
        if let Some((name, _)) = self.durations.entries().into_iter().find(|(_, ms)| *ms == 0) {
            return Err(ConfigError::Invalid(format!(
                "durations.{name} must be positive"
            )));
        }
        Ok(())
    }
}

/// Transition durations in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Durations {
    /// Nominal player expand duration (the played duration is derived from the springs)
    #[serde(default = "default_player_expand")]
    pub player_expand: u32,
    #[serde(default = "default_player_collapse")]
    pub player_collapse: u32,
    #[serde(default = "default_ripple")]
    pub ripple: u32,
    /// Default palette transition
    #[serde(default = "default_color_transition")]
    pub color_transition: u32,
    /// One skeleton shimmer sweep
    #[serde(default = "default_skeleton_pulse")]
    pub skeleton_pulse: u32,
    #[serde(default = "default_toast_enter")]
    pub toast_enter: u32,
    #[serde(default = "default_toast_exit")]
    pub toast_exit: u32,
    #[serde(default = "default_modal_open")]
    pub modal_open: u32,
    #[serde(default = "default_modal_close")]
    pub modal_close: u32,
    #[serde(default = "default_track_fade_in")]
    pub track_fade_in: u32,
    /// Delay added per list position
    #[serde(default = "default_track_stagger")]
    pub track_stagger: u32,
    #[serde(default = "default_snap_back")]
    pub snap_back: u32,
    /// One full artwork revolution
    #[serde(default = "default_rotation_period")]
    pub rotation_period: u32,
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            player_expand: default_player_expand(),
            player_collapse: default_player_collapse(),
            ripple: default_ripple(),
            color_transition: default_color_transition(),
            skeleton_pulse: default_skeleton_pulse(),
            toast_enter: default_toast_enter(),
            toast_exit: default_toast_exit(),
            modal_open: default_modal_open(),
            modal_close: default_modal_close(),
            track_fade_in: default_track_fade_in(),
            track_stagger: default_track_stagger(),
            snap_back: default_snap_back(),
            rotation_period: default_rotation_period(),
        }
    }
}

impl Durations {
    fn entries(&self) -> [(&'static str, u32); 12] {
        // track_stagger may be zero (no stagger)
        [
            ("player_expand", self.player_expand),
            ("player_collapse", self.player_collapse),
            ("ripple", self.ripple),
            ("color_transition", self.color_transition),
            ("skeleton_pulse", self.skeleton_pulse),
            ("toast_enter", self.toast_enter),
            ("toast_exit", self.toast_exit),
            ("modal_open", self.modal_open),
            ("modal_close", self.modal_close),
            ("track_fade_in", self.track_fade_in),
            ("snap_back", self.snap_back),
            ("rotation_period", self.rotation_period),
        ]
    }
}

fn default_sample_rate() -> f64 {
    crate::spring::DEFAULT_SAMPLE_RATE
}

fn default_player_expand() -> u32 {
    520
}

fn default_player_collapse() -> u32 {
    420
}

fn default_ripple() -> u32 {
    550
}

fn default_color_transition() -> u32 {
    900
}

fn default_skeleton_pulse() -> u32 {
    1400
}

fn default_toast_enter() -> u32 {
    320
}

fn default_toast_exit() -> u32 {
    260
}

fn default_modal_open() -> u32 {
    380
}

fn default_modal_close() -> u32 {
    300
}

fn default_track_fade_in() -> u32 {
    360
}

fn default_track_stagger() -> u32 {
    40
}

fn default_snap_back() -> u32 {
    340
}

fn default_rotation_period() -> u32 {
    24_000
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = MotionConfig::default();
        assert_eq!(config.sample_rate, 60.0);
        assert_eq!(config.durations.player_expand, 520);
        assert_eq!(config.durations.color_transition, 900);
        assert_eq!(config.durations.rotation_period, 24_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = MotionConfig::from_toml_str(
            r#"
            sample_rate = 120.0

            [durations]
            ripple = 600
            "#,
        )
        .unwrap();

        assert_eq!(config.sample_rate, 120.0);
        assert_eq!(config.durations.ripple, 600);
        assert_eq!(config.durations.toast_exit, 260);
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(MotionConfig::from_toml_str("").unwrap(), MotionConfig::default());
    }

    #[test]
    fn test_rejects_zero_sample_rate() {
        let err = MotionConfig::from_toml_str("sample_rate = 0.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_zero_duration() {
        let err = MotionConfig::from_toml_str("[durations]\nmodal_open = 0").unwrap_err();
        assert!(err.to_string().contains("durations.modal_open"));
    }

    #[test]
    fn test_zero_stagger_is_allowed() {
        let config = MotionConfig::from_toml_str("[durations]\ntrack_stagger = 0").unwrap();
        assert_eq!(config.durations.track_stagger, 0);
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = MotionConfig::from_toml_str("sample_rate = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = MotionConfig::from_file("/nonexistent/aura/motion.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
