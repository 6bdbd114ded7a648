//! Theme engine errors

use aura_animation::MotionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThemeError {
    /// The artwork could not be turned into a palette (network, decode, CORS)
    #[error("palette extraction failed: {0}")]
    Extraction(String),

    #[error(transparent)]
    Color(#[from] MotionError),

    #[error("failed to parse theme config: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ThemeError>;
