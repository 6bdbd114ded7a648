//! Aura Theme Engine
//!
//! Dynamic theming for the Aura music player: the palette follows the
//! now-playing artwork and fades between colors through the motion engine's
//! palette interpolator.
//!
//! # Quick Start
//!
//! ```rust
//! use aura_animation::{ColorInterpolator, ManualFrameClock, MemoryElement, Palette, Rect};
//! use aura_theme::ThemeEngine;
//!
//! let root = MemoryElement::new(Rect::new(0.0, 0.0, 390.0, 844.0));
//! let clock = ManualFrameClock::new();
//! let mut theme = ThemeEngine::new(Some(ColorInterpolator::new(root.clone(), clock.clone())));
//!
//! theme.apply_artwork("https://cdn.example/cover.jpg", |_url| {
//!     Ok(Palette::from_hex_or_fallback("#202040", "#101830", "#ff8800"))
//! });
//!
//! clock.run_until_idle(16.0, 1_000);
//! assert_eq!(root.style("--color-accent").as_deref(), Some("rgb(255, 136, 0)"));
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod presets;

pub use config::ThemeConfig;
pub use engine::{css_variables, ThemeEngine};
pub use error::{Result, ThemeError};
pub use extract::{dominant_color, palette_from_pixels};
pub use presets::ThemePreset;
