use aura_animation::interpolator::{VAR_ACCENT, VAR_PRIMARY};
use aura_animation::{ColorInterpolator, ManualFrameClock, MemoryElement, MotionConfig, Palette, Rect, Rgb};
use aura_theme::{ThemeConfig, ThemeEngine, ThemeError, ThemePreset};
use pretty_assertions::assert_eq;

fn setup() -> (MemoryElement, ManualFrameClock, ThemeEngine<MemoryElement, ManualFrameClock>) {
    let root = MemoryElement::new(Rect::new(0.0, 0.0, 390.0, 844.0));
    let clock = ManualFrameClock::new();
    let engine = ThemeEngine::new(Some(ColorInterpolator::new(root.clone(), clock.clone())));
    (root, clock, engine)
}

fn palette(accent: &str) -> Palette {
    Palette::from_hex_or_fallback("#101010", "#202020", accent)
}

#[test]
fn preset_catalog_contains_expected_presets() {
    let ids: Vec<&str> = ThemePreset::all().iter().map(|p| p.id()).collect();
    assert_eq!(ids, vec!["midnight", "violet"]);
    assert_eq!(ThemePreset::default(), ThemePreset::Midnight);
    assert_eq!(ThemePreset::from_id("violet"), Some(ThemePreset::Violet));
    assert_eq!(ThemePreset::from_id("sepia"), None);
}

#[test]
fn midnight_is_the_resting_palette() {
    let midnight = ThemePreset::Midnight.palette();
    assert_eq!(midnight.primary.to_hex(), "#1a1a2e");
    assert_eq!(midnight.secondary.to_hex(), "#16213e");
    assert_eq!(midnight.accent.to_hex(), "#e94560");
}

#[test]
fn artwork_palette_fades_in_over_transition() {
    let (root, clock, mut engine) = setup();

    assert!(engine.apply_artwork("cover-1.jpg", |_| Ok(palette("#ff0000"))));
    clock.advance(450.0);
    assert_ne!(root.style(VAR_ACCENT).as_deref(), Some("rgb(255, 0, 0)"));

    clock.advance(450.0);
    assert_eq!(root.style(VAR_ACCENT).as_deref(), Some("rgb(255, 0, 0)"));
    assert_eq!(clock.pending_frames(), 0);
}

#[test]
fn newer_artwork_supersedes_running_transition() {
    let (root, clock, mut engine) = setup();

    engine.apply_artwork("cover-1.jpg", |_| Ok(palette("#ff0000")));
    clock.advance(100.0);
    engine.apply_artwork("cover-2.jpg", |_| Ok(palette("#0000ff")));

    clock.run_until_idle(16.0, 1_000);
    assert_eq!(root.style(VAR_ACCENT).as_deref(), Some("rgb(0, 0, 255)"));
    assert_eq!(engine.current(), palette("#0000ff"));
}

#[test]
fn failed_extraction_leaves_root_untouched() {
    let (root, clock, mut engine) = setup();

    let started = engine.apply_artwork("cors.jpg", |_| Err(ThemeError::Extraction("cors".into())));
    assert!(!started);
    assert_eq!(clock.pending_frames(), 0);
    assert_eq!(root.style(VAR_PRIMARY), None);
}

#[test]
fn invalid_color_from_extractor_is_an_error() {
    let (_root, _clock, mut engine) = setup();

    let started = engine.apply_artwork("odd.jpg", |_| {
        let accent = Rgb::from_hex("not-a-color")?;
        Ok(Palette::new(accent, accent, accent))
    });
    assert!(!started);
    assert_eq!(engine.current(), ThemePreset::Midnight.palette());
}

#[test]
fn reset_returns_to_resting_palette() {
    let (root, clock, mut engine) = setup();

    engine.apply_artwork("cover-1.jpg", |_| Ok(palette("#ff0000")));
    clock.run_until_idle(16.0, 1_000);

    assert!(engine.reset().is_some());
    clock.run_until_idle(16.0, 1_000);
    assert_eq!(root.style(VAR_ACCENT).as_deref(), Some("rgb(233, 69, 96)"));
    assert_eq!(engine.last_artwork(), None);

    // The same artwork themes again after a reset
    assert!(engine.apply_artwork("cover-1.jpg", |_| Ok(palette("#ff0000"))));
}

#[test]
fn config_selects_preset_and_duration() {
    let config = ThemeConfig::from_toml_str(
        r#"
        preset = "violet"
        transition_ms = 200
        "#,
    )
    .unwrap();
    assert_eq!(config.preset, ThemePreset::Violet);
    assert_eq!(config.resting_palette(), ThemePreset::Violet.palette());

    let root = MemoryElement::new(Rect::new(0.0, 0.0, 10.0, 10.0));
    let clock = ManualFrameClock::new();
    let mut engine = ThemeEngine::with_config(
        Some(ColorInterpolator::new(root.clone(), clock.clone())),
        &config,
        &MotionConfig::default(),
    );

    engine.set_palette(palette("#00ff00"));
    clock.advance(200.0);
    assert_eq!(root.style(VAR_ACCENT).as_deref(), Some("rgb(0, 255, 0)"));
}

#[test]
fn config_palette_overrides_preset() {
    let config = ThemeConfig::from_toml_str(
        r##"
        [palette]
        primary = "#000000"
        secondary = "#111111"
        accent = "#ffffff"
        "##,
    )
    .unwrap();
    assert_eq!(config.preset, ThemePreset::Midnight);
    assert_eq!(config.resting_palette().accent, Rgb::new(255, 255, 255));

    assert!(matches!(
        ThemeConfig::from_toml_str("preset = \"sepia\""),
        Err(ThemeError::Config(_))
    ));
}

#[test]
fn artwork_pixels_fade_in_their_dominant_accent() {
    let (root, clock, mut engine) = setup();

    // Every pixel is orange except a white border, so any stride finds orange
    let mut rgba = Vec::new();
    for i in 0..400 {
        let px = if i % 7 == 0 { [255, 255, 255, 255] } else { [255, 136, 0, 255] };
        rgba.extend_from_slice(&px);
    }

    assert!(engine.apply_artwork_pixels("cover.jpg", &rgba));
    clock.run_until_idle(16.0, 1_000);

    assert_eq!(engine.current().accent, Rgb::new(255, 136, 0));
    assert_eq!(engine.current().primary, ThemePreset::Midnight.palette().primary);
    assert_eq!(root.style(VAR_ACCENT).as_deref(), Some("rgb(255, 136, 0)"));
    assert!(!engine.apply_artwork_pixels("cover.jpg", &rgba));
}

#[test]
fn blank_artwork_falls_back_to_violet() {
    let (_root, _clock, mut engine) = setup();
    let white = vec![255u8; 4 * 64];

    assert!(engine.apply_artwork_pixels("blank.png", &white));
    assert_eq!(engine.current(), ThemePreset::Violet.palette());
}
