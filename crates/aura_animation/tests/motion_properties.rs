use aura_animation::interpolator::{VAR_ACCENT, VAR_GRADIENT_OPACITY, VAR_PRIMARY, VAR_SECONDARY};
use aura_animation::{
    simulate, to_keyframes, AnimationHandle, ColorInterpolator, HeadlessPlayback, KeyframeMapper,
    KeyframeValue, ManualFrameClock, MemoryElement, Palette, PlayState, Property,
    RotationController, Rect, SpringConfig, Track, Trajectory,
};

const CONFIGS: [SpringConfig; 7] = [
    SpringConfig::DEFAULT,
    SpringConfig::GENTLE,
    SpringConfig::BOUNCY,
    SpringConfig::CINEMATIC,
    SpringConfig::WOBBLY,
    SpringConfig::new(50.0, 0.0, 1.0),
    SpringConfig::new(1000.0, 200.0, 0.5),
];

#[test]
fn simulated_trajectories_are_bounded_and_land_exactly() {
    for config in CONFIGS {
        for sample_rate in [30.0, 60.0, 120.0] {
            for (from, to) in [(100.0, 0.0), (0.0, 1.0), (-80.0, 0.0), (0.92, 1.0)] {
                let trajectory = simulate(from, to, config, sample_rate);

                assert!(!trajectory.is_empty());
                assert!(
                    trajectory.len() as f64 <= sample_rate * 3.0 + 1.0,
                    "{config:?} at {sample_rate} Hz produced {} samples",
                    trajectory.len()
                );
                if trajectory.converged() {
                    assert_eq!(trajectory.last(), to, "{config:?} {from}->{to}");
                }
            }
        }
    }
}

#[test]
fn equal_endpoints_converge_immediately() {
    for config in CONFIGS {
        let trajectory = simulate(0.42, 0.42, config, 60.0);
        assert!(trajectory.converged());
        assert!(trajectory.len() <= 3);
        assert_eq!(trajectory.last(), 0.42);
    }
}

#[test]
fn mapped_offsets_increase_from_zero_to_one() {
    fn number(v: f64) -> KeyframeValue {
        KeyframeValue::Number(v)
    }

    for a in CONFIGS {
        for b in CONFIGS {
            let x = simulate(0.0, 1.0, a, 60.0);
            let y = simulate(1.0, 0.0, b, 60.0);
            let seq = to_keyframes(&[
                Track::new(Property::Opacity, &x, number),
                Track::new(Property::Filter, &y, number),
            ])
            .unwrap();

            let offsets: Vec<f64> = seq.offsets().collect();
            assert_eq!(offsets[0], 0.0);
            assert_eq!(*offsets.last().unwrap(), 1.0);
            assert!(offsets.windows(2).all(|w| w[1] > w[0]));
        }
    }
}

#[test]
fn shorter_channel_freezes_past_its_end() {
    let short = Trajectory::from_samples(vec![1.0, 2.0]).unwrap();
    let long = simulate(0.0, 50.0, SpringConfig::CINEMATIC, 60.0);

    let seq = KeyframeMapper::new()
        .channel("short", &short)
        .channel("long", &long)
        .output(Property::Opacity, |f| f.get("short").into())
        .map()
        .unwrap();

    assert_eq!(seq.len(), long.len());
    for kf in &seq.keyframes()[1..] {
        assert_eq!(kf.properties.get(Property::Opacity), Some(&KeyframeValue::Number(2.0)));
    }
}

#[test]
fn expand_translate_renders_start_and_rest() {
    let y = simulate(100.0, 0.0, SpringConfig::new(180.0, 22.0, 1.1), 60.0);
    let seq = KeyframeMapper::new()
        .channel("y", &y)
        .output(Property::Transform, |f| format!("translateY({}%)", f.get("y")).into())
        .map()
        .unwrap();

    let first = seq.first();
    let last = seq.last();
    assert_eq!(first.offset, 0.0);
    assert_eq!(first.properties.get(Property::Transform).unwrap().to_string(), "translateY(100%)");
    assert_eq!(last.offset, 1.0);
    assert_eq!(last.properties.get(Property::Transform).unwrap().to_string(), "translateY(0%)");
}

#[test]
fn palette_reaches_target_after_duration() {
    let clock = ManualFrameClock::new();
    let root = MemoryElement::new(Rect::new(0.0, 0.0, 390.0, 844.0));
    let interpolator = ColorInterpolator::new(root.clone(), clock.clone());

    let from = Palette::from_hex_or_fallback("#1a1a2e", "#16213e", "#e94560");
    let to = Palette::from_hex_or_fallback("#ffffff", "#000000", "#336699");
    interpolator.transition(from, to, 900.0);

    // Frames strictly inside the duration never land on the target
    clock.advance(450.0);
    assert_ne!(root.style(VAR_PRIMARY).as_deref(), Some("rgb(255, 255, 255)"));
    assert!(clock.pending_frames() > 0);

    clock.advance(450.0);
    assert_eq!(root.style(VAR_PRIMARY).as_deref(), Some("rgb(255, 255, 255)"));
    assert_eq!(root.style(VAR_SECONDARY).as_deref(), Some("rgb(0, 0, 0)"));
    assert_eq!(root.style(VAR_ACCENT).as_deref(), Some("rgb(51, 102, 153)"));
    assert_eq!(root.style(VAR_GRADIENT_OPACITY).as_deref(), Some("1"));
    assert_eq!(clock.pending_frames(), 0);
}

#[test]
fn rotation_toggle_never_duplicates() {
    let playback = HeadlessPlayback::new();
    let artwork = MemoryElement::new(Rect::new(0.0, 0.0, 280.0, 280.0));
    let mut rotation = RotationController::new(24_000);

    let first = rotation.set_playing(&playback, Some(&artwork), true).unwrap().id();
    let second = rotation.set_playing(&playback, Some(&artwork), true).unwrap().id();
    assert_eq!(first, second);
    assert_eq!(playback.active_count(), 1);

    rotation.set_playing(&playback, Some(&artwork), false);
    playback.tick(60_000.0);
    assert_eq!(rotation.handle().unwrap().play_state(), PlayState::Paused);
    assert_eq!(playback.active_count(), 1);
}
