//! Keyframes and the trajectory-to-keyframe mapper
//!
//! A [`KeyframeSequence`] is the declarative unit handed to a playback
//! backend: property snapshots at normalized offsets. Sequences come either
//! from fixed recipes (see [`KeyframeSequence::builder`]) or from simulated
//! spring trajectories via [`KeyframeMapper`] / [`to_keyframes`].

use crate::error::{MotionError, Result};
use crate::spring::Trajectory;
use smallvec::SmallVec;
use std::fmt;

/// A rendered property value
#[derive(Clone, Debug, PartialEq)]
pub enum KeyframeValue {
    Number(f64),
    Text(String),
}

impl KeyframeValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            KeyframeValue::Number(n) => Some(*n),
            KeyframeValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            KeyframeValue::Number(_) => None,
            KeyframeValue::Text(s) => Some(s),
        }
    }
}

impl fmt::Display for KeyframeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyframeValue::Number(n) => write!(f, "{n}"),
            KeyframeValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for KeyframeValue {
    fn from(value: f64) -> Self {
        KeyframeValue::Number(value)
    }
}

impl From<String> for KeyframeValue {
    fn from(value: String) -> Self {
        KeyframeValue::Text(value)
    }
}

impl From<&str> for KeyframeValue {
    fn from(value: &str) -> Self {
        KeyframeValue::Text(value.to_string())
    }
}

/// Style properties the motion engine animates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    Transform,
    Opacity,
    Filter,
    BackdropFilter,
    WebkitBackdropFilter,
    BackgroundPosition,
}

impl Property {
    /// CSS property name
    pub fn css_name(self) -> &'static str {
        match self {
            Property::Transform => "transform",
            Property::Opacity => "opacity",
            Property::Filter => "filter",
            Property::BackdropFilter => "backdrop-filter",
            Property::WebkitBackdropFilter => "-webkit-backdrop-filter",
            Property::BackgroundPosition => "background-position",
        }
    }
}

/// Property values of one keyframe, in insertion order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyframeProperties {
    entries: SmallVec<[(Property, KeyframeValue); 4]>,
}

impl KeyframeProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set a property (replaces an earlier value for the same property)
    pub fn with(mut self, property: Property, value: impl Into<KeyframeValue>) -> Self {
        self.set(property, value);
        self
    }

    /// Builder: set the transform
    pub fn with_transform(self, transform: impl Into<String>) -> Self {
        self.with(Property::Transform, KeyframeValue::Text(transform.into()))
    }

    /// Builder: set a numeric opacity
    pub fn with_opacity(self, opacity: f64) -> Self {
        self.with(Property::Opacity, opacity)
    }

    pub fn set(&mut self, property: Property, value: impl Into<KeyframeValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(p, _)| *p == property) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((property, value)),
        }
    }

    pub fn get(&self, property: Property) -> Option<&KeyframeValue> {
        self.entries
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Property, &KeyframeValue)> {
        self.entries.iter().map(|(p, v)| (*p, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A property snapshot at a normalized offset
#[derive(Clone, Debug, PartialEq)]
pub struct Keyframe {
    /// Time position (0.0 to 1.0)
    pub offset: f64,
    pub properties: KeyframeProperties,
}

/// An ordered, validated list of keyframes
///
/// The first offset is 0, the last is 1, offsets never decrease, and there
/// are always at least two keyframes.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyframeSequence {
    keyframes: Vec<Keyframe>,
}

impl KeyframeSequence {
    /// Validate and wrap a list of keyframes
    pub fn new(keyframes: Vec<Keyframe>) -> Result<Self> {
        if keyframes.len() < 2 {
            return Err(MotionError::InvalidKeyframes(format!(
                "need at least two keyframes, got {}",
                keyframes.len()
            )));
        }
        if keyframes[0].offset != 0.0 {
            return Err(MotionError::InvalidKeyframes(format!(
                "first offset must be 0, got {}",
                keyframes[0].offset
            )));
        }
        if keyframes[keyframes.len() - 1].offset != 1.0 {
            return Err(MotionError::InvalidKeyframes(format!(
                "last offset must be 1, got {}",
                keyframes[keyframes.len() - 1].offset
            )));
        }
        if let Some(kf) = keyframes
            .iter()
            .find(|k| !k.offset.is_finite() || !(0.0..=1.0).contains(&k.offset))
        {
            return Err(MotionError::InvalidKeyframes(format!(
                "offset {} is outside 0..=1",
                kf.offset
            )));
        }
        if let Some(pair) = keyframes.windows(2).find(|w| w[1].offset < w[0].offset) {
            return Err(MotionError::InvalidKeyframes(format!(
                "offsets must not decrease ({} after {})",
                pair[1].offset, pair[0].offset
            )));
        }
        Ok(Self { keyframes })
    }

    /// Start a fixed keyframe recipe
    pub fn builder() -> KeyframeSequenceBuilder {
        KeyframeSequenceBuilder::default()
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    /// Always false; a sequence holds at least two keyframes
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    pub fn first(&self) -> &Keyframe {
        &self.keyframes[0]
    }

    pub fn last(&self) -> &Keyframe {
        &self.keyframes[self.keyframes.len() - 1]
    }

    pub fn offsets(&self) -> impl Iterator<Item = f64> + '_ {
        self.keyframes.iter().map(|k| k.offset)
    }

    /// Sample a property at `progress` (0.0 to 1.0)
    ///
    /// Numbers interpolate linearly between the surrounding keyframes that
    /// carry the property; text values switch at the midpoint.
    pub fn sample(&self, property: Property, progress: f64) -> Option<KeyframeValue> {
        let progress = progress.clamp(0.0, 1.0);

        let mut prev: Option<(f64, &KeyframeValue)> = None;
        let mut next: Option<(f64, &KeyframeValue)> = None;

        for kf in &self.keyframes {
            let Some(value) = kf.properties.get(property) else {
                continue;
            };
            if kf.offset <= progress {
                prev = Some((kf.offset, value));
            }
            if kf.offset >= progress {
                next = Some((kf.offset, value));
                break;
            }
        }

        match (prev, next) {
            (Some((t0, a)), Some((t1, b))) => {
                if (t1 - t0).abs() < f64::EPSILON {
                    return Some(b.clone());
                }
                let local = (progress - t0) / (t1 - t0);
                Some(match (a, b) {
                    (KeyframeValue::Number(a), KeyframeValue::Number(b)) => {
                        KeyframeValue::Number(a + (b - a) * local)
                    }
                    _ if local < 0.5 => a.clone(),
                    _ => b.clone(),
                })
            }
            (Some((_, v)), None) | (None, Some((_, v))) => Some(v.clone()),
            (None, None) => None,
        }
    }

    /// All properties that appear anywhere in the sequence
    pub fn properties(&self) -> SmallVec<[Property; 4]> {
        let mut seen = SmallVec::new();
        for kf in &self.keyframes {
            for (property, _) in kf.properties.iter() {
                if !seen.contains(&property) {
                    seen.push(property);
                }
            }
        }
        seen
    }
}

/// Builder for hand-authored keyframe recipes
///
/// Entries without an explicit offset are placed at 0 when first and at 1
/// when last; any other entry must carry an offset.
#[derive(Clone, Debug, Default)]
pub struct KeyframeSequenceBuilder {
    entries: Vec<(Option<f64>, KeyframeProperties)>,
}

impl KeyframeSequenceBuilder {
    /// Add a keyframe at an explicit offset
    pub fn at(mut self, offset: f64, properties: KeyframeProperties) -> Self {
        self.entries.push((Some(offset), properties));
        self
    }

    /// Add a keyframe whose offset is implied by its position
    pub fn frame(mut self, properties: KeyframeProperties) -> Self {
        self.entries.push((None, properties));
        self
    }

    pub fn build(self) -> Result<KeyframeSequence> {
        let last = self.entries.len().saturating_sub(1);
        let keyframes = self
            .entries
            .into_iter()
            .enumerate()
            .map(|(i, (offset, properties))| {
                let offset = match offset {
                    Some(offset) => offset,
                    None if i == 0 => 0.0,
                    None if i == last => 1.0,
                    None => {
                        return Err(MotionError::InvalidKeyframes(format!(
                            "keyframe {i} needs an explicit offset"
                        )))
                    }
                };
                Ok(Keyframe { offset, properties })
            })
            .collect::<Result<Vec<_>>>()?;
        KeyframeSequence::new(keyframes)
    }
}

// ============================================================================
// Trajectory mapping
// ============================================================================

/// Channel values and offset for one mapped frame
#[derive(Debug)]
pub struct FrameSample<'a> {
    index: usize,
    offset: f64,
    channels: &'a [(&'static str, &'a Trajectory)],
}

impl FrameSample<'_> {
    /// Frame index in `0..max_len`
    pub fn index(&self) -> usize {
        self.index
    }

    /// Normalized offset of this frame
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Value of `channel` at this frame, frozen on its last sample past its end
    ///
    /// # Panics
    ///
    /// Panics if no channel with that name was registered.
    pub fn get(&self, channel: &str) -> f64 {
        self.channels
            .iter()
            .find(|(name, _)| *name == channel)
            .map(|(_, trajectory)| trajectory.sample(self.index))
            .unwrap_or_else(|| panic!("unknown trajectory channel `{channel}`"))
    }
}

type Renderer<'a> = Box<dyn Fn(&FrameSample<'_>) -> KeyframeValue + 'a>;

/// Maps parallel trajectories onto one keyframe sequence
///
/// # Example
///
/// ```ignore
/// let keyframes = KeyframeMapper::new()
///     .channel("y", &translate)
///     .channel("s", &scale)
///     .output(Property::Transform, |f| {
///         format!("translateY({}%) scale({})", f.get("y"), f.get("s")).into()
///     })
///     .map()?;
/// ```
#[derive(Default)]
pub struct KeyframeMapper<'a> {
    channels: SmallVec<[(&'static str, &'a Trajectory); 4]>,
    outputs: SmallVec<[(Property, Renderer<'a>); 4]>,
}

impl<'a> KeyframeMapper<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named trajectory
    pub fn channel(mut self, name: &'static str, trajectory: &'a Trajectory) -> Self {
        self.channels.push((name, trajectory));
        self
    }

    /// Register a rendered output property
    pub fn output(
        mut self,
        property: Property,
        render: impl Fn(&FrameSample<'_>) -> KeyframeValue + 'a,
    ) -> Self {
        self.outputs.push((property, Box::new(render)));
        self
    }

    /// Length of the longest registered channel
    pub fn max_len(&self) -> usize {
        self.channels
            .iter()
            .map(|(_, t)| t.len())
            .max()
            .unwrap_or(0)
    }

    /// Produce the keyframe sequence
    pub fn map(self) -> Result<KeyframeSequence> {
        let max_len = self.max_len();
        if max_len == 0 {
            return Err(MotionError::EmptyTrajectorySet);
        }

        let render_frame = |index: usize, offset: f64| {
            let sample = FrameSample {
                index,
                offset,
                channels: &self.channels[..],
            };
            let mut properties = KeyframeProperties::new();
            for (property, render) in &self.outputs {
                properties.set(*property, render(&sample));
            }
            Keyframe { offset, properties }
        };

        let keyframes = if max_len == 1 {
            vec![render_frame(0, 0.0), render_frame(0, 1.0)]
        } else {
            let denom = (max_len - 1) as f64;
            (0..max_len)
                .map(|i| render_frame(i, i as f64 / denom))
                .collect()
        };

        KeyframeSequence::new(keyframes)
    }
}

/// One property driven by one trajectory
#[derive(Clone, Copy)]
pub struct Track<'a> {
    pub property: Property,
    pub trajectory: &'a Trajectory,
    pub render: fn(f64) -> KeyframeValue,
}

impl<'a> Track<'a> {
    pub fn new(property: Property, trajectory: &'a Trajectory, render: fn(f64) -> KeyframeValue) -> Self {
        Self {
            property,
            trajectory,
            render,
        }
    }
}

/// Most tracks [`to_keyframes`] maps in one call
pub const MAX_TRACKS: usize = 8;

/// Map each property's own trajectory through its render function
///
/// At most [`MAX_TRACKS`] tracks are accepted; more fail with
/// [`MotionError::InvalidKeyframes`]. Use [`KeyframeMapper`] directly for
/// wider sets.
pub fn to_keyframes(tracks: &[Track<'_>]) -> Result<KeyframeSequence> {
    const NAMES: [&str; MAX_TRACKS] = ["t0", "t1", "t2", "t3", "t4", "t5", "t6", "t7"];
    if tracks.len() > NAMES.len() {
        return Err(MotionError::InvalidKeyframes(format!(
            "at most {} tracks can be mapped at once, got {}",
            NAMES.len(),
            tracks.len()
        )));
    }

    let mut mapper = KeyframeMapper::new();
    for (&name, track) in NAMES.iter().zip(tracks) {
        let render = track.render;
        mapper = mapper
            .channel(name, track.trajectory)
            .output(track.property, move |frame| render(frame.get(name)));
    }
    mapper.map()
}

/// Tolerance window around a transition's designed duration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DurationWindow {
    pub nominal_ms: u32,
    pub below_ms: u32,
    pub above_ms: u32,
}

impl DurationWindow {
    pub const fn new(nominal_ms: u32, below_ms: u32, above_ms: u32) -> Self {
        Self {
            nominal_ms,
            below_ms,
            above_ms,
        }
    }

    pub fn min_ms(&self) -> u32 {
        self.nominal_ms.saturating_sub(self.below_ms)
    }

    pub fn max_ms(&self) -> u32 {
        self.nominal_ms.saturating_add(self.above_ms)
    }

    pub fn clamp(&self, duration_ms: u32) -> u32 {
        duration_ms.clamp(self.min_ms(), self.max_ms())
    }
}

/// Playback duration for a simulated transition of `max_len` frames
pub fn spring_duration_ms(max_len: usize, sample_rate: f64, window: DurationWindow) -> u32 {
    let raw = (max_len as f64 / sample_rate * 1000.0).round();
    window.clamp(raw.clamp(0.0, u32::MAX as f64) as u32)
}
