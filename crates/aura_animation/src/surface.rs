//! Visual targets
//!
//! The motion engine never touches a rendering surface directly. Transitions
//! receive [`Element`] handles and write through this narrow interface;
//! [`MemoryElement`] is the in-process implementation used by the headless
//! backend and by tests.

use crate::error::{MotionError, Result};
use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex};

/// A position in surface coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in surface coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Convert a surface point into this rectangle's local coordinates
    pub fn to_local(&self, point: Point) -> Point {
        Point::new(point.x - self.x, point.y - self.y)
    }
}

/// Pointer data carried by a press
#[derive(Clone, Debug, PartialEq)]
pub enum PointerInput {
    Mouse(Point),
    /// Active touches; the first one is the press position
    Touch(Vec<Point>),
}

impl PointerInput {
    /// Press position, if any
    pub fn position(&self) -> Option<Point> {
        match self {
            PointerInput::Mouse(point) => Some(*point),
            PointerInput::Touch(touches) => touches.first().copied(),
        }
    }
}

/// Sink for inline style properties and style variables
pub trait StyleSink {
    /// Set a style property or `--variable`
    fn set_style(&self, name: &str, value: &str);

    /// Remove a style property or `--variable`
    fn clear_style(&self, name: &str);
}

/// A visual element the motion engine can animate
pub trait Element: StyleSink + Clone + Send + Sync + 'static {
    /// Bounding box in surface coordinates
    fn bounds(&self) -> Rect;

    /// Resolved value of a style property (inline or inherited)
    fn computed_style(&self, name: &str) -> Option<String>;

    /// Create a child overlay with the given inline styles
    fn spawn_overlay(&self, styles: &[(&str, String)]) -> Self;

    /// Remove this element from its parent
    fn detach(&self) -> Result<()>;
}

#[derive(Debug, Default)]
struct ElementState {
    bounds: Rect,
    styles: FxHashMap<String, String>,
    children: Vec<MemoryElement>,
    attached: bool,
}

/// An element that lives only in memory
///
/// Clones share state, so a clone held by a running animation observes the
/// same styles as the caller's handle.
#[derive(Clone, Debug)]
pub struct MemoryElement {
    state: Arc<Mutex<ElementState>>,
}

impl MemoryElement {
    pub fn new(bounds: Rect) -> Self {
        Self {
            state: Arc::new(Mutex::new(ElementState {
                bounds,
                attached: true,
                ..Default::default()
            })),
        }
    }

    /// Current inline value of a style property
    pub fn style(&self, name: &str) -> Option<String> {
        self.state.lock().unwrap().styles.get(name).cloned()
    }

    /// Overlays that are still attached
    pub fn children(&self) -> Vec<MemoryElement> {
        self.state
            .lock()
            .unwrap()
            .children
            .iter()
            .filter(|c| c.is_attached())
            .cloned()
            .collect()
    }

    pub fn is_attached(&self) -> bool {
        self.state.lock().unwrap().attached
    }

    pub fn set_bounds(&self, bounds: Rect) {
        self.state.lock().unwrap().bounds = bounds;
    }
}

impl StyleSink for MemoryElement {
    fn set_style(&self, name: &str, value: &str) {
        self.state
            .lock()
            .unwrap()
            .styles
            .insert(name.to_string(), value.to_string());
    }

    fn clear_style(&self, name: &str) {
        self.state.lock().unwrap().styles.remove(name);
    }
}

impl Element for MemoryElement {
    fn bounds(&self) -> Rect {
        self.state.lock().unwrap().bounds
    }

    fn computed_style(&self, name: &str) -> Option<String> {
        self.style(name)
    }

    fn spawn_overlay(&self, styles: &[(&str, String)]) -> Self {
        let overlay = MemoryElement::new(Rect::default());
        for (name, value) in styles {
            overlay.set_style(name, value);
        }
        self.state.lock().unwrap().children.push(overlay.clone());
        overlay
    }

    fn detach(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !state.attached {
            return Err(MotionError::Detach("element is not attached".to_string()));
        }
        state.attached = false;
        Ok(())
    }
}
