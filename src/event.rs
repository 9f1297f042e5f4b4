//! Input model: modifier keys, raw pointer/keyboard payloads, and machine events.
//!
//! `PointerInput` and `KeyInput` are what the host hands over for each DOM
//! event. `Event` is what a tool's state machine consumes; its `EventKind`
//! discriminant is the key of every transition table. `InputEvent` bundles a
//! raw event with its kind so hosts can route everything through one call.

#[cfg(test)]
#[path = "event_test.rs"]
mod event_test;

use crate::geometry::Point;
use crate::shape::ShapeId;

/// Key name that cancels an in-progress gesture.
pub const ESCAPE: &str = "Escape";

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

/// Raw pointer event as delivered by the host.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerInput {
    /// Modifier keys held when the event fired.
    pub modifiers: Modifiers,
    /// Shape marker of the element under the pointer, if the host found one.
    pub target: Option<ShapeId>,
}

impl PointerInput {
    /// Pointer event over empty canvas.
    #[must_use]
    pub fn on_canvas() -> Self {
        Self::default()
    }

    /// Pointer event over the shape with the given id.
    #[must_use]
    pub fn on_shape(id: impl Into<ShapeId>) -> Self {
        Self { modifiers: Modifiers::default(), target: Some(id.into()) }
    }

    /// Same event with shift held.
    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }
}

/// Raw keyboard event as delivered by the host.
///
/// `key` holds the key name as reported by the browser (e.g. `"Escape"`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyInput {
    pub key: String,
    pub modifiers: Modifiers,
}

impl KeyInput {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into(), modifiers: Modifiers::default() }
    }
}

/// Discriminant of [`Event`]; the key of every transition table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Activate,
    Deactivate,
    PointerDown,
    PointerMove,
    PointerUp,
    KeyDown,
    KeyUp,
    Complete,
    Cancel,
}

/// An event delivered to a tool's state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Activate,
    Deactivate,
    PointerDown { point: Point, input: PointerInput },
    PointerMove { point: Point, input: PointerInput },
    PointerUp { point: Point, input: PointerInput },
    KeyDown { key: String, input: KeyInput },
    KeyUp { key: String, input: KeyInput },
    Complete,
    Cancel,
}

impl Event {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Activate => EventKind::Activate,
            Self::Deactivate => EventKind::Deactivate,
            Self::PointerDown { .. } => EventKind::PointerDown,
            Self::PointerMove { .. } => EventKind::PointerMove,
            Self::PointerUp { .. } => EventKind::PointerUp,
            Self::KeyDown { .. } => EventKind::KeyDown,
            Self::KeyUp { .. } => EventKind::KeyUp,
            Self::Complete => EventKind::Complete,
            Self::Cancel => EventKind::Cancel,
        }
    }

    /// World-space point of a pointer event.
    #[must_use]
    pub fn point(&self) -> Option<Point> {
        match self {
            Self::PointerDown { point, .. } | Self::PointerMove { point, .. } | Self::PointerUp { point, .. } => {
                Some(*point)
            }
            _ => None,
        }
    }

    /// Raw payload of a pointer event.
    #[must_use]
    pub fn pointer(&self) -> Option<&PointerInput> {
        match self {
            Self::PointerDown { input, .. } | Self::PointerMove { input, .. } | Self::PointerUp { input, .. } => {
                Some(input)
            }
            _ => None,
        }
    }

    /// Key name of a keyboard event.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::KeyDown { key, .. } | Self::KeyUp { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Whether this is a key-down of Escape.
    #[must_use]
    pub fn is_escape(&self) -> bool {
        matches!(self, Self::KeyDown { key, .. } if key == ESCAPE)
    }
}

/// Raw host input routed through [`crate::manager::ToolManager::dispatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown(Point, PointerInput),
    PointerMove(Point, PointerInput),
    PointerUp(Point, PointerInput),
    KeyDown(KeyInput),
    KeyUp(KeyInput),
    Cancel,
}
