//! Cursor port.
//!
//! Tools change the pointer cursor from their entry/exit hooks. The host binds
//! [`CursorSink`] to whatever surface it draws on; headless hosts and tests use
//! [`NoopCursor`] or [`RecordingCursor`].

#[cfg(test)]
#[path = "cursor_test.rs"]
mod cursor_test;

use std::cell::RefCell;

/// The closed set of cursors a tool may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Crosshair,
    Grabbing,
}

impl Cursor {
    /// CSS cursor keyword.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Crosshair => "crosshair",
            Self::Grabbing => "grabbing",
        }
    }
}

/// Receives cursor changes.
pub trait CursorSink {
    fn set(&self, cursor: Cursor);
}

/// Discards every cursor change.
#[derive(Debug, Default)]
pub struct NoopCursor;

impl CursorSink for NoopCursor {
    fn set(&self, _cursor: Cursor) {}
}

/// Remembers every cursor change in order.
#[derive(Debug, Default)]
pub struct RecordingCursor {
    history: RefCell<Vec<Cursor>>,
}

impl RecordingCursor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent cursor, or [`Cursor::Default`] if none was ever set.
    #[must_use]
    pub fn current(&self) -> Cursor {
        self.history.borrow().last().copied().unwrap_or_default()
    }

    /// All cursor changes so far, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<Cursor> {
        self.history.borrow().clone()
    }
}

impl CursorSink for RecordingCursor {
    fn set(&self, cursor: Cursor) {
        self.history.borrow_mut().push(cursor);
    }
}
