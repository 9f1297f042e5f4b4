//! Rectangle tool: press to anchor a corner, drag to size, release to commit.
//!
//! ```text
//! idle --ACTIVATE--> active --POINTER_DOWN--> drawing --POINTER_UP/Escape/CANCEL--> active
//!   ^                  |                         |
//!   +---DEACTIVATE-----+-------DEACTIVATE--------+
//! ```
//!
//! `drawing` sits inside `active`, so the crosshair set on entering `active`
//! survives the whole gesture and the draft context is only wiped when the
//! tool leaves `active` altogether.

#[cfg(test)]
#[path = "rectangle_test.rs"]
mod rectangle_test;

use std::rc::Rc;

use crate::config::ToolConfig;
use crate::cursor::{Cursor, CursorSink};
use crate::event::{Event, EventKind};
use crate::geometry::{Bounds, Point};
use crate::machine::{MachineConfig, StateLabel, StateNode, Transition};
use crate::shape::{Shape, ShapeId, ShapePatch, new_shape_id};
use crate::store::ShapeStore;
use crate::tool::{MachineTool, ToolMeta};

pub const RECTANGLE_TOOL_ID: &str = "rectangle";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RectangleState {
    Idle,
    Active,
    Drawing,
}

impl StateLabel for RectangleState {
    const IDLE: Self = RectangleState::Idle;

    fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Active => "active",
            Self::Drawing => "drawing",
        }
    }
}

/// Draft state of the rectangle being drawn, plus the tool's ports.
pub struct RectangleContext {
    /// Corner where the current drag started.
    pub start_point: Option<Point>,
    /// Id of the provisional shape being sized.
    pub current_shape_id: Option<ShapeId>,
    store: Rc<dyn ShapeStore>,
    cursor: Rc<dyn CursorSink>,
    config: ToolConfig,
}

impl RectangleContext {
    #[must_use]
    pub fn new(store: Rc<dyn ShapeStore>, cursor: Rc<dyn CursorSink>, config: ToolConfig) -> Self {
        Self { start_point: None, current_shape_id: None, store, cursor, config }
    }

    fn clear(&mut self) {
        self.start_point = None;
        self.current_shape_id = None;
    }

    /// Drop the draft if it never grew past the minimum size.
    fn discard_if_tiny(&self) {
        let Some(id) = self.current_shape_id.as_deref() else {
            return;
        };
        let Some(shape) = self.store.shape(id) else {
            return;
        };
        if shape.bounds().is_smaller_than(self.config.min_shape_size) {
            self.store.remove_shape(id);
        }
    }
}

// --- Hooks ---

fn enter_idle(ctx: &mut RectangleContext) {
    ctx.cursor.set(Cursor::Default);
}

fn enter_active(ctx: &mut RectangleContext) {
    ctx.cursor.set(Cursor::Crosshair);
}

fn exit_active(ctx: &mut RectangleContext) {
    ctx.clear();
}

// --- Guards ---

fn is_escape(_ctx: &RectangleContext, event: &Event) -> bool {
    event.is_escape()
}

// --- Actions ---

fn begin_draft(ctx: &mut RectangleContext, event: &Event) {
    let Some(point) = event.point() else {
        return;
    };
    let id = new_shape_id("rect");
    ctx.store.add_shape(Shape::rectangle(id.clone(), point, &ctx.config.style));
    ctx.start_point = Some(point);
    ctx.current_shape_id = Some(id);
}

fn resize_draft(ctx: &mut RectangleContext, event: &Event) {
    let (Some(start), Some(id), Some(point)) = (ctx.start_point, ctx.current_shape_id.as_deref(), event.point()) else {
        return;
    };
    ctx.store.update_shape(id, ShapePatch::bounds(Bounds::from_corners(start, point)));
}

fn finish_draft(ctx: &mut RectangleContext, _event: &Event) {
    ctx.discard_if_tiny();
    ctx.clear();
}

fn cancel_draft(ctx: &mut RectangleContext, _event: &Event) {
    if let Some(id) = ctx.current_shape_id.as_deref() {
        ctx.store.remove_shape(id);
    }
    ctx.clear();
}

/// Transition table for the rectangle tool.
#[must_use]
pub fn rectangle_config() -> MachineConfig<RectangleState, RectangleContext> {
    use RectangleState::{Active, Drawing, Idle};

    MachineConfig::new(RECTANGLE_TOOL_ID, Idle)
        .state(Idle, StateNode::new().entry(enter_idle).on(EventKind::Activate, Active))
        .state(
            Active,
            StateNode::new()
                .entry(enter_active)
                .exit(exit_active)
                .on(EventKind::Deactivate, Idle)
                .on(EventKind::PointerDown, Transition::to(Drawing).action(begin_draft)),
        )
        .state(
            Drawing,
            StateNode::new()
                .within(Active)
                .on(EventKind::PointerMove, Transition::to(Drawing).action(resize_draft))
                .on(EventKind::PointerUp, Transition::to(Active).action(finish_draft))
                .on(EventKind::KeyDown, Transition::to(Active).guard(is_escape).action(cancel_draft))
                .on(EventKind::Cancel, Transition::to(Active).action(cancel_draft))
                .on(EventKind::Deactivate, Transition::to(Idle).action(finish_draft)),
        )
}

/// Build a started rectangle tool bound to `store` and `cursor`.
#[must_use]
pub fn rectangle_tool(
    store: Rc<dyn ShapeStore>,
    cursor: Rc<dyn CursorSink>,
    config: ToolConfig,
) -> MachineTool<RectangleState, RectangleContext> {
    MachineTool::new(
        ToolMeta::new(RECTANGLE_TOOL_ID, "Rectangle").with_icon("square").with_cursor(Cursor::Crosshair.as_str()),
        rectangle_config(),
        RectangleContext::new(store, cursor, config),
    )
}
