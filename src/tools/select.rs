//! Select tool: click to select, shift-click to extend, drag to move.
//!
//! ```text
//! idle --ACTIVATE--> active --POINTER_MOVE [drag seeded]--> dragging --POINTER_UP/Escape/CANCEL--> active
//!   ^                  |                                        |
//!   +---DEACTIVATE-----+----------------DEACTIVATE--------------+
//! ```
//!
//! A press on a shape seeds the drag context but stays in `active`; only a
//! following move enters `dragging`. Every drag update is computed from the
//! shape's position at press time plus the total pointer delta, never by
//! accumulating per-move deltas.

#[cfg(test)]
#[path = "select_test.rs"]
mod select_test;

use std::rc::Rc;

use crate::cursor::{Cursor, CursorSink};
use crate::event::{Event, EventKind};
use crate::geometry::Point;
use crate::machine::{MachineConfig, StateLabel, StateNode, Transition};
use crate::shape::{ShapeId, ShapePatch};
use crate::store::ShapeStore;
use crate::tool::{MachineTool, ToolMeta};

pub const SELECT_TOOL_ID: &str = "select";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectState {
    Idle,
    Active,
    Dragging,
}

impl StateLabel for SelectState {
    const IDLE: Self = SelectState::Idle;

    fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Active => "active",
            Self::Dragging => "dragging",
        }
    }
}

/// Drag anchor for the shape under the last press, plus the tool's ports.
pub struct SelectContext {
    pub dragged_shape_id: Option<ShapeId>,
    /// World-space pointer position at press time.
    pub drag_start: Option<Point>,
    /// Shape position at press time.
    pub shape_start_position: Option<Point>,
    store: Rc<dyn ShapeStore>,
    cursor: Rc<dyn CursorSink>,
}

impl SelectContext {
    #[must_use]
    pub fn new(store: Rc<dyn ShapeStore>, cursor: Rc<dyn CursorSink>) -> Self {
        Self { dragged_shape_id: None, drag_start: None, shape_start_position: None, store, cursor }
    }

    fn clear(&mut self) {
        self.dragged_shape_id = None;
        self.drag_start = None;
        self.shape_start_position = None;
    }
}

// --- Hooks ---

fn enter_active(ctx: &mut SelectContext) {
    ctx.cursor.set(Cursor::Default);
}

fn exit_active(ctx: &mut SelectContext) {
    ctx.clear();
}

fn enter_dragging(ctx: &mut SelectContext) {
    ctx.cursor.set(Cursor::Grabbing);
}

fn exit_dragging(ctx: &mut SelectContext) {
    ctx.cursor.set(Cursor::Default);
}

// --- Guards ---

fn drag_seeded(ctx: &SelectContext, _event: &Event) -> bool {
    ctx.dragged_shape_id.is_some() && ctx.drag_start.is_some()
}

fn is_escape(_ctx: &SelectContext, event: &Event) -> bool {
    event.is_escape()
}

// --- Actions ---

fn press(ctx: &mut SelectContext, event: &Event) {
    let (Some(point), Some(input)) = (event.point(), event.pointer()) else {
        return;
    };
    let additive = input.modifiers.shift;
    let hit = input.target.as_deref().and_then(|id| ctx.store.shape(id));

    let Some(shape) = hit else {
        if !additive {
            ctx.store.clear_selection();
        }
        ctx.clear();
        return;
    };

    if !additive && !ctx.store.is_selected(&shape.id) {
        ctx.store.clear_selection();
    }
    ctx.store.select_shape(&shape.id);
    ctx.drag_start = Some(point);
    ctx.shape_start_position = Some(shape.position());
    ctx.dragged_shape_id = Some(shape.id);
}

fn drag(ctx: &mut SelectContext, event: &Event) {
    let (Some(id), Some(start), Some(origin), Some(point)) =
        (ctx.dragged_shape_id.as_deref(), ctx.drag_start, ctx.shape_start_position, event.point())
    else {
        return;
    };
    let delta = point.delta_from(start);
    ctx.store.update_shape(id, ShapePatch::position(origin.offset(delta)));
}

fn release(ctx: &mut SelectContext, _event: &Event) {
    ctx.clear();
}

fn revert(ctx: &mut SelectContext, _event: &Event) {
    if let (Some(id), Some(origin)) = (ctx.dragged_shape_id.as_deref(), ctx.shape_start_position) {
        ctx.store.update_shape(id, ShapePatch::position(origin));
    }
    ctx.clear();
}

/// Transition table for the select tool.
#[must_use]
pub fn select_config() -> MachineConfig<SelectState, SelectContext> {
    use SelectState::{Active, Dragging, Idle};

    MachineConfig::new(SELECT_TOOL_ID, Idle)
        .state(Idle, StateNode::new().on(EventKind::Activate, Active))
        .state(
            Active,
            StateNode::new()
                .entry(enter_active)
                .exit(exit_active)
                .on(EventKind::Deactivate, Idle)
                .on(EventKind::PointerDown, Transition::to(Active).action(press))
                .on(EventKind::PointerMove, Transition::to(Dragging).guard(drag_seeded).action(drag))
                .on(EventKind::PointerUp, Transition::to(Active).action(release)),
        )
        .state(
            Dragging,
            StateNode::new()
                .within(Active)
                .entry(enter_dragging)
                .exit(exit_dragging)
                .on(EventKind::PointerMove, Transition::to(Dragging).action(drag))
                .on(EventKind::PointerUp, Transition::to(Active).action(release))
                .on(EventKind::KeyDown, Transition::to(Active).guard(is_escape).action(revert))
                .on(EventKind::Cancel, Transition::to(Active).action(revert))
                .on(EventKind::Deactivate, Transition::to(Idle).action(release)),
        )
}

/// Build a started select tool bound to `store` and `cursor`.
#[must_use]
pub fn select_tool(store: Rc<dyn ShapeStore>, cursor: Rc<dyn CursorSink>) -> MachineTool<SelectState, SelectContext> {
    MachineTool::new(
        ToolMeta::new(SELECT_TOOL_ID, "Select").with_icon("cursor").with_cursor(Cursor::Default.as_str()),
        select_config(),
        SelectContext::new(store, cursor),
    )
}
