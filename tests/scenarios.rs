//! End-to-end gestures driven through the public `ToolManager` API.
#![allow(clippy::float_cmp)]

use std::rc::Rc;

use tool_machine::config::ShapeStyle;
use tool_machine::cursor::{Cursor, CursorSink, RecordingCursor};
use tool_machine::shape::{Shape, ShapePatch};
use tool_machine::store::{MemoryStore, ShapeStore, StoreOp};
use tool_machine::tools::{RECTANGLE_TOOL_ID, SELECT_TOOL_ID, builtin_tools};
use tool_machine::{Bounds, InputEvent, KeyInput, Point, PointerInput, ToolConfig, ToolManager};

struct Canvas {
    store: Rc<MemoryStore>,
    cursor: Rc<RecordingCursor>,
    manager: ToolManager,
}

impl Canvas {
    fn new(shapes: Vec<Shape>) -> Self {
        let store = Rc::new(MemoryStore::with_shapes(shapes));
        let cursor = Rc::new(RecordingCursor::new());
        let shared_store: Rc<dyn ShapeStore> = store.clone();
        let shared_cursor: Rc<dyn CursorSink> = cursor.clone();
        let mut manager = ToolManager::new(Rc::clone(&shared_store));
        for tool in builtin_tools(&shared_store, &shared_cursor, &ToolConfig::default()) {
            manager.register_tool(tool);
        }
        Self { store, cursor, manager }
    }

    fn with_tool(shapes: Vec<Shape>, tool: &str) -> Self {
        let mut canvas = Self::new(shapes);
        canvas.manager.set_active_tool(tool).unwrap();
        canvas.store.drain_ops();
        canvas
    }

    fn state(&self, tool: &str) -> &'static str {
        self.manager.tool(tool).unwrap().state()
    }

    fn down(&mut self, x: f64, y: f64, input: PointerInput) {
        self.manager.dispatch(&InputEvent::PointerDown(Point::new(x, y), input));
    }

    fn drag_to(&mut self, x: f64, y: f64) {
        self.manager.dispatch(&InputEvent::PointerMove(Point::new(x, y), PointerInput::on_canvas()));
    }

    fn up(&mut self, x: f64, y: f64) {
        self.manager.dispatch(&InputEvent::PointerUp(Point::new(x, y), PointerInput::on_canvas()));
    }

    /// Id of the most recently added shape.
    fn drafted_id(&self) -> String {
        self.store
            .ops()
            .into_iter()
            .rev()
            .find_map(|op| match op {
                StoreOp::Added(shape) => Some(shape.id),
                _ => None,
            })
            .unwrap()
    }
}

fn square(id: &str, x: f64, y: f64) -> Shape {
    let mut shape = Shape::rectangle(id.to_string(), Point::new(x, y), &ShapeStyle::default());
    shape.width = 40.0;
    shape.height = 40.0;
    shape
}

// =============================================================
// Rectangle tool
// =============================================================

#[test]
fn press_creates_zero_size_draft() {
    let mut canvas = Canvas::with_tool(vec![], RECTANGLE_TOOL_ID);
    canvas.down(100.0, 100.0, PointerInput::on_canvas());

    assert_eq!(canvas.state(RECTANGLE_TOOL_ID), "drawing");
    let ops = canvas.store.ops();
    let [StoreOp::Added(shape)] = ops.as_slice() else {
        panic!("expected a single add, got {ops:?}");
    };
    assert_eq!((shape.x, shape.y, shape.width, shape.height), (100.0, 100.0, 0.0, 0.0));
    assert_eq!(shape.stroke_color, "#000000");
}

#[test]
fn dragging_sizes_draft_from_anchor() {
    let mut canvas = Canvas::with_tool(vec![], RECTANGLE_TOOL_ID);
    canvas.down(100.0, 100.0, PointerInput::on_canvas());
    let id = canvas.drafted_id();

    canvas.drag_to(200.0, 150.0);

    assert_eq!(
        canvas.store.ops().last(),
        Some(&StoreOp::Updated {
            id: id.clone(),
            patch: ShapePatch::bounds(Bounds { x: 100.0, y: 100.0, width: 100.0, height: 50.0 }),
        })
    );

    canvas.up(200.0, 150.0);
    assert_eq!(canvas.state(RECTANGLE_TOOL_ID), "active");
    assert_eq!(canvas.store.shape(&id).unwrap().bounds(), Bounds { x: 100.0, y: 100.0, width: 100.0, height: 50.0 });
}

#[test]
fn dragging_up_and_left_normalizes_bounds() {
    let mut canvas = Canvas::with_tool(vec![], RECTANGLE_TOOL_ID);
    canvas.down(200.0, 150.0, PointerInput::on_canvas());
    let id = canvas.drafted_id();
    canvas.drag_to(100.0, 100.0);
    canvas.up(100.0, 100.0);

    assert_eq!(canvas.store.shape(&id).unwrap().bounds(), Bounds { x: 100.0, y: 100.0, width: 100.0, height: 50.0 });
}

#[test]
fn click_without_drag_leaves_no_shape() {
    let mut canvas = Canvas::with_tool(vec![], RECTANGLE_TOOL_ID);
    canvas.down(100.0, 100.0, PointerInput::on_canvas());
    let id = canvas.drafted_id();
    canvas.up(102.0, 102.0);

    assert_eq!(canvas.store.ops().last(), Some(&StoreOp::Removed { id }));
    assert!(canvas.store.is_empty());
    assert_eq!(canvas.state(RECTANGLE_TOOL_ID), "active");
}

#[test]
fn escape_mid_draw_discards_draft() {
    let mut canvas = Canvas::with_tool(vec![], RECTANGLE_TOOL_ID);
    canvas.down(10.0, 10.0, PointerInput::on_canvas());
    canvas.drag_to(400.0, 300.0);

    canvas.manager.dispatch(&InputEvent::KeyDown(KeyInput::new("Escape")));

    assert!(canvas.store.is_empty());
    assert_eq!(canvas.state(RECTANGLE_TOOL_ID), "active");
    assert_eq!(canvas.cursor.current(), Cursor::Crosshair);
}

// =============================================================
// Select tool
// =============================================================

#[test]
fn click_selects_single_shape() {
    let mut canvas = Canvas::with_tool(vec![square("shape-1", 100.0, 100.0)], SELECT_TOOL_ID);
    canvas.down(110.0, 110.0, PointerInput::on_shape("shape-1"));

    assert_eq!(canvas.store.ops(), vec![StoreOp::SelectionCleared, StoreOp::Selected { id: "shape-1".into() }]);
}

#[test]
fn shift_click_adds_to_selection() {
    let mut canvas =
        Canvas::with_tool(vec![square("shape-1", 100.0, 100.0), square("shape-2", 300.0, 300.0)], SELECT_TOOL_ID);
    canvas.store.select_shape("shape-1");
    canvas.store.drain_ops();

    canvas.down(310.0, 310.0, PointerInput::on_shape("shape-2").with_shift());

    assert_eq!(canvas.store.ops(), vec![StoreOp::Selected { id: "shape-2".into() }]);
    assert_eq!(canvas.store.selected_shape_ids().len(), 2);
}

#[test]
fn drag_moves_shape_from_snapshot() {
    let mut canvas = Canvas::with_tool(vec![square("shape-1", 100.0, 100.0)], SELECT_TOOL_ID);
    canvas.down(100.0, 100.0, PointerInput::on_shape("shape-1"));
    canvas.store.drain_ops();

    canvas.drag_to(110.0, 110.0);
    assert_eq!(canvas.state(SELECT_TOOL_ID), "dragging");
    assert_eq!(canvas.cursor.current(), Cursor::Grabbing);

    canvas.drag_to(150.0, 150.0);
    assert_eq!(
        canvas.store.ops(),
        vec![
            StoreOp::Updated { id: "shape-1".into(), patch: ShapePatch::position(Point::new(110.0, 110.0)) },
            StoreOp::Updated { id: "shape-1".into(), patch: ShapePatch::position(Point::new(150.0, 150.0)) },
        ]
    );

    canvas.up(150.0, 150.0);
    assert_eq!(canvas.state(SELECT_TOOL_ID), "active");
    assert_eq!(canvas.cursor.current(), Cursor::Default);
}

// =============================================================
// Switching
// =============================================================

#[test]
fn draw_then_select_then_move() {
    let mut canvas = Canvas::with_tool(vec![], RECTANGLE_TOOL_ID);
    canvas.down(0.0, 0.0, PointerInput::on_canvas());
    let id = canvas.drafted_id();
    canvas.drag_to(50.0, 50.0);
    canvas.up(50.0, 50.0);

    canvas.manager.set_active_tool(SELECT_TOOL_ID).unwrap();
    assert_eq!(canvas.store.current_tool().as_deref(), Some(SELECT_TOOL_ID));
    assert_eq!(canvas.cursor.current(), Cursor::Default);

    canvas.down(25.0, 25.0, PointerInput::on_shape(id.clone()));
    canvas.drag_to(35.0, 45.0);
    canvas.up(35.0, 45.0);

    let shape = canvas.store.shape(&id).unwrap();
    assert_eq!(shape.position(), Point::new(10.0, 20.0));
    assert_eq!((shape.width, shape.height), (50.0, 50.0));
    assert!(canvas.store.is_selected(&id));
}

#[test]
fn unknown_tool_leaves_nothing_live() {
    let mut canvas = Canvas::with_tool(vec![], RECTANGLE_TOOL_ID);
    assert!(canvas.manager.set_active_tool("ellipse").is_err());
    assert_eq!(canvas.manager.active_tool(), Some(RECTANGLE_TOOL_ID));
    assert!(canvas.manager.tools().iter().all(|tool| !tool.is_active()));

    canvas.down(10.0, 10.0, PointerInput::on_canvas());
    assert!(canvas.store.ops().is_empty());
}
