//! Built-in tools. Each one is a machine configuration plus a context; the
//! shared [`crate::tool::MachineTool`] turns it into a [`Tool`].

pub mod rectangle;
pub mod select;

use std::rc::Rc;

use crate::config::ToolConfig;
use crate::cursor::CursorSink;
use crate::store::ShapeStore;
use crate::tool::Tool;

pub use rectangle::{RECTANGLE_TOOL_ID, RectangleContext, RectangleState, rectangle_tool};
pub use select::{SELECT_TOOL_ID, SelectContext, SelectState, select_tool};

/// The select and rectangle tools, sharing one store and cursor.
#[must_use]
pub fn builtin_tools(
    store: &Rc<dyn ShapeStore>,
    cursor: &Rc<dyn CursorSink>,
    config: &ToolConfig,
) -> Vec<Box<dyn Tool>> {
    vec![
        Box::new(select_tool(Rc::clone(store), Rc::clone(cursor))),
        Box::new(rectangle_tool(Rc::clone(store), Rc::clone(cursor), config.clone())),
    ]
}
