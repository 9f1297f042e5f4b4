//! Store port: the host-owned shape collection and selection that tools mutate.
//!
//! Tools never own shapes. They receive an `Rc<dyn ShapeStore>` at
//! construction and call its CRUD-style methods from transition actions. All
//! methods take `&self`; implementations are single-threaded and use interior
//! mutability, the same way a browser store would.
//!
//! `MemoryStore` is the reference implementation. Besides holding state it
//! journals every mutation as a [`StoreOp`] so a host can mirror changes to a
//! server, and so tests can assert on call order.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use crate::shape::{Shape, ShapeId, ShapePatch};

/// Interface the host supplies for shape storage and selection.
pub trait ShapeStore {
    /// Snapshot of one shape.
    fn shape(&self, id: &str) -> Option<Shape>;
    /// Snapshot of all shapes.
    fn shapes(&self) -> HashMap<ShapeId, Shape>;
    fn add_shape(&self, shape: Shape);
    fn update_shape(&self, id: &str, patch: ShapePatch);
    fn remove_shape(&self, id: &str);

    /// Snapshot of the selection.
    fn selected_shape_ids(&self) -> HashSet<ShapeId>;
    fn select_shape(&self, id: &str);
    fn clear_selection(&self);

    /// Tell the host which tool is now active.
    fn set_current_tool(&self, tool_id: &str);

    fn is_selected(&self, id: &str) -> bool {
        self.selected_shape_ids().contains(id)
    }
}

/// A mutation applied to a [`MemoryStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum StoreOp {
    Added(Shape),
    Updated { id: ShapeId, patch: ShapePatch },
    Removed { id: ShapeId },
    Selected { id: ShapeId },
    SelectionCleared,
    CurrentTool(String),
}

#[derive(Default)]
struct Inner {
    shapes: HashMap<ShapeId, Shape>,
    selected: HashSet<ShapeId>,
    current_tool: Option<String>,
    journal: Vec<StoreOp>,
}

/// In-memory [`ShapeStore`].
#[derive(Default)]
pub struct MemoryStore {
    inner: RefCell<Inner>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `shapes`. Seeding is not journaled.
    #[must_use]
    pub fn with_shapes(shapes: impl IntoIterator<Item = Shape>) -> Self {
        let store = Self::new();
        {
            let mut inner = store.inner.borrow_mut();
            for shape in shapes {
                inner.shapes.insert(shape.id.clone(), shape);
            }
        }
        store
    }

    /// Id most recently passed to `set_current_tool`.
    #[must_use]
    pub fn current_tool(&self) -> Option<String> {
        self.inner.borrow().current_tool.clone()
    }

    /// Number of shapes currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().shapes.len()
    }

    /// Returns `true` if the store contains no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().shapes.is_empty()
    }

    /// Journaled mutations since the last drain, oldest first.
    #[must_use]
    pub fn ops(&self) -> Vec<StoreOp> {
        self.inner.borrow().journal.clone()
    }

    /// Take and clear the journal.
    pub fn drain_ops(&self) -> Vec<StoreOp> {
        std::mem::take(&mut self.inner.borrow_mut().journal)
    }
}

impl ShapeStore for MemoryStore {
    fn shape(&self, id: &str) -> Option<Shape> {
        self.inner.borrow().shapes.get(id).cloned()
    }

    fn shapes(&self) -> HashMap<ShapeId, Shape> {
        self.inner.borrow().shapes.clone()
    }

    /// Insert or replace a shape.
    fn add_shape(&self, shape: Shape) {
        let mut inner = self.inner.borrow_mut();
        inner.journal.push(StoreOp::Added(shape.clone()));
        inner.shapes.insert(shape.id.clone(), shape);
    }

    /// Apply a patch. Patches for unknown ids are journaled but change nothing.
    fn update_shape(&self, id: &str, patch: ShapePatch) {
        let mut inner = self.inner.borrow_mut();
        if let Some(shape) = inner.shapes.get_mut(id) {
            shape.apply(&patch);
        }
        inner.journal.push(StoreOp::Updated { id: id.to_string(), patch });
    }

    /// Remove a shape, dropping it from the selection as well.
    fn remove_shape(&self, id: &str) {
        let mut inner = self.inner.borrow_mut();
        inner.shapes.remove(id);
        inner.selected.remove(id);
        inner.journal.push(StoreOp::Removed { id: id.to_string() });
    }

    fn selected_shape_ids(&self) -> HashSet<ShapeId> {
        self.inner.borrow().selected.clone()
    }

    fn is_selected(&self, id: &str) -> bool {
        self.inner.borrow().selected.contains(id)
    }

    fn select_shape(&self, id: &str) {
        let mut inner = self.inner.borrow_mut();
        inner.selected.insert(id.to_string());
        inner.journal.push(StoreOp::Selected { id: id.to_string() });
    }

    fn clear_selection(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.selected.clear();
        inner.journal.push(StoreOp::SelectionCleared);
    }

    fn set_current_tool(&self, tool_id: &str) {
        let mut inner = self.inner.borrow_mut();
        inner.current_tool = Some(tool_id.to_string());
        inner.journal.push(StoreOp::CurrentTool(tool_id.to_string()));
    }
}
