//! Tool registry and input router.
//!
//! The manager owns every registered tool and remembers which one is active.
//! Raw host input goes to the active tool only; with nothing active, input is
//! dropped silently. Switching tools always deactivates the outgoing tool
//! first, so at most one tool is live at any time.

#[cfg(test)]
#[path = "manager_test.rs"]
mod manager_test;

use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::error::ToolError;
use crate::event::{InputEvent, KeyInput, PointerInput};
use crate::geometry::Point;
use crate::store::ShapeStore;
use crate::tool::Tool;

pub struct ToolManager {
    tools: HashMap<String, Box<dyn Tool>>,
    active: Option<String>,
    store: Rc<dyn ShapeStore>,
}

impl ToolManager {
    /// Create a manager with no tools; `store` is told about every tool switch.
    #[must_use]
    pub fn new(store: Rc<dyn ShapeStore>) -> Self {
        Self { tools: HashMap::new(), active: None, store }
    }

    // --- Registry ---

    /// Register a tool, replacing any tool with the same id.
    ///
    /// Replacing the live active tool deactivates the old instance before
    /// activating the new one, so the cursor ends in the new tool's mode.
    /// Incoming tools are reset to idle first; only the one taking over a
    /// live active slot is switched back on.
    pub fn register_tool(&mut self, mut tool: Box<dyn Tool>) {
        let id = tool.id().to_string();
        let takes_active_slot = self.active.as_deref() == Some(id.as_str());

        let mut was_live = false;
        match self.tools.remove(&id) {
            Some(mut previous) => {
                if takes_active_slot && previous.is_active() {
                    previous.deactivate();
                    was_live = true;
                }
                debug!(tool = %id, "tool replaced");
            }
            None => debug!(tool = %id, "tool registered"),
        }

        if tool.is_active() {
            tool.deactivate();
        }
        if was_live {
            tool.activate();
        }
        self.tools.insert(id, tool);
    }

    /// Make `id` the active tool.
    ///
    /// The current tool is deactivated first. If `id` is unknown the call
    /// warns and fails, and the previous tool stays deactivated while still
    /// being reported by [`ToolManager::active_tool`].
    pub fn set_active_tool(&mut self, id: &str) -> Result<(), ToolError> {
        if let Some(current) = self.active_mut() {
            current.deactivate();
        }

        let Some(tool) = self.tools.get_mut(id) else {
            warn!(tool = %id, "cannot activate unknown tool");
            return Err(ToolError::UnknownTool(id.to_string()));
        };

        tool.activate();
        self.active = Some(id.to_string());
        self.store.set_current_tool(id);
        debug!(tool = %id, "active tool changed");
        Ok(())
    }

    // --- Queries ---

    /// Id of the active tool, if any.
    #[must_use]
    pub fn active_tool(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// All registered tools, sorted by id.
    #[must_use]
    pub fn tools(&self) -> Vec<&dyn Tool> {
        let mut tools: Vec<&dyn Tool> = self.tools.values().map(|tool| &**tool).collect();
        tools.sort_by(|a, b| a.id().cmp(b.id()));
        tools
    }

    /// Look up a tool by id.
    #[must_use]
    pub fn tool(&self, id: &str) -> Option<&dyn Tool> {
        self.tools.get(id).map(|tool| &**tool)
    }

    // --- Input ---

    pub fn handle_pointer_down(&mut self, point: Point, input: &PointerInput) {
        if let Some(tool) = self.active_mut() {
            tool.handle_pointer_down(point, input);
        }
    }

    pub fn handle_pointer_move(&mut self, point: Point, input: &PointerInput) {
        if let Some(tool) = self.active_mut() {
            tool.handle_pointer_move(point, input);
        }
    }

    pub fn handle_pointer_up(&mut self, point: Point, input: &PointerInput) {
        if let Some(tool) = self.active_mut() {
            tool.handle_pointer_up(point, input);
        }
    }

    pub fn handle_key_down(&mut self, input: &KeyInput) {
        if let Some(tool) = self.active_mut() {
            tool.handle_key_down(input);
        }
    }

    pub fn handle_key_up(&mut self, input: &KeyInput) {
        if let Some(tool) = self.active_mut() {
            tool.handle_key_up(input);
        }
    }

    /// Abort the active tool's gesture.
    pub fn cancel(&mut self) {
        if let Some(tool) = self.active_mut() {
            tool.cancel();
        }
    }

    /// Route one raw input event to the matching handler.
    pub fn dispatch(&mut self, event: &InputEvent) {
        match event {
            InputEvent::PointerDown(point, input) => self.handle_pointer_down(*point, input),
            InputEvent::PointerMove(point, input) => self.handle_pointer_move(*point, input),
            InputEvent::PointerUp(point, input) => self.handle_pointer_up(*point, input),
            InputEvent::KeyDown(input) => self.handle_key_down(input),
            InputEvent::KeyUp(input) => self.handle_key_up(input),
            InputEvent::Cancel => self.cancel(),
        }
    }

    fn active_mut(&mut self) -> Option<&mut Box<dyn Tool>> {
        let id = self.active.as_deref()?;
        self.tools.get_mut(id)
    }
}
