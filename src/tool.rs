//! Uniform tool contract and the factory that builds it from a machine.
//!
//! Every tool the manager knows about implements [`Tool`]. Concrete tools do
//! not implement it by hand: they supply a [`MachineConfig`] and a context and
//! let [`MachineTool`] forward each input method to the machine as an
//! [`Event`]. All behavior lives in the machine configuration.

#[cfg(test)]
#[path = "tool_test.rs"]
mod tool_test;

use crate::event::{Event, KeyInput, PointerInput};
use crate::geometry::Point;
use crate::machine::{Machine, MachineConfig, StateLabel, Step, Subscription};

/// Contract between the manager and each tool.
pub trait Tool {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn icon(&self) -> Option<&str>;
    /// Cursor hint for toolbars; the live cursor is driven by the machine.
    fn cursor(&self) -> Option<&str>;

    fn activate(&mut self);
    fn deactivate(&mut self);
    /// Abort the gesture in progress, if any.
    fn cancel(&mut self);

    /// Name of the current state.
    fn state(&self) -> &'static str;
    /// True in every state except idle, including mid-gesture states.
    fn is_active(&self) -> bool;

    fn handle_pointer_down(&mut self, point: Point, input: &PointerInput);
    fn handle_pointer_move(&mut self, point: Point, input: &PointerInput);
    fn handle_pointer_up(&mut self, point: Point, input: &PointerInput);
    fn handle_key_down(&mut self, input: &KeyInput);
    fn handle_key_up(&mut self, input: &KeyInput);
}

/// Descriptive fields of a tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolMeta {
    pub id: String,
    pub name: String,
    pub icon: Option<String>,
    pub cursor: Option<String>,
}

impl ToolMeta {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), icon: None, cursor: None }
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }
}

/// A [`Tool`] backed by a state machine and the context it owns.
pub struct MachineTool<S, C> {
    meta: ToolMeta,
    machine: Machine<S, C>,
    context: C,
}

impl<S: StateLabel, C> MachineTool<S, C> {
    /// Build the tool and start its machine.
    #[must_use]
    pub fn new(meta: ToolMeta, config: MachineConfig<S, C>, context: C) -> Self {
        let mut machine = Machine::new(config);
        let mut context = context;
        machine.start(&mut context);
        Self { meta, machine, context }
    }

    #[must_use]
    pub fn meta(&self) -> &ToolMeta {
        &self.meta
    }

    #[must_use]
    pub fn machine(&self) -> &Machine<S, C> {
        &self.machine
    }

    #[must_use]
    pub fn context(&self) -> &C {
        &self.context
    }

    #[must_use]
    pub fn current(&self) -> S {
        self.machine.state()
    }

    /// Deliver an event to the machine with this tool's context.
    pub fn send(&mut self, event: &Event) -> Step<S> {
        self.machine.send(&mut self.context, event)
    }

    pub fn subscribe(&self, listener: impl FnMut(S) + 'static) -> Subscription<S> {
        self.machine.subscribe(listener)
    }

    /// Stop the machine; the tool ignores all input afterwards.
    pub fn stop(&mut self) {
        self.machine.stop(&mut self.context);
    }
}

impl<S: StateLabel, C> Tool for MachineTool<S, C> {
    fn id(&self) -> &str {
        &self.meta.id
    }

    fn name(&self) -> &str {
        &self.meta.name
    }

    fn icon(&self) -> Option<&str> {
        self.meta.icon.as_deref()
    }

    fn cursor(&self) -> Option<&str> {
        self.meta.cursor.as_deref()
    }

    fn activate(&mut self) {
        self.send(&Event::Activate);
    }

    fn deactivate(&mut self) {
        self.send(&Event::Deactivate);
    }

    fn cancel(&mut self) {
        self.send(&Event::Cancel);
    }

    fn state(&self) -> &'static str {
        self.machine.state().name()
    }

    fn is_active(&self) -> bool {
        self.machine.state() != S::IDLE
    }

    fn handle_pointer_down(&mut self, point: Point, input: &PointerInput) {
        self.send(&Event::PointerDown { point, input: input.clone() });
    }

    fn handle_pointer_move(&mut self, point: Point, input: &PointerInput) {
        self.send(&Event::PointerMove { point, input: input.clone() });
    }

    fn handle_pointer_up(&mut self, point: Point, input: &PointerInput) {
        self.send(&Event::PointerUp { point, input: input.clone() });
    }

    fn handle_key_down(&mut self, input: &KeyInput) {
        self.send(&Event::KeyDown { key: input.key.clone(), input: input.clone() });
    }

    fn handle_key_up(&mut self, input: &KeyInput) {
        self.send(&Event::KeyUp { key: input.key.clone(), input: input.clone() });
    }
}
