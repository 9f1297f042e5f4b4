//! Data-driven finite-state machine shared by every tool.
//!
//! A [`MachineConfig`] is a static table: for each state, optional entry/exit
//! hooks, an optional parent state, and the transitions keyed by
//! [`EventKind`]. A [`Machine`] walks that table one event at a time. It holds
//! only the current state label, its lifecycle status and its subscribers;
//! all business data lives in the caller-owned context `C`, which is lent to
//! guards, actions and hooks for the duration of one call.
//!
//! ## `send` order
//!
//! 1. Look up `(current, kind)`. Missing entries are ignored.
//! 2. Evaluate the guard; a `false` guard skips everything below.
//! 3. Run the action.
//! 4. If the target is the current state, stop here (no exit, entry or notify).
//! 5. Run exit hooks from the current state outward, up to (not including)
//!    the closest state shared with the target's ancestry.
//! 6. Switch state, run entry hooks from just below that shared state down to
//!    the target, then notify subscribers.
//!
//! Parents let a state act as a superstate: moving between a parent and its
//! children never re-runs the parent's hooks.

#[cfg(test)]
#[path = "machine_test.rs"]
mod machine_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::rc::{Rc, Weak};

use tracing::{debug, trace, warn};

use crate::event::{Event, EventKind};

/// A closed set of state labels for one machine.
pub trait StateLabel: Copy + Eq + Hash + fmt::Debug + 'static {
    /// The resting state; a tool in any other state counts as active.
    const IDLE: Self;

    fn name(self) -> &'static str;
}

/// Entry/exit hook.
pub type Hook<C> = fn(&mut C);
/// Pure predicate deciding whether a transition fires.
pub type Guard<C> = fn(&C, &Event) -> bool;
/// Side effect run when a transition fires, before the state changes.
pub type Action<C> = fn(&mut C, &Event);

/// One transition table entry.
pub struct Transition<S, C> {
    target: S,
    guard: Option<Guard<C>>,
    action: Option<Action<C>>,
}

impl<S: StateLabel, C> Transition<S, C> {
    #[must_use]
    pub fn to(target: S) -> Self {
        Self { target, guard: None, action: None }
    }

    #[must_use]
    pub fn guard(mut self, guard: Guard<C>) -> Self {
        self.guard = Some(guard);
        self
    }

    #[must_use]
    pub fn action(mut self, action: Action<C>) -> Self {
        self.action = Some(action);
        self
    }

    #[must_use]
    pub fn target(&self) -> S {
        self.target
    }
}

impl<S: StateLabel, C> From<S> for Transition<S, C> {
    fn from(target: S) -> Self {
        Self::to(target)
    }
}

/// Hooks, parent and outgoing transitions of one state.
pub struct StateNode<S, C> {
    entry: Option<Hook<C>>,
    exit: Option<Hook<C>>,
    parent: Option<S>,
    on: HashMap<EventKind, Transition<S, C>>,
}

impl<S: StateLabel, C> Default for StateNode<S, C> {
    fn default() -> Self {
        Self { entry: None, exit: None, parent: None, on: HashMap::new() }
    }
}

impl<S: StateLabel, C> StateNode<S, C> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entry(mut self, hook: Hook<C>) -> Self {
        self.entry = Some(hook);
        self
    }

    #[must_use]
    pub fn exit(mut self, hook: Hook<C>) -> Self {
        self.exit = Some(hook);
        self
    }

    /// Nest this state inside `parent`.
    #[must_use]
    pub fn within(mut self, parent: S) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Add a transition for `kind`. A later call for the same kind replaces the earlier one.
    #[must_use]
    pub fn on(mut self, kind: EventKind, transition: impl Into<Transition<S, C>>) -> Self {
        self.on.insert(kind, transition.into());
        self
    }
}

/// Static description of a machine.
pub struct MachineConfig<S, C> {
    id: &'static str,
    initial: S,
    states: HashMap<S, StateNode<S, C>>,
}

impl<S: StateLabel, C> MachineConfig<S, C> {
    /// `id` names the machine in log output.
    #[must_use]
    pub fn new(id: &'static str, initial: S) -> Self {
        Self { id, initial, states: HashMap::new() }
    }

    #[must_use]
    pub fn state(mut self, label: S, node: StateNode<S, C>) -> Self {
        self.states.insert(label, node);
        self
    }

    #[must_use]
    pub fn id(&self) -> &'static str {
        self.id
    }

    #[must_use]
    pub fn initial(&self) -> S {
        self.initial
    }

    fn transition(&self, state: S, kind: EventKind) -> Option<&Transition<S, C>> {
        self.states.get(&state).and_then(|node| node.on.get(&kind))
    }

    /// `state` followed by its ancestors, innermost first.
    fn lineage(&self, state: S) -> Vec<S> {
        let mut chain = vec![state];
        let mut cursor = state;
        // Bounded so a misconfigured parent cycle cannot spin forever.
        while chain.len() <= self.states.len() {
            let Some(parent) = self.states.get(&cursor).and_then(|node| node.parent) else {
                break;
            };
            if chain.contains(&parent) {
                break;
            }
            chain.push(parent);
            cursor = parent;
        }
        chain
    }

    fn run_entry(&self, state: S, ctx: &mut C) {
        if let Some(hook) = self.states.get(&state).and_then(|node| node.entry) {
            hook(ctx);
        }
    }

    fn run_exit(&self, state: S, ctx: &mut C) {
        if let Some(hook) = self.states.get(&state).and_then(|node| node.exit) {
            hook(ctx);
        }
    }
}

/// Lifecycle of a [`Machine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    NotStarted,
    Running,
    Stopped,
}

/// Outcome of one [`Machine::send`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<S> {
    /// The transition fired and the state changed.
    Moved { from: S, to: S },
    /// The transition fired as a self-transition; only its action ran.
    Stayed(S),
    /// A guard rejected the event.
    Blocked,
    /// No transition for this event in the current state.
    Unhandled,
    /// The machine is not running; nothing happened.
    Inert,
}

impl<S> Step<S> {
    /// Whether a transition's action ran.
    #[must_use]
    pub fn fired(&self) -> bool {
        matches!(self, Self::Moved { .. } | Self::Stayed(_))
    }
}

type Listener<S> = Box<dyn FnMut(S)>;

struct Listeners<S> {
    next_id: u64,
    entries: Vec<(u64, Listener<S>)>,
    /// Set while `notify` has the entries checked out.
    notifying: bool,
    /// Ids unsubscribed during the current notification.
    removed: Vec<u64>,
}

/// Handle returned by [`Machine::subscribe`].
///
/// Dropping the handle keeps the listener registered; call
/// [`Subscription::unsubscribe`] to remove it.
pub struct Subscription<S> {
    id: u64,
    listeners: Weak<RefCell<Listeners<S>>>,
}

impl<S> Subscription<S> {
    /// Remove the listener. Has no effect once the machine is stopped or dropped.
    pub fn unsubscribe(self) {
        if let Some(listeners) = self.listeners.upgrade() {
            let mut listeners = listeners.borrow_mut();
            listeners.entries.retain(|(id, _)| *id != self.id);
            if listeners.notifying {
                listeners.removed.push(self.id);
            }
        }
    }
}

/// A running instance of a [`MachineConfig`].
///
/// Listeners may subscribe or unsubscribe from inside a notification. A
/// listener removed mid-notification is skipped if it has not run yet; one
/// added mid-notification first hears the next state change.
pub struct Machine<S, C> {
    config: MachineConfig<S, C>,
    current: S,
    status: Status,
    listeners: Rc<RefCell<Listeners<S>>>,
}

impl<S: StateLabel, C> Machine<S, C> {
    /// Build an unstarted machine sitting in the initial state.
    #[must_use]
    pub fn new(config: MachineConfig<S, C>) -> Self {
        let current = config.initial;
        Self {
            config,
            current,
            status: Status::NotStarted,
            listeners: Rc::new(RefCell::new(Listeners {
                next_id: 0,
                entries: Vec::new(),
                notifying: false,
                removed: Vec::new(),
            })),
        }
    }

    #[must_use]
    pub fn id(&self) -> &'static str {
        self.config.id
    }

    #[must_use]
    pub fn state(&self) -> S {
        self.current
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn matches(&self, state: S) -> bool {
        self.current == state
    }

    /// Enter the initial state and begin accepting events.
    ///
    /// Restarting a stopped machine is not supported: it warns and does nothing.
    pub fn start(&mut self, ctx: &mut C) {
        match self.status {
            Status::NotStarted => {
                self.status = Status::Running;
                self.current = self.config.initial;
                for state in self.config.lineage(self.current).into_iter().rev() {
                    self.config.run_entry(state, ctx);
                }
                debug!(machine = self.config.id, state = self.current.name(), "machine started");
                self.notify();
            }
            Status::Running => {
                trace!(machine = self.config.id, "start ignored; already running");
            }
            Status::Stopped => {
                warn!(machine = self.config.id, "start ignored; machine was stopped and cannot restart");
            }
        }
    }

    /// Exit the current state, drop all subscribers and stop accepting events.
    pub fn stop(&mut self, ctx: &mut C) {
        if self.status == Status::Running {
            for state in self.config.lineage(self.current) {
                self.config.run_exit(state, ctx);
            }
            debug!(machine = self.config.id, state = self.current.name(), "machine stopped");
        }
        self.status = Status::Stopped;
        self.listeners.borrow_mut().entries.clear();
    }

    /// Process one event. See the module docs for the exact order of effects.
    pub fn send(&mut self, ctx: &mut C, event: &Event) -> Step<S> {
        let kind = event.kind();
        if self.status != Status::Running {
            warn!(
                machine = self.config.id,
                event = ?kind,
                status = ?self.status,
                "event sent to a machine that is not running"
            );
            return Step::Inert;
        }

        let from = self.current;
        let Some(transition) = self.config.transition(from, kind) else {
            trace!(machine = self.config.id, state = from.name(), event = ?kind, "no transition");
            return Step::Unhandled;
        };
        let (target, guard, action) = (transition.target, transition.guard, transition.action);

        if let Some(guard) = guard {
            if !guard(ctx, event) {
                trace!(machine = self.config.id, state = from.name(), event = ?kind, "guard rejected event");
                return Step::Blocked;
            }
        }

        if let Some(action) = action {
            action(ctx, event);
        }

        if target == from {
            return Step::Stayed(from);
        }

        let exits = self.config.lineage(from);
        let entries = self.config.lineage(target);
        for state in exits.iter().take_while(|s| !entries.contains(s)) {
            self.config.run_exit(*state, ctx);
        }
        self.current = target;
        let fresh: Vec<S> = entries.iter().take_while(|s| !exits.contains(s)).copied().collect();
        for state in fresh.into_iter().rev() {
            self.config.run_entry(state, ctx);
        }

        debug!(machine = self.config.id, from = from.name(), to = target.name(), event = ?kind, "transition");
        self.notify();
        Step::Moved { from, to: target }
    }

    /// Register `listener`, calling it once right away with the current state.
    pub fn subscribe(&self, listener: impl FnMut(S) + 'static) -> Subscription<S> {
        let mut listener: Listener<S> = Box::new(listener);
        listener(self.current);
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, listener));
        Subscription { id, listeners: Rc::downgrade(&self.listeners) }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }

    fn notify(&self) {
        let state = self.current;
        let mut running = {
            let mut listeners = self.listeners.borrow_mut();
            listeners.notifying = true;
            std::mem::take(&mut listeners.entries)
        };

        // No borrow is held while a listener runs, so it may (un)subscribe.
        for (id, listener) in &mut running {
            if self.listeners.borrow().removed.contains(id) {
                continue;
            }
            listener(state);
        }

        let mut listeners = self.listeners.borrow_mut();
        listeners.notifying = false;
        let removed = std::mem::take(&mut listeners.removed);
        running.retain(|(id, _)| !removed.contains(id));
        running.append(&mut listeners.entries);
        listeners.entries = running;
    }
}
