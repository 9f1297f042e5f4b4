//! Tool interaction state machine for a shape-drawing canvas.
//!
//! This crate owns the interaction side of the canvas tools: a data-driven
//! finite-state machine, the select and rectangle tools built on it, and the
//! manager that routes raw pointer/keyboard input to the single active tool.
//! Rendering, persistence and hit-testing against the DOM belong to the host,
//! which plugs in through the [`store::ShapeStore`] and [`cursor::CursorSink`]
//! ports.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`machine`] | Generic state machine engine and its configuration builder |
//! | [`tool`] | Uniform [`tool::Tool`] contract and the machine-backed factory |
//! | [`tools`] | Rectangle and select tool configurations |
//! | [`manager`] | Tool registry and input dispatch |
//! | [`event`] | Event enum, raw input payloads and modifier keys |
//! | [`shape`] | Shape record and sparse patch type |
//! | [`store`] | Store port and the in-memory reference store |
//! | [`cursor`] | Cursor port and its no-op/recording sinks |
//! | [`geometry`] | Points and axis-aligned bounds |
//! | [`config`] | Tool defaults loaded from the environment |
//! | [`error`] | Crate error type |
//!
//! Everything here is single-threaded and synchronous. Hosts that receive
//! input on several threads must funnel it through one queue before it
//! reaches the [`manager::ToolManager`].

pub mod config;
pub mod cursor;
pub mod error;
pub mod event;
pub mod geometry;
pub mod machine;
pub mod manager;
pub mod shape;
pub mod store;
pub mod tool;
pub mod tools;

pub use config::ToolConfig;
pub use error::ToolError;
pub use event::{Event, EventKind, InputEvent, KeyInput, Modifiers, PointerInput};
pub use geometry::{Bounds, Point};
pub use machine::{Machine, MachineConfig, StateLabel, StateNode, Step, Subscription, Transition};
pub use manager::ToolManager;
pub use tool::{MachineTool, Tool, ToolMeta};
