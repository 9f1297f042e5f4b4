//! Crate error type.
//!
//! Only configuration problems surface as errors. Lifecycle misuse (sending to
//! a machine that is not running) is reported as a warning plus an inert
//! [`crate::machine::Step`], and missing gesture context is never reported.

/// Error returned by [`crate::manager::ToolManager`] and [`crate::config::ToolConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolError {
    /// `set_active_tool` named an id that was never registered.
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    /// A configuration value could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(String),
}
