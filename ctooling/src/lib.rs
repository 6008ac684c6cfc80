//! Capability layer for registering and executing tools.

pub mod args;
pub mod builtins;
mod error;
mod executor;
mod registry;
mod tool;
mod types;

pub mod prelude {
    pub use crate::{
        FunctionTool, Tool, ToolContext, ToolError, ToolErrorKind, ToolExecutor, ToolFuture,
        ToolRegistry,
    };
}

pub use args::{optional_count, optional_string, parse_object, required_string};
pub use error::{ToolError, ToolErrorKind};
pub use executor::ToolExecutor;
pub use registry::ToolRegistry;
pub use tool::{FunctionTool, Tool, ToolFuture, ToolHandler};
pub use types::ToolContext;
