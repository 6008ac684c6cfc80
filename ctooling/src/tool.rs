//! Tool trait contract for registry-managed capabilities.
//!
//! ```rust
//! use cprovider::ToolDefinition;
//! use ctooling::{FunctionTool, Tool};
//!
//! let tool = FunctionTool::new(
//!     ToolDefinition {
//!         name: "echo".to_string(),
//!         description: "Echoes input".to_string(),
//!         parameters: r#"{"type":"object"}"#.to_string(),
//!     },
//!     |args, _ctx| async move { Ok(args) },
//! );
//!
//! assert_eq!(tool.definition().name, "echo");
//! ```

use std::future::Future;
use std::sync::Arc;

use ccommon::BoxFuture;
use cprovider::ToolDefinition;

use crate::{ToolContext, ToolError};

pub type ToolFuture<'a, T> = BoxFuture<'a, T>;

/// A named, schema-described capability the model may request.
///
/// `invoke` receives the model's serialized arguments untouched and returns
/// formatted text ready to re-enter the conversation; structured vendor
/// data never crosses this boundary.
pub trait Tool: Send + Sync {
    fn definition(&self) -> ToolDefinition;

    fn invoke<'a>(
        &'a self,
        args_json: &'a str,
        context: &'a ToolContext,
    ) -> ToolFuture<'a, Result<String, ToolError>>;
}

pub type ToolHandler =
    dyn Fn(String, ToolContext) -> ToolFuture<'static, Result<String, ToolError>> + Send + Sync;

/// Closure-backed [`Tool`] for lightweight registrations and test stubs.
pub struct FunctionTool {
    definition: ToolDefinition,
    handler: Arc<ToolHandler>,
}

impl FunctionTool {
    pub fn new<F, Fut>(definition: ToolDefinition, handler: F) -> Self
    where
        F: Fn(String, ToolContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, ToolError>> + Send + 'static,
    {
        let handler: Arc<ToolHandler> =
            Arc::new(move |args_json, context| Box::pin(handler(args_json, context)));

        Self {
            definition,
            handler,
        }
    }
}

impl Tool for FunctionTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    fn invoke<'a>(
        &'a self,
        args_json: &'a str,
        context: &'a ToolContext,
    ) -> ToolFuture<'a, Result<String, ToolError>> {
        let args_json = args_json.to_string();
        let context = context.clone();
        (self.handler)(args_json, context)
    }
}
