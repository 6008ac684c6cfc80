//! Batch tool executor with per-call isolation and ordered results.

use std::sync::Arc;
use std::time::Duration;

use cprovider::{ToolCall, ToolDefinition, ToolResult};
use futures_timer::Delay;
use futures_util::StreamExt;
use futures_util::future::{Either, select};
use futures_util::stream;

use crate::{ToolContext, ToolError, ToolFuture, ToolRegistry};

const DEFAULT_WORKER_LIMIT: usize = 4;
const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// Executes batches of requested tool invocations against a registry.
///
/// A failing call never aborts the batch: it yields a `ToolResult` whose
/// content is a short diagnostic string, and the remaining calls proceed.
/// Calls run concurrently up to the worker limit, but the returned results
/// always match the request order.
#[derive(Clone)]
pub struct ToolExecutor {
    registry: Arc<ToolRegistry>,
    worker_limit: usize,
    call_timeout: Duration,
}

impl ToolExecutor {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            worker_limit: DEFAULT_WORKER_LIMIT,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    pub fn with_worker_limit(mut self, worker_limit: usize) -> Self {
        self.worker_limit = worker_limit.max(1);
        self
    }

    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    pub fn registry(&self) -> Arc<ToolRegistry> {
        Arc::clone(&self.registry)
    }

    /// Declarations of every registered tool, for the first gateway call
    /// of a turn.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.registry.definitions()
    }

    /// Executes every requested call, returning one result per request in
    /// request order.
    pub fn execute_all<'a>(
        &'a self,
        tool_calls: Vec<ToolCall>,
        context: &'a ToolContext,
    ) -> ToolFuture<'a, Vec<ToolResult>> {
        Box::pin(async move {
            stream::iter(tool_calls)
                .map(|call| self.execute_one(call, context))
                .buffered(self.worker_limit)
                .collect()
                .await
        })
    }

    async fn execute_one(&self, call: ToolCall, context: &ToolContext) -> ToolResult {
        match self.try_execute(&call, context).await {
            Ok(output) => {
                tracing::debug!(
                    phase = "tooling",
                    event = "call_complete",
                    tool = %call.name,
                    call_id = %call.id,
                    output_len = output.len(),
                );

                ToolResult {
                    tool_call_id: call.id,
                    content: output,
                }
            }
            Err(error) => {
                tracing::warn!(
                    phase = "tooling",
                    event = "call_failed",
                    tool = %call.name,
                    call_id = %call.id,
                    error_kind = ?error.kind,
                    error = %error,
                );

                ToolResult {
                    tool_call_id: call.id,
                    content: format!("tool '{}' failed: {}", call.name, error.message),
                }
            }
        }
    }

    async fn try_execute(
        &self,
        call: &ToolCall,
        context: &ToolContext,
    ) -> Result<String, ToolError> {
        let tool = self.registry.get(&call.name).ok_or_else(|| {
            ToolError::unknown_tool(format!("tool '{}' is not registered", call.name))
                .with_tool_name(call.name.as_str())
        })?;

        let invocation = tool.invoke(&call.arguments, context);
        let deadline = Delay::new(self.call_timeout);

        match select(invocation, deadline).await {
            Either::Left((output, _)) => output,
            Either::Right(((), _)) => Err(ToolError::timeout(format!(
                "tool '{}' timed out after {:?}",
                call.name, self.call_timeout
            ))
            .with_tool_name(call.name.as_str())),
        }
    }
}
