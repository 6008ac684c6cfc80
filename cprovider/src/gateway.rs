//! Completion gateway trait shared by provider adapters and test fakes.

use ccommon::BoxFuture;

use crate::{Completion, CompletionRequest, GatewayError};

pub type GatewayFuture<'a, T> = BoxFuture<'a, T>;

/// Sends one conversation snapshot to a hosted completion provider and
/// returns the normalized result.
///
/// Implementations must treat an empty `tools` list on the request as
/// "tool use disabled" and must never retry on their own.
pub trait CompletionGateway: Send + Sync {
    fn complete<'a>(
        &'a self,
        request: CompletionRequest,
    ) -> GatewayFuture<'a, Result<Completion, GatewayError>>;
}
