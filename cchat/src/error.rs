//! Chat-layer errors and classification.

use std::error::Error;
use std::fmt::{Display, Formatter};

use cprovider::GatewayError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatErrorKind {
    InvalidRequest,
    Gateway,
    Store,
}

/// A turn-level failure surfaced to the session boundary.
///
/// Gateway failures keep the originating [`GatewayError`] attached so the
/// caller can distinguish rate limiting from authentication problems and
/// decide whether a resubmission is worth attempting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatError {
    pub kind: ChatErrorKind,
    pub message: String,
    pub gateway: Option<GatewayError>,
}

impl ChatError {
    pub fn new(kind: ChatErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            gateway: None,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::InvalidRequest, message)
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Store, message)
    }
}

impl Display for ChatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ChatError {}

impl From<GatewayError> for ChatError {
    fn from(value: GatewayError) -> Self {
        Self {
            kind: ChatErrorKind::Gateway,
            message: value.message.clone(),
            gateway: Some(value),
        }
    }
}
