//! Gateway error kinds and error value helpers.
//!
//! ```rust
//! use cprovider::GatewayError;
//!
//! let auth = GatewayError::authentication("bad key");
//! assert!(!auth.retryable);
//!
//! let limited = GatewayError::rate_limited("slow down");
//! assert!(limited.retryable);
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorKind {
    Authentication,
    RateLimited,
    Unavailable,
    Timeout,
    Transport,
    Malformed,
    InvalidRequest,
}

/// Typed failure surfaced by a completion gateway call.
///
/// `retryable` is guidance for the caller only; the gateway itself never
/// retries a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayError {
    pub kind: GatewayErrorKind,
    pub message: String,
    pub retryable: bool,
}

impl GatewayError {
    pub fn new(kind: GatewayErrorKind, message: impl Into<String>, retryable: bool) -> Self {
        Self {
            kind,
            message: message.into(),
            retryable,
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Authentication, message, false)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::RateLimited, message, true)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Unavailable, message, true)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Timeout, message, true)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Transport, message, true)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Malformed, message, false)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::InvalidRequest, message, false)
    }

    pub fn is_retryable(&self) -> bool {
        self.retryable
    }
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for GatewayError {}
