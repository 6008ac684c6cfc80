//! Secret value wrapper and environment-based credential loading.

use crate::GatewayError;

/// API credential that never appears in `Debug` output and is zeroed
/// when dropped.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretString {
    value: String,
}

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn expose(&self) -> &str {
        self.value.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Drop for SecretString {
    fn drop(&mut self) {
        unsafe {
            self.value.as_mut_vec().fill(0);
        }
    }
}

/// Reads a required API key from the environment.
pub fn api_key_from_env(variable: &str) -> Result<SecretString, GatewayError> {
    let value = std::env::var(variable).map_err(|_| {
        GatewayError::authentication(format!("missing required environment variable: {variable}"))
    })?;

    if value.trim().is_empty() {
        return Err(GatewayError::authentication(format!(
            "environment variable {variable} is empty"
        )));
    }

    Ok(SecretString::new(value))
}
