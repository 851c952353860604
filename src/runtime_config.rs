//! # Runtime Configuration Module
//!
//! Environment variable-based configuration for runtime behavior.
//!
//! ## Environment Variables
//!
//! ### `DARTER_STACK_SIZE`
//!
//! Stack size for the server's coroutines, in decimal (`32768`) or
//! hexadecimal (`0x8000`). Default: `0x8000` (32 KB).
//!
//! ### `DARTER_HOST`
//!
//! Host name used only to construct an absolute URL when splitting the
//! request target into path and query. It does not affect socket binding.
//! Default: `localhost`.

/// Default coroutine stack size (32 KB)
pub const DEFAULT_STACK_SIZE: usize = 0x8000;

/// Runtime configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Coroutine stack size in bytes
    pub stack_size: usize,
    /// Host used for request-target parsing
    pub host: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            stack_size: DEFAULT_STACK_SIZE,
            host: "localhost".to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for unset or unparseable values.
    #[must_use]
    pub fn from_env() -> Self {
        let stack_size = std::env::var("DARTER_STACK_SIZE")
            .ok()
            .and_then(|v| parse_stack_size(&v))
            .unwrap_or(DEFAULT_STACK_SIZE);
        let host = std::env::var("DARTER_HOST").unwrap_or_else(|_| "localhost".to_string());
        Self { stack_size, host }
    }
}

fn parse_stack_size(value: &str) -> Option<usize> {
    if let Some(hex) = value.strip_prefix("0x") {
        usize::from_str_radix(hex, 16).ok()
    } else {
        value.parse().ok()
    }
}
