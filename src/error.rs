//! Error types for onlysaidkb-mcp.
//!
//! Library code returns these typed errors; only the transport layer and the
//! binary collapse them into `anyhow` or process exit codes. Backend failures
//! never leave the tool boundary as errors: the adapter turns them into
//! [`crate::adapter::ToolOutcome::Failure`] values.

use thiserror::Error;

/// Crate-level result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A backend request failed.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// A CLI command failed.
    #[error(transparent)]
    Command(#[from] CommandError),
}

/// Errors raised while resolving [`crate::config::KbConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more required settings are absent or empty.
    #[error("Missing required environment variables: {}", names.join(", "))]
    MissingVariables {
        /// Names of the missing variables, in declaration order.
        names: Vec<&'static str>,
    },

    /// A setting is present but cannot be used.
    #[error("Invalid value for {name}: {value:?} ({reason})")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// Raw value as found.
        value: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}

/// Errors raised by [`crate::backend::BackendClient`].
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend answered with a 4xx or 5xx status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Numeric HTTP status.
        status: u16,
        /// Raw response body text.
        body: String,
    },

    /// Building the client, sending the request or reading the body failed
    /// (connection refused, DNS, timeout). Displays the whole cause chain.
    #[error("{}", with_causes(.0))]
    Request(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("Invalid JSON response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response was JSON but not of the expected shape.
    #[error("Unexpected response shape: expected {expected}")]
    UnexpectedShape {
        /// Description of the expected shape.
        expected: &'static str,
    },
}

impl BackendError {
    /// Returns the HTTP status for [`BackendError::Status`], `None` otherwise.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// reqwest's top-level message hides the cause (refused, timed out, DNS).
fn with_causes(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Errors raised by CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The command could not complete.
    #[error("{0}")]
    ExecutionFailed(String),
}
