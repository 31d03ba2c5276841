//! Error taxonomy for resource reporting.

use std::fmt::Display;

use thiserror::Error;

/// Errors that terminate a reporting invocation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A required argument is missing or invalid.
    #[error("usage error: {message}")]
    Usage {
        /// Description of the offending argument.
        message: String,
    },

    /// No container with exactly this name exists in the runtime.
    #[error("container not found: '{name}'")]
    ContainerNotFound {
        /// Name that was looked up.
        name: String,
    },

    /// The runtime could not be reached or returned malformed data.
    #[error("{backend} runtime unavailable: {message}")]
    RuntimeUnavailable {
        /// Backend that failed.
        backend: &'static str,
        /// Raw underlying error text.
        message: String,
    },
}

impl ReportError {
    /// Build a usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    /// Build a not-found error for `name`.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::ContainerNotFound { name: name.into() }
    }

    /// Build a runtime error carrying the raw cause.
    pub fn unavailable(backend: &'static str, message: impl Display) -> Self {
        Self::RuntimeUnavailable {
            backend,
            message: message.to_string(),
        }
    }
}

/// Render an error together with its whole source chain.
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ReportError>;
