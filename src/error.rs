use crate::client::FailureKind;
use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g., "submission.rating", "REVIEW_AI_ENDPOINT")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected range, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "submission_validator", "memory_store")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the review enrichment pipeline.
///
/// Only `Validation` and `Storage` are expected to reach callers of the service layer;
/// `AiUnavailable` is absorbed by the orchestrator and replaced with fallback content.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("AI unavailable after {attempts} attempt(s): {message}{}", format_last_failure(.last_failure))]
    AiUnavailable {
        message: String,
        attempts: u32,
        last_failure: Option<FailureKind>,
    },

    #[error("Storage error: {message}{}", format_context(.context))]
    Storage {
        message: String,
        context: ErrorContext,
    },

    #[error("Network transport error: {0}")]
    Transport(#[from] crate::transport::TransportError),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

fn format_last_failure(last: &Option<FailureKind>) -> String {
    match last {
        Some(kind) => format!(" (last failure: {})", kind),
        None => String::new(),
    }
}

impl Error {
    /// Create a new validation error with structured context
    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Create a new storage error with structured context
    pub fn storage_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Storage {
            message: msg.into(),
            context,
        }
    }

    /// The backend could not be used at all (e.g. no credential configured).
    pub fn ai_unavailable(msg: impl Into<String>) -> Self {
        Error::AiUnavailable {
            message: msg.into(),
            attempts: 0,
            last_failure: None,
        }
    }

    /// The retry budget was spent; `attempts` counts every request actually sent.
    pub fn retries_exhausted(attempts: u32, last_failure: FailureKind) -> Self {
        Error::AiUnavailable {
            message: "retries exhausted".to_string(),
            attempts,
            last_failure: Some(last_failure),
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. }
            | Error::Validation { context, .. }
            | Error::Storage { context, .. } => Some(context),
            _ => None,
        }
    }

    pub fn is_ai_unavailable(&self) -> bool {
        matches!(self, Error::AiUnavailable { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, Error::Storage { .. })
    }
}
