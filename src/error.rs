//! Unified error types for license-scanner.
//!
//! Only input-contract violations and local I/O failures surface as errors.
//! Problems talking to the hosting service are caught inside the lookup layer
//! and turned into an `Unavailable` outcome, so [`LookupErrorKind`] never
//! reaches a caller of the aggregator.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for license-scanner operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ScanError {
    /// A source driver or an inventory file broke the input contract
    #[error("Invalid input: {context}")]
    Input {
        context: String,
        #[source]
        source: InputErrorKind,
    },

    /// The license list could not be loaded
    #[error("License registry error: {context}")]
    Registry {
        context: String,
        #[source]
        source: RegistryErrorKind,
    },

    /// Errors from the hosting-service client
    #[error("License lookup failed: {context}")]
    Lookup {
        context: String,
        #[source]
        source: LookupErrorKind,
    },

    /// Errors during report generation
    #[error("Report generation failed: {0}")]
    Report(String),

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific input error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum InputErrorKind {
    #[error("Missing required field: {field} in {context}")]
    MissingField { field: String, context: String },

    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Unexpected document shape: {0}")]
    UnexpectedShape(String),
}

/// Specific registry error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RegistryErrorKind {
    #[error("License list is empty")]
    Empty,

    #[error("Duplicate license id: {0}")]
    DuplicateId(String),

    #[error("Invalid license list: {0}")]
    InvalidList(String),
}

/// Specific lookup error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LookupErrorKind {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for license-scanner operations
pub type Result<T> = std::result::Result<T, ScanError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl ScanError {
    /// Create an input error with context
    pub fn input(context: impl Into<String>, source: InputErrorKind) -> Self {
        Self::Input {
            context: context.into(),
            source,
        }
    }

    /// Create an input error for a missing field
    pub fn missing_field(field: impl Into<String>, context: impl Into<String>) -> Self {
        Self::input(
            "missing required field",
            InputErrorKind::MissingField {
                field: field.into(),
                context: context.into(),
            },
        )
    }

    /// Create an input error for a document with the wrong shape
    pub fn unexpected_shape(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::input(context, InputErrorKind::UnexpectedShape(message.into()))
    }

    /// Create a registry error
    pub fn registry(context: impl Into<String>, source: RegistryErrorKind) -> Self {
        Self::Registry {
            context: context.into(),
            source,
        }
    }

    /// Create a lookup error
    pub fn lookup(context: impl Into<String>, source: LookupErrorKind) -> Self {
        Self::Lookup {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a report error
    pub fn report(message: impl Into<String>) -> Self {
        Self::Report(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for ScanError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for ScanError {
    fn from(err: serde_json::Error) -> Self {
        Self::input(
            "JSON deserialization",
            InputErrorKind::InvalidJson(err.to_string()),
        )
    }
}

impl From<std::fmt::Error> for ScanError {
    fn from(err: std::fmt::Error) -> Self {
        Self::report(err.to_string())
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are chained, outermost first, so a failure deep inside a
/// source driver reads like `scanning manual-licenses.json: missing required
/// field`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<ScanError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: ScanError, new_ctx: &str) -> ScanError {
    match err {
        ScanError::Input {
            context: existing,
            source,
        } => ScanError::Input {
            context: chain_context(new_ctx, &existing),
            source,
        },
        ScanError::Registry {
            context: existing,
            source,
        } => ScanError::Registry {
            context: chain_context(new_ctx, &existing),
            source,
        },
        ScanError::Lookup {
            context: existing,
            source,
        } => ScanError::Lookup {
            context: chain_context(new_ctx, &existing),
            source,
        },
        ScanError::Io {
            path,
            message,
            source,
        } => ScanError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        ScanError::Report(msg) => ScanError::Report(chain_context(new_ctx, &msg)),
        ScanError::Config(msg) => ScanError::Config(chain_context(new_ctx, &msg)),
        ScanError::Validation(msg) => ScanError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
