//! Error types for the matterfold library
//!
//! Parsing, merging and delete-list folding never fail: malformed input is
//! skipped rather than reported. The errors here come from the layers around
//! that core: configuration, template loading, and file I/O.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for all library operations
#[derive(Error, Debug)]
pub enum MatterFoldError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML errors while reading settings
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Regular expression errors
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// File not found or invalid path
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// A mapped template could not be resolved to content
    #[error("Template not found: {path}")]
    TemplateNotFound { path: String },

    /// No folder in the document's ancestry maps to a template
    #[error("No template configured for {path}")]
    NoTemplateConfigured { path: String },

    /// Templates were configured, but none of them could be loaded
    #[error("No templates could be loaded for {path} ({attempted} attempted)")]
    NoTemplatesLoaded { path: String, attempted: usize },

    /// Settings file is structurally valid YAML but semantically wrong
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Path resolution errors
    #[error("Path resolution error: {reason}")]
    PathResolution { reason: String },

    /// Generic validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Multiple errors (for batch operations)
    #[error("{} errors occurred", errors.len())]
    Multiple { errors: Vec<MatterFoldError> },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, MatterFoldError>;

impl MatterFoldError {
    /// Create a new file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a new template not found error
    pub fn template_not_found(path: impl Into<String>) -> Self {
        Self::TemplateNotFound { path: path.into() }
    }

    /// Create an error for a document with no mapped template anywhere in its ancestry
    pub fn no_template_configured(path: impl Into<String>) -> Self {
        Self::NoTemplateConfigured { path: path.into() }
    }

    /// Create an error for a chain whose every item failed to load
    pub fn no_templates_loaded(path: impl Into<String>, attempted: usize) -> Self {
        Self::NoTemplatesLoaded {
            path: path.into(),
            attempted,
        }
    }

    /// Create a new invalid configuration error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create a new path resolution error
    pub fn path_resolution(reason: impl Into<String>) -> Self {
        Self::PathResolution {
            reason: reason.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a multiple errors wrapper
    pub fn multiple(errors: Vec<MatterFoldError>) -> Self {
        Self::Multiple { errors }
    }

    /// Check if this error is recoverable
    ///
    /// Unrecoverable errors are the ones a retry on the same input cannot fix.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(io_err) => !matches!(
                io_err.kind(),
                std::io::ErrorKind::NotFound
                    | std::io::ErrorKind::PermissionDenied
                    | std::io::ErrorKind::AlreadyExists
            ),
            Self::FileNotFound { .. } | Self::InvalidConfig { .. } | Self::Yaml(_) => false,
            Self::TemplateNotFound { .. }
            | Self::NoTemplateConfigured { .. }
            | Self::NoTemplatesLoaded { .. }
            | Self::PathResolution { .. }
            | Self::Validation { .. }
            | Self::Regex(_) => true,
            Self::Multiple { errors } => errors.iter().any(|e| e.is_recoverable()),
        }
    }

    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::FileNotFound { .. } | Self::InvalidConfig { .. } => ErrorSeverity::Critical,
            Self::Yaml(_) | Self::NoTemplatesLoaded { .. } => ErrorSeverity::High,
            Self::TemplateNotFound { .. } | Self::Regex(_) => ErrorSeverity::Medium,
            Self::NoTemplateConfigured { .. }
            | Self::Validation { .. }
            | Self::PathResolution { .. } => ErrorSeverity::Low,
            Self::Multiple { errors } => errors
                .iter()
                .map(|e| e.severity())
                .max()
                .unwrap_or(ErrorSeverity::Low),
            Self::Io(_) => ErrorSeverity::Medium,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}
