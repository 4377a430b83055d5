//! Mimir error types

use serde::Serialize;

/// Mimir error types
#[derive(Debug, thiserror::Error)]
pub enum MimirError {
    // Request validation errors
    #[error("missing required parameter(s): {}", .0.join(", "))]
    MissingParameter(Vec<String>),

    #[error("text must not be blank")]
    BlankText,

    #[error("invalid content type: expected {expected}, got {actual}")]
    InvalidContentType {
        expected: &'static str,
        actual: String,
    },

    #[error("invalid JSON body: {0}")]
    InvalidJsonBody(String),

    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },

    // Resolution errors
    #[error("language could not be resolved: no language given and no language detector loaded")]
    LanguageUnresolved,

    #[error("language not supported: {0}")]
    LanguageNotSupported(String),

    #[error("invalid domain: {0}")]
    InvalidDomain(String),

    // Startup errors
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A capability declares a key whose auxiliary resource was not supplied,
    /// or an auxiliary resource names a key the capability does not have.
    #[error("missing auxiliary resource '{resource}' for key {key} of capability '{capability}'")]
    MissingAuxiliaryResource {
        capability: &'static str,
        resource: &'static str,
        key: String,
    },

    // Model / runtime errors
    #[error("model error: {0}")]
    Model(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Error taxonomy shared by every command.
///
/// Each [`MimirError`] belongs to exactly one kind; the kind alone decides
/// the HTTP status of the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    LanguageUnresolved,
    LanguageNotSupported,
    InvalidDomain,
    MissingAuxiliaryResource,
    Internal,
}

impl ErrorKind {
    /// HTTP status code for this kind.
    pub fn status(self) -> u16 {
        match self {
            Self::Validation
            | Self::LanguageUnresolved
            | Self::LanguageNotSupported
            | Self::InvalidDomain => 400,
            Self::MissingAuxiliaryResource | Self::Internal => 500,
        }
    }

    /// Stable snake_case name used in response bodies and metric labels.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::LanguageUnresolved => "language_unresolved",
            Self::LanguageNotSupported => "language_not_supported",
            Self::InvalidDomain => "invalid_domain",
            Self::MissingAuxiliaryResource => "missing_auxiliary_resource",
            Self::Internal => "internal",
        }
    }
}

impl MimirError {
    /// Classify this error into the shared taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingParameter(_)
            | Self::BlankText
            | Self::InvalidContentType { .. }
            | Self::InvalidJsonBody(_)
            | Self::InvalidParameter { .. } => ErrorKind::Validation,
            Self::LanguageUnresolved => ErrorKind::LanguageUnresolved,
            Self::LanguageNotSupported(_) => ErrorKind::LanguageNotSupported,
            Self::InvalidDomain(_) => ErrorKind::InvalidDomain,
            Self::MissingAuxiliaryResource { .. } => ErrorKind::MissingAuxiliaryResource,
            Self::Configuration(_)
            | Self::Model(_)
            | Self::Io(_)
            | Self::Json(_)
            | Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// HTTP status code for this error.
    pub fn status(&self) -> u16 {
        self.kind().status()
    }

    /// Whether the caller can correct this error by changing the request.
    pub fn is_client_error(&self) -> bool {
        self.status() < 500
    }

    /// Shorthand for a missing single parameter.
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingParameter(vec![name.into()])
    }

    /// Shorthand for an invalid parameter value.
    pub fn invalid(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for Mimir operations
pub type Result<T> = std::result::Result<T, MimirError>;
