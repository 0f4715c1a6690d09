//! Shared error type across OKAPI crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Method name is not in the catalogue.
    UnknownMethod,
    /// Method exists but its handler cannot describe itself.
    MisconfiguredHandler,
    /// Request lacks the consumer/token required by the method's auth level.
    AuthPrecondition,
    /// Documentation resource is absent.
    MissingDocumentation,
    /// Invalid input.
    BadRequest,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::UnknownMethod => "UNKNOWN_METHOD",
            ClientCode::MisconfiguredHandler => "MISCONFIGURED_HANDLER",
            ClientCode::AuthPrecondition => "AUTH_PRECONDITION",
            ClientCode::MissingDocumentation => "MISSING_DOCUMENTATION",
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, OkapiError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum OkapiError {
    #[error("method does not exist: '{0}'")]
    UnknownMethod(String),
    #[error("method '{method}' has a misconfigured handler: {reason}")]
    MisconfiguredHandler { method: String, reason: String },
    #[error("method '{method}' called with mismatched request: {reason}")]
    AuthPrecondition { method: String, reason: String },
    #[error("missing documentation file: {0}")]
    MissingDocumentation(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("storage: {0}")]
    Storage(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl OkapiError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            OkapiError::UnknownMethod(_) => ClientCode::UnknownMethod,
            OkapiError::MisconfiguredHandler { .. } => ClientCode::MisconfiguredHandler,
            OkapiError::AuthPrecondition { .. } => ClientCode::AuthPrecondition,
            OkapiError::MissingDocumentation(_) => ClientCode::MissingDocumentation,
            OkapiError::BadRequest(_) => ClientCode::BadRequest,
            OkapiError::Storage(_) | OkapiError::Internal(_) => ClientCode::Internal,
        }
    }
}
