//! Domain-level error types.
//!
//! These errors are transport agnostic. The presentation layer maps them to
//! dialogs, toasts, or any other caller-facing envelope. Persistence
//! degradation is deliberately absent from this taxonomy: store failures are
//! logged and the in-memory state stays authoritative (see
//! [`crate::engine::Engine`]).

use serde::{Deserialize, Serialize};

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Operation preconditions were unmet or the input fails validation.
    InvalidRequest,
    /// The operation requires an active session user and none exists.
    Unauthorized,
    /// The referenced entity does not exist.
    NotFound,
    /// An external collaborator (payment, recommendation) failed.
    CollaboratorFailure,
    /// An unexpected error occurred inside the engine.
    InternalError,
}

/// Engine error payload surfaced to callers as a rejected operation.
///
/// ## Invariants
/// - The in-memory state is unchanged whenever an operation returns this
///   type; no operation partially commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    code: ErrorCode,
    message: String,
}

impl Error {
    /// Create a new error from a code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to the caller.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::CollaboratorFailure`].
    pub fn collaborator(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::CollaboratorFailure, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
