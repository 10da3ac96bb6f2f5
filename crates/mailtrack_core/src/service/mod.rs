//! Core use-case services and the boundary error model.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Define the error kinds the transport boundary maps to status codes.
//!
//! # Invariants
//! - Services never bypass repository persistence contracts.
//! - Every error carries a caller-facing message; kind decides the mapping.

use crate::page::InvalidPageRequest;
use crate::repo::RepoError;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod history_service;
pub mod item_service;
pub mod office_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error classification the transport boundary maps to response statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Caller-supplied identifier or payload is missing or inconsistent.
    InvalidArgument,
    /// A referenced office or item does not exist in the store.
    NotFound,
    /// Unexpected store or mapping failure.
    Internal,
}

impl ErrorKind {
    /// Status code the excluded transport layer responds with.
    pub fn http_status(self) -> u16 {
        match self {
            Self::InvalidArgument => 400,
            Self::NotFound => 404,
            Self::Internal => 500,
        }
    }
}

/// One rejected payload field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Service-level error: a kind plus a caller-facing message.
///
/// All errors are terminal; nothing here is retried.
#[derive(Debug)]
pub enum ServiceError {
    InvalidArgument {
        message: String,
        field_errors: Vec<FieldError>,
    },
    NotFound(String),
    Internal(String),
}

impl ServiceError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
            field_errors: Vec::new(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InvalidArgument { message, .. } => message,
            Self::NotFound(message) | Self::Internal(message) => message,
        }
    }

    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::InvalidArgument { field_errors, .. } => field_errors,
            _ => &[],
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl Error for ServiceError {}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity, id } => {
                Self::NotFound(format!("{entity} with id ({id}) is not found"))
            }
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<InvalidPageRequest> for ServiceError {
    fn from(value: InvalidPageRequest) -> Self {
        Self::invalid_argument(value.to_string())
    }
}

/// Boundary error object; the transport layer serializes this directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub error_kind: ErrorKind,
    pub message: String,
    /// Request description supplied by the boundary, when any.
    pub context: Option<String>,
    pub validation_errors: Vec<FieldError>,
}

impl ErrorResponse {
    pub fn new(error: &ServiceError, context: Option<String>) -> Self {
        Self {
            error_kind: error.kind(),
            message: error.message().to_string(),
            context,
            validation_errors: error.field_errors().to_vec(),
        }
    }
}
