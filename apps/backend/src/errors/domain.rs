//! Domain-level error type used by the game engine and the match store.
//!
//! This error type is transport- and DB-agnostic. The websocket gateway maps it
//! to an `ERROR` envelope through [`ErrorCode`]; HTTP handlers convert it into
//! `crate::error::AppError`.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::errors::ErrorCode;

/// Validation failures raised while applying player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    InvalidChoice,
    RoundNotActive,
    PhaseMismatch,
    MalformedEnvelope,
    UnknownEvent,
    InvalidPayload,
}

/// Domain-level not found entities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Session,
}

/// Domain-level conflict kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    AlreadyQueued,
    AlreadyInSession,
    NotInSession,
}

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    DbUnavailable,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input validation or game rule violation
    Validation(ValidationKind, String),
    /// The connection's current location forbids the request
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// Human-readable message suitable for an `ERROR` envelope.
    pub fn message(&self) -> &str {
        match self {
            DomainError::Validation(_, d)
            | DomainError::Conflict(_, d)
            | DomainError::NotFound(_, d)
            | DomainError::Infra(_, d) => d,
        }
    }

    /// Wire code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::Validation(kind, _) => match kind {
                ValidationKind::InvalidChoice => ErrorCode::InvalidChoice,
                ValidationKind::RoundNotActive | ValidationKind::PhaseMismatch => {
                    ErrorCode::RoundNotActive
                }
                ValidationKind::MalformedEnvelope => ErrorCode::MalformedEnvelope,
                ValidationKind::UnknownEvent => ErrorCode::UnknownEvent,
                ValidationKind::InvalidPayload => ErrorCode::InvalidPayload,
            },
            DomainError::Conflict(kind, _) => match kind {
                ConflictKind::AlreadyQueued => ErrorCode::AlreadyQueued,
                ConflictKind::AlreadyInSession => ErrorCode::AlreadyInSession,
                ConflictKind::NotInSession => ErrorCode::NotInSession,
            },
            DomainError::NotFound(kind, _) => match kind {
                NotFoundKind::Session => ErrorCode::SessionNotFound,
            },
            DomainError::Infra(_, _) => ErrorCode::InternalError,
        }
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        match e {
            sea_orm::DbErr::Conn(_) | sea_orm::DbErr::ConnectionAcquire(_) => {
                DomainError::infra(InfraErrorKind::DbUnavailable, e.to_string())
            }
            other => DomainError::infra(InfraErrorKind::Other("db".into()), other.to_string()),
        }
    }
}
