//! Domain-level error type used across the match engine and the registry.
//!
//! This error type is transport-agnostic. The registry converts it into
//! `AppError` through `From<DomainError> for AppError` before anything
//! reaches a socket or an HTTP response.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Why a well-formed intent was refused by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    PhaseMismatch,
    OutOfTurn,
    CardNotInHand,
    MatchNotFull,
    SeatsNotReady,
    EscalationPending,
    NoEscalationPending,
    StakeAtMaximum,
    OwnTeamResponse,
    RoundNotDecided,
    SeatTokenMismatch,
    InvalidDisplayName,
    ParseCard,
    EmptyTrick,
    Other(String),
}

/// Capacity and identity conflicts around seats.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    MatchFull,
    MatchInProgress,
    DuplicateDisplayName,
    AlreadySeated,
    SeatStillConnected,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Match,
    Seat,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Intent violates a rule or precondition of the current state
    Validation(ValidationKind, String),
    /// Capacity or identity conflict
    Conflict(ConflictKind, String),
    /// Intent references something the match does not hold
    NotFound(NotFoundKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
}
