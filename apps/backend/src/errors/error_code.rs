//! Reason codes for rejected actions and HTTP problem documents.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear on the wire.

use core::fmt;

use serde::{Serialize, Serializer};

use super::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Match rules
    /// Wrong turn or wrong phase
    IllegalAction,
    /// Out-of-range slot or unknown player id
    InvalidTarget,
    /// All seats are taken
    MatchFull,
    /// The match has not started (or has already ended)
    MatchNotStarted,
    /// The special card or stackable slot no longer applies
    AlreadyResolved,
    /// A stack attempt failed on rank; the penalty was applied
    RankMismatch,

    // Transport
    /// Malformed or unexpected client message
    BadRequest,

    // System Errors
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::IllegalAction => "ILLEGAL_ACTION",
            Self::InvalidTarget => "INVALID_TARGET",
            Self::MatchFull => "MATCH_FULL",
            Self::MatchNotStarted => "MATCH_NOT_STARTED",
            Self::AlreadyResolved => "ALREADY_RESOLVED",
            Self::RankMismatch => "RANK_MISMATCH",

            Self::BadRequest => "BAD_REQUEST",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl From<&DomainError> for ErrorCode {
    fn from(err: &DomainError) -> Self {
        match err {
            DomainError::Validation(kind, _) => match kind {
                ValidationKind::PhaseMismatch => ErrorCode::MatchNotStarted,
                ValidationKind::InvalidSlot
                | ValidationKind::EmptySlot
                | ValidationKind::InvalidTarget
                | ValidationKind::MissingParams
                | ValidationKind::ParseCard => ErrorCode::InvalidTarget,
                ValidationKind::OutOfTurn
                | ValidationKind::AlreadyStarted
                | ValidationKind::MatchEnded
                | ValidationKind::AlreadyDrawn
                | ValidationKind::NoDrawnCard
                | ValidationKind::DrawnCardPending
                | ValidationKind::SpecialCardPending
                | ValidationKind::GiveBackPending
                | ValidationKind::AlreadySeated
                | ValidationKind::NotEnoughPlayers
                | ValidationKind::Other(_) => ErrorCode::IllegalAction,
            },
            DomainError::Conflict(kind, _) => match kind {
                ConflictKind::MatchFull => ErrorCode::MatchFull,
                ConflictKind::SpecialResolved
                | ConflictKind::StackResolved
                | ConflictKind::NothingToGive
                | ConflictKind::Other(_) => ErrorCode::AlreadyResolved,
            },
            DomainError::NotFound(kind, _) => match kind {
                NotFoundKind::Player | NotFoundKind::Other(_) => ErrorCode::InvalidTarget,
                NotFoundKind::Match => ErrorCode::MatchNotStarted,
            },
        }
    }
}
