//! Domain-level error type used across the match engine and its services.
//!
//! This error type is transport-agnostic. The websocket layer turns it into an
//! `action_rejected` notification and the HTTP layer into a problem document,
//! both through [`crate::errors::ErrorCode`].

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Rule violations: the action is not legal in the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Someone other than the current player tried a turn-bound action.
    OutOfTurn,
    /// The match is still waiting for players.
    PhaseMismatch,
    /// Join or start after the match has begun.
    AlreadyStarted,
    /// The round is over; only snapshots remain.
    MatchEnded,
    /// The player already drew during this rotation.
    AlreadyDrawn,
    /// The action needs a drawn card and none is pending.
    NoDrawnCard,
    /// The drawn card must be discarded or swapped first.
    DrawnCardPending,
    /// A 7/8/9 effect must be used or skipped first.
    SpecialCardPending,
    /// The actor owes a replacement card to a stacked opponent.
    GiveBackPending,
    /// The player is already seated in this match.
    AlreadySeated,
    /// Fewer than two seated players.
    NotEnoughPlayers,
    /// Slot index outside the hand (or outside the grid where required).
    InvalidSlot,
    /// Slot exists but holds no card.
    EmptySlot,
    /// Action targets the actor where an opponent is required, or vice versa.
    InvalidTarget,
    /// Special-card parameters are missing for the requested rank.
    MissingParams,
    /// Card token could not be parsed.
    ParseCard,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Player,
    Match,
    Other(String),
}

/// State the action relied on has already changed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    /// All six seats are taken.
    MatchFull,
    /// No pending special card (or a different rank) to act on.
    SpecialResolved,
    /// The top discard card is no longer stackable.
    StackResolved,
    /// No give-back obligation for this actor.
    NothingToGive,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input/user validation or business rule violation
    Validation(ValidationKind, String),
    /// Semantic conflict with state that already moved on
    Conflict(ConflictKind, String),
    /// Missing player or match
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

    /// Human-readable detail without the classification prefix.
    pub fn detail(&self) -> &str {
        match self {
            DomainError::Validation(_, d)
            | DomainError::Conflict(_, d)
            | DomainError::NotFound(_, d) => d,
        }
    }
}
