//! Side effects of accepted actions.
//!
//! Domain operations mutate [`MatchState`](crate::domain::state::MatchState)
//! and describe everything observers must hear about beyond the new state.
//! The service layer turns these into notifications while it still holds the lock.

use crate::domain::state::{EndTrigger, PlayerId};
use crate::domain::Card;

/// One side of a 9 swap, as it looked before the swap.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotCard {
    pub player_id: PlayerId,
    pub slot: usize,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MatchEvent {
    /// A 7 or 8 showed `card` to `viewer` and nobody else.
    CardRevealed {
        viewer: PlayerId,
        owner: PlayerId,
        slot: usize,
        card: Card,
    },
    /// A 9 exchanged two cards; announced to the whole match.
    CardsSwapped { first: SlotCard, second: SlotCard },
    /// A stack attempt resolved either way; announced to the whole match.
    StackAttempted {
        actor_id: PlayerId,
        actor_name: String,
        success: bool,
    },
    RoundEnded { trigger: EndTrigger },
}

/// Applied actions that still count as a failure for the actor.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ActionFailure {
    /// Stack rank did not match; a penalty card was dealt if one was left.
    RankMismatch,
    /// Draw on an empty deck; the round ended instead.
    DeckExhausted,
}

/// Result of an accepted action.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    pub events: Vec<MatchEvent>,
    pub failure: Option<ActionFailure>,
}

impl Outcome {
    pub fn with_event(event: MatchEvent) -> Self {
        Self {
            events: vec![event],
            failure: None,
        }
    }

    pub fn push(&mut self, event: MatchEvent) {
        self.events.push(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = MatchEvent>) {
        self.events.extend(events);
    }

    pub fn failed(mut self, failure: ActionFailure) -> Self {
        self.failure = Some(failure);
        self
    }
}
