//! 7/8/9 powers and the queue of players who earned them by stacking.

use serde::Deserialize;
use tracing::debug;

use crate::domain::events::{MatchEvent, Outcome, SlotCard};
use crate::domain::rules::is_grid_slot;
use crate::domain::state::{MatchState, PlayerId};
use crate::domain::Rank;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

/// A card position on the table.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRef {
    pub player_id: PlayerId,
    pub slot: usize,
}

/// How the current player wants to use the pending power.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SpecialCardUse {
    /// 7: look at one of your own grid cards.
    Peek { slot: usize },
    /// 8: look at one opponent card.
    Spy { target: PlayerId, slot: usize },
    /// 9: exchange any two cards on the table.
    Swap { first: SlotRef, second: SlotRef },
}

impl SpecialCardUse {
    pub fn rank(&self) -> Rank {
        match self {
            SpecialCardUse::Peek { .. } => Rank::Seven,
            SpecialCardUse::Spy { .. } => Rank::Eight,
            SpecialCardUse::Swap { .. } => Rank::Nine,
        }
    }
}

fn require_pending(state: &MatchState, who: &str, rank: Option<Rank>) -> Result<Rank, DomainError> {
    state.require_playing()?;
    state.require_no_debt(who)?;
    state.require_current(who)?;
    let pending = state.pending_special.ok_or_else(|| {
        DomainError::conflict(ConflictKind::SpecialResolved, "No special card is pending")
    })?;
    let top = state.discard_top().map(|c| c.rank);
    if top != Some(pending) || rank.is_some_and(|r| r != pending) {
        return Err(DomainError::conflict(
            ConflictKind::SpecialResolved,
            format!("The pending special card is a {}", pending.as_str()),
        ));
    }
    Ok(pending)
}

/// Resolve the pending power. Everything is validated before anything moves,
/// so a rejected use leaves the power armed.
pub fn use_special_card(
    state: &mut MatchState,
    who: &str,
    power: SpecialCardUse,
) -> Result<Outcome, DomainError> {
    let rank = require_pending(state, who, Some(power.rank()))?;

    let event = match power {
        SpecialCardUse::Peek { slot } => {
            if !is_grid_slot(slot) {
                return Err(DomainError::validation(
                    ValidationKind::InvalidSlot,
                    format!("slot {slot} is not a grid slot"),
                ));
            }
            let card = state.player(who)?.card_at(slot)?;
            MatchEvent::CardRevealed {
                viewer: who.to_string(),
                owner: who.to_string(),
                slot,
                card: card.turned_up(),
            }
        }
        SpecialCardUse::Spy { target, slot } => {
            if target == who {
                return Err(DomainError::validation(
                    ValidationKind::InvalidTarget,
                    "Spy on an opponent, not yourself",
                ));
            }
            let card = state.player(&target)?.card_at(slot)?;
            MatchEvent::CardRevealed {
                viewer: who.to_string(),
                owner: target,
                slot,
                card: card.turned_up(),
            }
        }
        SpecialCardUse::Swap { first, second } => {
            if first == second {
                return Err(DomainError::validation(
                    ValidationKind::InvalidTarget,
                    "Swap needs two different positions",
                ));
            }
            let first_card = state.player(&first.player_id)?.card_at(first.slot)?;
            let second_card = state.player(&second.player_id)?.card_at(second.slot)?;
            let event = MatchEvent::CardsSwapped {
                first: SlotCard {
                    player_id: first.player_id.clone(),
                    slot: first.slot,
                    card: first_card,
                },
                second: SlotCard {
                    player_id: second.player_id.clone(),
                    slot: second.slot,
                    card: second_card,
                },
            };
            state.player_mut(&first.player_id)?.hand[first.slot] = Some(second_card);
            state.player_mut(&second.player_id)?.hand[second.slot] = Some(first_card);
            event
        }
    };

    debug!(match_id = %state.id, player_id = %who, rank = rank.as_str(), "Special card used");
    hand_over(state, rank);
    Ok(Outcome::with_event(event))
}

/// Give up the pending power.
pub fn skip_special_card(state: &mut MatchState, who: &str) -> Result<Outcome, DomainError> {
    let rank = require_pending(state, who, None)?;
    debug!(match_id = %state.id, player_id = %who, rank = rank.as_str(), "Special card skipped");
    hand_over(state, rank);
    Ok(Outcome::default())
}

/// Clear the resolved power and pass it on to the next queued stacker.
fn hand_over(state: &mut MatchState, rank: Rank) {
    state.pending_special = None;
    while let Some(next) = state.stack_queue.pop_front() {
        if state.players.contains_key(&next) {
            debug!(match_id = %state.id, player_id = %next, rank = rank.as_str(), "Deferred special granted");
            state.current_player = Some(next);
            state.pending_special = Some(rank);
            break;
        }
    }
}
