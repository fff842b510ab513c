//! Off-turn stacking onto the discard pile and the give-back it can create.
//!
//! Any seated player may stack while the top discard card is open. The
//! check of `stackable_index` and the mutation that clears it happen in the
//! same call, so when several players race for one card exactly one wins
//! and the rest see a closed window.

use tracing::{debug, warn};

use crate::domain::events::{ActionFailure, MatchEvent, Outcome};
use crate::domain::scoring::end_if_out_of_cards;
use crate::domain::state::{MatchState, PendingGive};
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

/// Stack one of your own cards.
pub fn stack_own(state: &mut MatchState, who: &str, slot: usize) -> Result<Outcome, DomainError> {
    stack(state, who, who, slot)
}

/// Stack an opponent's card; on success you owe them a replacement.
pub fn stack_opponent(
    state: &mut MatchState,
    who: &str,
    target: &str,
    slot: usize,
) -> Result<Outcome, DomainError> {
    if target == who {
        return Err(DomainError::validation(
            ValidationKind::InvalidTarget,
            "Use stack own for your own cards",
        ));
    }
    // One outstanding give-back at a time.
    if let Some(give) = &state.pending_give {
        return Err(DomainError::validation(
            ValidationKind::GiveBackPending,
            format!("{} still owes {} a card", give.actor_id, give.target_player_id),
        ));
    }
    stack(state, who, target, slot)
}

fn stack(state: &mut MatchState, who: &str, owner: &str, slot: usize) -> Result<Outcome, DomainError> {
    state.require_playing()?;
    let actor_name = state.player(who)?.name.clone();
    state.require_no_debt(who)?;
    if !state.stacking_enabled() {
        return Err(DomainError::conflict(
            ConflictKind::StackResolved,
            "Nothing to stack on",
        ));
    }
    let card = state.player(owner)?.card_at(slot)?;
    let top = *state
        .discard_top()
        .ok_or_else(|| DomainError::validation_other("Invariant violated: stackable index on empty pile"))?;

    if card.rank != top.rank {
        let penalty = state.deck.pop_front();
        if let Some(penalty) = penalty {
            state.player_mut(who)?.hand.push(Some(penalty.turned_down()));
        }
        warn!(
            match_id = %state.id,
            player_id = %who,
            slot,
            rank = card.rank.as_str(),
            penalty = penalty.is_some(),
            "Stack failed"
        );
        let event = MatchEvent::StackAttempted {
            actor_id: who.to_string(),
            actor_name,
            success: false,
        };
        return Ok(Outcome::with_event(event).failed(ActionFailure::RankMismatch));
    }

    state.player_mut(owner)?.hand[slot] = None;
    state.discard_pile.push(card.turned_up());
    state.stackable_index = None;
    if top.rank.is_special() && !state.stack_queue.iter().any(|queued| queued == who) {
        state.stack_queue.push_back(who.to_string());
    }
    if owner != who {
        state.pending_give = Some(PendingGive {
            actor_id: who.to_string(),
            target_player_id: owner.to_string(),
            target_slot: slot,
        });
    }
    debug!(
        match_id = %state.id,
        player_id = %who,
        owner = %owner,
        slot,
        rank = card.rank.as_str(),
        "Stack succeeded"
    );

    let mut outcome = Outcome::with_event(MatchEvent::StackAttempted {
        actor_id: who.to_string(),
        actor_name,
        success: true,
    });
    outcome.extend(end_if_out_of_cards(state));
    Ok(outcome)
}

/// Fill the opponent slot emptied by a successful stack.
pub fn give_card(state: &mut MatchState, who: &str, source_slot: usize) -> Result<Outcome, DomainError> {
    state.require_playing()?;
    let give = match &state.pending_give {
        Some(give) if give.actor_id == who => give.clone(),
        _ => {
            return Err(DomainError::conflict(
                ConflictKind::NothingToGive,
                format!("{who} owes no card"),
            ))
        }
    };
    let card = state.player(who)?.card_at(source_slot)?;
    match state.player(&give.target_player_id)?.hand.get(give.target_slot) {
        Some(None) => {}
        _ => {
            return Err(DomainError::validation_other(
                "Invariant violated: give-back slot is not empty",
            ))
        }
    }

    state.player_mut(who)?.hand[source_slot] = None;
    state.player_mut(&give.target_player_id)?.hand[give.target_slot] = Some(card.turned_down());
    state.pending_give = None;
    debug!(
        match_id = %state.id,
        player_id = %who,
        target = %give.target_player_id,
        slot = give.target_slot,
        "Card given back"
    );

    let mut outcome = Outcome::default();
    outcome.extend(end_if_out_of_cards(state));
    Ok(outcome)
}
