//! Turn engine: draw, resolve the drawn card, end the turn, call Pablo.

use tracing::debug;

use crate::domain::events::{ActionFailure, Outcome};
use crate::domain::rules::is_grid_slot;
use crate::domain::scoring::end_round;
use crate::domain::state::{DrawnCard, EndTrigger, MatchState};
use crate::errors::domain::{DomainError, ValidationKind};

/// Draw the top deck card into the player's hand-held slot.
///
/// Against an empty deck the round ends instead, whatever else is pending,
/// and the outcome carries [`ActionFailure::DeckExhausted`].
pub fn draw(state: &mut MatchState, who: &str) -> Result<Outcome, DomainError> {
    state.require_playing()?;
    state.require_current(who)?;
    if state.deck.is_empty() {
        let event = end_round(state, EndTrigger::DeckExhausted);
        return Ok(Outcome::with_event(event).failed(ActionFailure::DeckExhausted));
    }
    state.require_no_debt(who)?;
    if state.has_drawn.contains(who) || state.drawn_card.is_some() {
        return Err(DomainError::validation(
            ValidationKind::AlreadyDrawn,
            format!("{who} already drew this turn"),
        ));
    }
    if let Some(rank) = state.pending_special {
        return Err(DomainError::validation(
            ValidationKind::SpecialCardPending,
            format!("Use or skip the pending {} first", rank.as_str()),
        ));
    }

    let card = state
        .deck
        .pop_front()
        .ok_or_else(|| DomainError::validation_other("Invariant violated: deck emptied under the lock"))?;

    state.drawn_card = Some(DrawnCard {
        player_id: who.to_string(),
        card: card.turned_up(),
    });
    state.has_drawn.insert(who.to_string());
    debug!(match_id = %state.id, player_id = %who, deck = state.deck.len(), "Card drawn");
    Ok(Outcome::default())
}

/// Guards shared by the two ways of resolving a drawn card.
fn require_drawn(state: &MatchState, who: &str) -> Result<(), DomainError> {
    state.require_playing()?;
    state.require_no_debt(who)?;
    state.require_current(who)?;
    match &state.drawn_card {
        Some(drawn) if drawn.player_id == who => Ok(()),
        _ => Err(DomainError::validation(
            ValidationKind::NoDrawnCard,
            format!("{who} has no drawn card"),
        )),
    }
}

fn take_drawn(state: &mut MatchState) -> Result<DrawnCard, DomainError> {
    state
        .drawn_card
        .take()
        .ok_or_else(|| DomainError::validation_other("Invariant violated: drawn card vanished"))
}

/// Throw the drawn card onto the discard pile.
pub fn discard_drawn(state: &mut MatchState, who: &str) -> Result<Outcome, DomainError> {
    require_drawn(state, who)?;
    let drawn = take_drawn(state)?;
    state.place_on_discard(drawn.card);
    debug!(
        match_id = %state.id,
        player_id = %who,
        rank = drawn.card.rank.as_str(),
        "Drawn card discarded"
    );
    Ok(Outcome::default())
}

/// Put the drawn card face down into a grid slot and discard what was there.
pub fn swap_drawn(state: &mut MatchState, who: &str, slot: usize) -> Result<Outcome, DomainError> {
    require_drawn(state, who)?;
    if !is_grid_slot(slot) {
        return Err(DomainError::validation(
            ValidationKind::InvalidSlot,
            format!("slot {slot} is not a grid slot"),
        ));
    }
    state.player(who)?.card_at(slot)?;

    let drawn = take_drawn(state)?;
    let player = state.player_mut(who)?;
    let Some(old) = player.hand[slot].replace(drawn.card.turned_down()) else {
        return Err(DomainError::validation_other(
            "Invariant violated: swap slot emptied under the lock",
        ));
    };
    state.place_on_discard(old);
    debug!(match_id = %state.id, player_id = %who, slot, "Drawn card swapped in");
    Ok(Outcome::default())
}

/// Pass the turn to the next seat, or end the round when that seat called Pablo.
pub fn end_turn(state: &mut MatchState, who: &str) -> Result<Outcome, DomainError> {
    state.require_playing()?;
    state.require_current(who)?;
    state.require_no_debt(who)?;
    if state.drawn_card.is_some() {
        return Err(DomainError::validation(
            ValidationKind::DrawnCardPending,
            "Discard or swap the drawn card first",
        ));
    }
    if state.pending_special.is_some() {
        return Err(DomainError::validation(
            ValidationKind::SpecialCardPending,
            "Use or skip the special card first",
        ));
    }

    let next = state
        .next_seat(who)
        .cloned()
        .ok_or_else(|| DomainError::validation_other("Invariant violated: current player not seated"))?;
    state.has_drawn.remove(who);

    if state.pablo_called && state.pablo_caller.as_deref() == Some(next.as_str()) {
        let event = end_round(state, EndTrigger::PabloCalled { caller: next });
        return Ok(Outcome::with_event(event));
    }

    state.has_drawn.remove(&next);
    debug!(match_id = %state.id, player_id = %who, next = %next, "Turn ended");
    state.current_player = Some(next);
    Ok(Outcome::default())
}

/// Announce the final rotation. The first call wins; later calls are no-ops.
pub fn call_pablo(state: &mut MatchState, who: &str) -> Result<Outcome, DomainError> {
    state.require_playing()?;
    state.player(who)?;
    state.require_no_debt(who)?;
    if state.pablo_called {
        return Ok(Outcome::default());
    }
    state.pablo_called = true;
    state.pablo_caller = Some(who.to_string());
    debug!(match_id = %state.id, player_id = %who, "Pablo called");
    Ok(Outcome::default())
}
