//! Test-only match fixtures for domain unit tests.
//!
//! Fixtures are built from a full deck, so every table they produce holds
//! exactly 52 cards.

use std::collections::VecDeque;

use crate::domain::cards_parsing::try_parse_cards;
use crate::domain::dealing::{full_deck, shuffled_deck};
use crate::domain::state::{MatchState, MatchStatus, Player};
use crate::domain::Card;

/// Waiting match with `ids` seated in order (names are upper-cased ids).
pub fn seated(ids: &[&str], seed: u64) -> MatchState {
    let mut state = MatchState::new("m-test", shuffled_deck(Some(seed)));
    for id in ids {
        state.add_player(id, &id.to_uppercase()).unwrap();
    }
    state
}

/// Started match dealt from a seeded deck.
pub fn started(ids: &[&str], seed: u64) -> MatchState {
    let mut state = seated(ids, seed);
    state.start().unwrap();
    state
}

fn cards(tokens: &[&str]) -> Vec<Card> {
    try_parse_cards(tokens.iter().copied()).unwrap()
}

/// Playing match with explicit hands and discard pile (bottom first).
///
/// The first seat is current. The remaining cards form the deck in standard
/// order. The discard top is open to stacking and nothing is pending.
pub fn table(hands: &[(&str, &[&str])], discard: &[&str]) -> MatchState {
    let mut used: Vec<Card> = Vec::new();
    let mut state = MatchState::new("m-test", VecDeque::new());

    for (id, tokens) in hands {
        let hand = cards(tokens);
        used.extend(hand.iter().copied());
        let mut player = Player::new(*id, id.to_uppercase());
        player.hand = hand.into_iter().map(|c| Some(c.turned_down())).collect();
        state.seating.push(id.to_string());
        state.players.insert(id.to_string(), player);
    }

    let pile = cards(discard);
    used.extend(pile.iter().copied());
    state.discard_pile = pile.into_iter().map(Card::turned_up).collect();
    if !state.discard_pile.is_empty() {
        state.stackable_index = Some(state.discard_pile.len() - 1);
    }

    state.deck = full_deck()
        .into_iter()
        .filter(|c| !used.iter().any(|u| u.same_card(c)))
        .collect();
    state.status = MatchStatus::Playing;
    state.current_player = state.seating.first().cloned();
    state
}

/// Empty a hand slot, moving the card to the bottom of the deck.
pub fn clear_slot(state: &mut MatchState, id: &str, slot: usize) {
    if let Some(card) = state.players.get_mut(id).unwrap().hand[slot].take() {
        state.deck.push_back(card.turned_down());
    }
}

/// Move a specific card to the front of the deck.
pub fn put_on_deck_top(state: &mut MatchState, token: &str) {
    let card: Card = token.parse().unwrap();
    let idx = state
        .deck
        .iter()
        .position(|c| c.same_card(&card))
        .expect("card must be in the deck");
    let card = state.deck.remove(idx).unwrap();
    state.deck.push_front(card);
}

/// Current player draws and discards `token`, arming its power if special.
pub fn discard_from_deck(state: &mut MatchState, token: &str) {
    let who = state.current_player.clone().unwrap();
    put_on_deck_top(state, token);
    crate::domain::turns::draw(state, &who).unwrap();
    crate::domain::turns::discard_drawn(state, &who).unwrap();
}

pub fn hand_of(state: &MatchState, id: &str) -> Vec<Option<Card>> {
    state.players[id].hand.clone()
}
