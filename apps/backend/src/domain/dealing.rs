//! Deck construction, shuffling and the opening deal.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::domain::rules::{DECK_SIZE, GRID_SLOTS};
use crate::domain::{Card, Rank, Suit};

/// Generate a full 52-card deck in standard order, face down.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card::new(suit, rank));
        }
    }
    deck
}

/// Fisher-Yates shuffle of a fresh deck.
///
/// With a seed the order is reproducible; without one the generator is
/// seeded from the operating system.
pub fn shuffled_deck(seed: Option<u64>) -> VecDeque<Card> {
    let mut deck = full_deck();
    let mut rng = match seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_os_rng(),
    };
    deck.shuffle(&mut rng);
    deck.into()
}

/// Deal one grid (four face-down cards) per seat, seat by seat, from the
/// front of the deck.
///
/// Returns `None` when the deck cannot cover every seat.
pub fn deal_grids(deck: &mut VecDeque<Card>, seats: usize) -> Option<Vec<Vec<Option<Card>>>> {
    if deck.len() < seats * GRID_SLOTS {
        return None;
    }
    let mut grids = Vec::with_capacity(seats);
    for _ in 0..seats {
        let grid: Vec<Option<Card>> = deck
            .drain(..GRID_SLOTS)
            .map(|card| Some(card.turned_down()))
            .collect();
        grids.push(grid);
    }
    Some(grids)
}
