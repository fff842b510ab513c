//! Card scoring values and hand helpers.

use super::cards_types::{Card, Rank};

/// Score contribution of a single card. Lower is better.
///
/// Red kings are worth -1, aces 1, pips their face value, and every other
/// court card (J, Q, black K) 10.
pub fn card_value(card: &Card) -> i32 {
    match card.rank {
        Rank::King if card.suit.is_red() => -1,
        Rank::Ace => 1,
        Rank::Two => 2,
        Rank::Three => 3,
        Rank::Four => 4,
        Rank::Five => 5,
        Rank::Six => 6,
        Rank::Seven => 7,
        Rank::Eight => 8,
        Rank::Nine => 9,
        Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
    }
}

/// Number of occupied slots in a hand.
pub fn count_cards(hand: &[Option<Card>]) -> usize {
    hand.iter().filter(|slot| slot.is_some()).count()
}

/// Sum of card values over occupied slots.
pub fn hand_value(hand: &[Option<Card>]) -> i32 {
    hand.iter().flatten().map(card_value).sum()
}
