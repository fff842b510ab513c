//! Domain layer: the match state machine as pure, lock-free logic.
//!
//! Nothing here does I/O. Callers own the per-match lock and hand a
//! `&mut MatchState` to the rule functions.

pub mod actions;
pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod dealing;
pub mod events;
pub mod player_view;
pub mod rules;
pub mod scoring;
pub mod seed_derivation;
pub mod special;
pub mod stacking;
pub mod state;
pub mod turns;

#[cfg(test)]
mod test_state_helpers;
#[cfg(test)]
mod tests_player_view;
#[cfg(test)]
mod tests_props_conservation;
#[cfg(test)]
mod tests_scoring;

// Re-exports for ergonomics
pub use actions::{apply_action, PlayerAction};
pub use cards_logic::{card_value, count_cards, hand_value};
pub use cards_types::{Card, Rank, Suit};
pub use dealing::shuffled_deck;
pub use events::{ActionFailure, MatchEvent, Outcome};
pub use player_view::{project_for, MatchView};
pub use seed_derivation::derive_match_seed;
pub use special::{SlotRef, SpecialCardUse};
pub use state::{MatchId, MatchState, MatchStatus, PlayerId};
