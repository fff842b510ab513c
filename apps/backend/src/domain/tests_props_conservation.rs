//! Property tests over random action sequences (pure domain).
//!
//! Properties tested:
//! - The table always holds 52 cards, whether actions succeed or not
//! - A drawn card always belongs to the current player
//! - The stackable pointer is unset or points at the top of the pile
//! - A rejected stack deals exactly one penalty card and leaves the pile alone

use proptest::prelude::*;

use crate::domain::actions::apply_action;
use crate::domain::events::ActionFailure;
use crate::domain::rules::DECK_SIZE;
use crate::domain::stacking::stack_own;
use crate::domain::state::{MatchState, MatchStatus};
use crate::domain::test_gens::{action_seed, deck_seed, seat_count};
use crate::domain::test_state_helpers::started;
use crate::domain::turns::{discard_drawn, draw};
use crate::domain::test_prelude;

const IDS: [&str; 6] = ["p1", "p2", "p3", "p4", "p5", "p6"];

fn check_invariants(state: &MatchState) -> Result<(), TestCaseError> {
    prop_assert_eq!(state.card_total(), DECK_SIZE);
    if let Some(drawn) = &state.drawn_card {
        prop_assert_eq!(Some(&drawn.player_id), state.current_player.as_ref());
    }
    if let Some(idx) = state.stackable_index {
        prop_assert_eq!(idx + 1, state.discard_pile.len());
    }
    if state.status == MatchStatus::Playing {
        let current = state.current_player.as_ref();
        prop_assert!(current.is_some_and(|c| state.seating.contains(c)));
    }
    if let Some(give) = &state.pending_give {
        prop_assert!(state.players.contains_key(&give.actor_id));
        prop_assert!(state.players[&give.target_player_id].hand[give.target_slot].is_none());
    }
    Ok(())
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: every action, accepted or rejected, conserves the deck
    #[test]
    fn prop_random_play_conserves_cards(
        seed in deck_seed(),
        seats in seat_count(),
        steps in prop::collection::vec(action_seed(), 1..120),
    ) {
        let mut state = started(&IDS[..seats], seed);
        check_invariants(&state)?;

        for step in &steps {
            if state.status == MatchStatus::Ended {
                break;
            }
            let (actor, action) = step.resolve(&state);
            let before = state.clone();
            let result = apply_action(&mut state, &actor, action);
            if result.is_err() {
                // Plain rejections are no-ops.
                prop_assert_eq!(&state.discard_pile, &before.discard_pile);
                prop_assert_eq!(&state.deck, &before.deck);
                prop_assert_eq!(&state.current_player, &before.current_player);
            }
            check_invariants(&state)?;
        }
    }

    /// Property: a stack attempt either grows the pile by one or the actor's
    /// hand by one penalty card, never both
    #[test]
    fn prop_stack_moves_exactly_one_card(
        seed in deck_seed(),
        slot in 0usize..4,
    ) {
        let mut state = started(&["p1", "p2"], seed);
        draw(&mut state, "p1").unwrap();
        discard_drawn(&mut state, "p1").unwrap();

        let pile_before = state.discard_pile.len();
        let hand_before = state.players["p2"].card_count();
        let slots_before = state.players["p2"].hand.len();

        let outcome = stack_own(&mut state, "p2", slot).unwrap();
        let hand_after = state.players["p2"].card_count();
        match outcome.failure {
            Some(ActionFailure::RankMismatch) => {
                prop_assert_eq!(hand_after, hand_before + 1);
                prop_assert_eq!(state.players["p2"].hand.len(), slots_before + 1);
                prop_assert_eq!(state.discard_pile.len(), pile_before);
                prop_assert!(state.stacking_enabled());
            }
            _ => {
                prop_assert_eq!(hand_after, hand_before - 1);
                prop_assert_eq!(state.discard_pile.len(), pile_before + 1);
                prop_assert!(!state.stacking_enabled());
            }
        }
        prop_assert_eq!(state.card_total(), DECK_SIZE);
    }
}
