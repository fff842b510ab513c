use crate::domain::scoring::{end_round, standings, winner};
use crate::domain::state::{EndTrigger, MatchStatus};
use crate::domain::test_state_helpers::table;
use crate::domain::turns::draw;

#[test]
fn round_end_reveals_and_scores_every_hand() {
    let mut state = table(
        &[("a", &["AH", "7C", "KH", "KS"]), ("b", &["KD", "2C", "QS"])],
        &["5D"],
    );
    end_round(&mut state, EndTrigger::DeckExhausted);

    assert_eq!(state.status, MatchStatus::Ended);
    assert_eq!(state.players["a"].score, 17);
    assert_eq!(state.players["b"].score, 11);
    assert!(state
        .players
        .values()
        .flat_map(|p| p.hand.iter().flatten())
        .all(|c| c.face_up));
    assert_eq!(state.end_trigger, Some(EndTrigger::DeckExhausted));
}

#[test]
fn round_end_closes_every_open_window() {
    let mut state = table(&[("a", &["AH"]), ("b", &["AC"])], &["8D"]);
    state.pending_special = Some(crate::domain::Rank::Eight);
    state.stack_queue.push_back("b".into());
    state.pablo_called = true;
    state.pablo_caller = Some("b".into());

    end_round(&mut state, EndTrigger::PabloCalled { caller: "b".into() });
    assert_eq!(state.pending_special, None);
    assert!(state.stack_queue.is_empty());
    assert!(!state.stacking_enabled());
    assert!(!state.pablo_called);
    assert_eq!(state.pablo_caller, None);
}

#[test]
fn drawn_card_stays_with_holder_and_is_not_scored() {
    let mut state = table(&[("a", &["AH"]), ("b", &["AC"])], &["5D"]);
    draw(&mut state, "a").unwrap();
    end_round(&mut state, EndTrigger::DeckExhausted);

    assert!(state.drawn_card.is_some());
    assert_eq!(state.players["a"].score, 1);
    assert_eq!(state.card_total(), 52);
}

#[test]
fn standings_are_ascending_and_ties_keep_seating_order() {
    let mut state = table(
        &[
            ("a", &["9H"]),
            ("b", &["3C", "2C"]),
            ("c", &["KH"]),
            ("d", &["5S"]),
        ],
        &["4D"],
    );
    assert_eq!(winner(&state), None);

    end_round(&mut state, EndTrigger::DeckExhausted);
    let order: Vec<(String, i32)> = standings(&state)
        .into_iter()
        .map(|row| (row.player_id, row.score))
        .collect();
    assert_eq!(
        order,
        vec![
            ("c".to_string(), -1),
            ("b".to_string(), 5),
            ("d".to_string(), 5),
            ("a".to_string(), 9),
        ]
    );
    assert_eq!(winner(&state).as_deref(), Some("c"));
}
