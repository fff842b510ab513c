use crate::domain::player_view::{project_for, SlotView};
use crate::domain::scoring::end_round;
use crate::domain::stacking::stack_own;
use crate::domain::state::EndTrigger;
use crate::domain::test_state_helpers::{put_on_deck_top, table};
use crate::domain::turns::draw;
use crate::domain::Card;

fn card(token: &str) -> Card {
    token.parse().unwrap()
}

fn table_ab() -> crate::domain::MatchState {
    table(
        &[("a", &["5H", "2H", "3H", "4H"]), ("b", &["5C", "2C", "3C", "4C"])],
        &["5D"],
    )
}

#[test]
fn viewer_sees_own_cards_but_not_opponents_face_down_cards() {
    let state = table_ab();
    let view = project_for(&state, "a");

    let own = &view.players[0];
    assert_eq!(own.id, "a");
    assert!(own.slots.iter().all(|s| matches!(s, SlotView::Card { .. })));

    let other = &view.players[1];
    assert_eq!(other.id, "b");
    assert!(other.slots.iter().all(|s| *s == SlotView::Hidden));
    assert_eq!(other.card_count, 4);
}

#[test]
fn face_up_opponent_cards_are_visible() {
    let mut state = table_ab();
    let slot = state.players.get_mut("b").unwrap().hand[2].as_mut().unwrap();
    slot.face_up = true;

    let view = project_for(&state, "a");
    assert_eq!(
        view.players[1].slots[2],
        SlotView::Card {
            card: card("3C").turned_up()
        }
    );
    assert_eq!(view.players[1].slots[0], SlotView::Hidden);
}

#[test]
fn hidden_slots_never_serialize_rank_or_suit() {
    let state = table_ab();
    let json = serde_json::to_value(project_for(&state, "a")).unwrap();
    let slots = &json["players"][1]["slots"];
    for slot in slots.as_array().unwrap() {
        assert_eq!(slot, &serde_json::json!({ "kind": "hidden" }));
    }
    assert_eq!(json["discardTop"]["rank"], "5");
    assert_eq!(json["stackingEnabled"], true);
}

#[test]
fn only_the_drawer_sees_the_drawn_card() {
    let mut state = table_ab();
    put_on_deck_top(&mut state, "KS");
    draw(&mut state, "a").unwrap();

    let drawer = project_for(&state, "a");
    assert!(drawer.drawn_card.unwrap().same_card(&card("KS")));
    assert_eq!(project_for(&state, "b").drawn_card, None);
    assert_eq!(project_for(&state, "spectator").drawn_card, None);
    assert_eq!(drawer.deck_size, state.deck.len());
}

#[test]
fn stacking_flag_follows_the_stackable_pointer() {
    let mut state = table_ab();
    assert!(project_for(&state, "b").stacking_enabled);
    stack_own(&mut state, "b", 0).unwrap();
    let view = project_for(&state, "a");
    assert!(!view.stacking_enabled);
    assert!(view.discard_top.unwrap().same_card(&card("5C")));
    assert_eq!(view.players[1].slots[0], SlotView::Empty);
}

#[test]
fn ended_match_reveals_everything_with_standings() {
    let mut state = table_ab();
    let view = project_for(&state, "a");
    assert!(view.standings.is_none());
    assert!(view.winner.is_none());

    end_round(&mut state, EndTrigger::DeckExhausted);
    let view = project_for(&state, "a");
    assert!(view.players[1]
        .slots
        .iter()
        .all(|s| matches!(s, SlotView::Card { .. })));
    // Both hands score 14; the earlier seat wins the tie.
    let standings = view.standings.unwrap();
    assert_eq!(standings[0].player_id, "a");
    assert_eq!(standings[1].score, 14);
    assert_eq!(view.winner.as_deref(), Some("a"));
}
