use serde::Serialize;
use tracing::info;

use crate::domain::events::MatchEvent;
use crate::domain::hand_value;
use crate::domain::state::{EndTrigger, MatchState, MatchStatus, PlayerId};

/// One row of the final table.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    pub player_id: PlayerId,
    pub name: String,
    pub score: i32,
}

/// Finish the round: reveal every hand, score it and close all open windows.
///
/// A drawn card stays with its holder and is not scored.
pub fn end_round(state: &mut MatchState, trigger: EndTrigger) -> MatchEvent {
    state.status = MatchStatus::Ended;
    state.pablo_called = false;
    state.pablo_caller = None;
    state.pending_special = None;
    state.pending_give = None;
    state.stack_queue.clear();
    state.stackable_index = None;

    for player in state.players.values_mut() {
        for card in player.hand.iter_mut().flatten() {
            card.face_up = true;
        }
        player.score = hand_value(&player.hand);
    }

    info!(
        match_id = %state.id,
        trigger = ?trigger,
        "Round ended"
    );
    state.end_trigger = Some(trigger.clone());
    MatchEvent::RoundEnded { trigger }
}

/// End the round if some player has emptied their hand.
pub fn end_if_out_of_cards(state: &mut MatchState) -> Option<MatchEvent> {
    let player_id = state.player_without_cards()?.clone();
    Some(end_round(state, EndTrigger::ZeroCards { player_id }))
}

/// Scores in ascending order; ties keep seating order.
pub fn standings(state: &MatchState) -> Vec<Standing> {
    let mut rows: Vec<Standing> = state
        .seating
        .iter()
        .filter_map(|id| state.players.get(id))
        .map(|p| Standing {
            player_id: p.id.clone(),
            name: p.name.clone(),
            score: p.score,
        })
        .collect();
    rows.sort_by_key(|row| row.score);
    rows
}

/// Lowest score once the round has ended.
pub fn winner(state: &MatchState) -> Option<PlayerId> {
    if state.status != MatchStatus::Ended {
        return None;
    }
    standings(state).into_iter().next().map(|row| row.player_id)
}
