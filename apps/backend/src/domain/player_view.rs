//! Player view of match state - what information is visible to one seat.
//!
//! The server keeps the whole table in memory; every snapshot sent out goes
//! through [`project_for`], which hides face-down cards that belong to other
//! players and any drawn card that is not the viewer's own.

use serde::Serialize;

use crate::domain::scoring::{standings, winner, Standing};
use crate::domain::state::{EndTrigger, MatchId, MatchState, MatchStatus, PendingGive, PlayerId};
use crate::domain::{Card, Rank};

/// What a viewer sees in one hand slot.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlotView {
    Empty,
    /// A card is there but its face is not visible to this viewer.
    Hidden,
    Card { card: Card },
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub slots: Vec<SlotView>,
    pub card_count: usize,
    pub score: i32,
}

/// Per-viewer snapshot of one match.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchView {
    pub match_id: MatchId,
    pub viewer_id: PlayerId,
    pub status: MatchStatus,
    pub current_player_id: Option<PlayerId>,
    pub seating: Vec<PlayerId>,
    /// In seating order.
    pub players: Vec<PlayerView>,
    pub deck_size: usize,
    pub discard_top: Option<Card>,
    pub drawn_card: Option<Card>,
    pub stacking_enabled: bool,
    pub pending_special_card: Option<Rank>,
    pub pending_give: Option<PendingGive>,
    pub pablo_called: bool,
    pub pablo_caller_id: Option<PlayerId>,
    pub end_trigger: Option<EndTrigger>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standings: Option<Vec<Standing>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<PlayerId>,
}

/// Project the match for `viewer`. Viewers need not be seated; spectators see
/// only public information.
pub fn project_for(state: &MatchState, viewer: &str) -> MatchView {
    let ended = state.status == MatchStatus::Ended;

    let players = state
        .seating
        .iter()
        .filter_map(|id| state.players.get(id))
        .map(|p| {
            let own = p.id == viewer;
            let slots = p
                .hand
                .iter()
                .map(|slot| match slot {
                    None => SlotView::Empty,
                    Some(card) if own || ended || card.face_up => SlotView::Card { card: *card },
                    Some(_) => SlotView::Hidden,
                })
                .collect();
            PlayerView {
                id: p.id.clone(),
                name: p.name.clone(),
                slots,
                card_count: p.card_count(),
                score: p.score,
            }
        })
        .collect();

    let drawn_card = state
        .drawn_card
        .as_ref()
        .filter(|drawn| drawn.player_id == viewer)
        .map(|drawn| drawn.card);

    MatchView {
        match_id: state.id.clone(),
        viewer_id: viewer.to_string(),
        status: state.status,
        current_player_id: state.current_player.clone(),
        seating: state.seating.clone(),
        players,
        deck_size: state.deck.len(),
        discard_top: state.discard_top().copied(),
        drawn_card,
        stacking_enabled: state.stacking_enabled(),
        pending_special_card: state.pending_special,
        // Names who owes whom and where; carries no card identity.
        pending_give: state.pending_give.clone(),
        pablo_called: state.pablo_called,
        pablo_caller_id: state.pablo_caller.clone(),
        end_trigger: state.end_trigger.clone(),
        standings: ended.then(|| standings(state)),
        winner: winner(state),
    }
}
