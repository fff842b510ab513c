use tracing::{debug, warn};

use crate::domain::events::{ActionFailure, MatchEvent, Outcome};
use crate::domain::{apply_action, project_for, MatchState, PlayerAction};
use crate::errors::domain::DomainError;
use crate::errors::ErrorCode;
use crate::services::game_flow::GameFlowService;
use crate::services::match_registry::MatchHandle;
use crate::ws::protocol::{ServerMsg, SwapSide};

/// A notification waiting for the match lock to be released.
#[derive(Debug, Clone)]
pub enum Delivery {
    ToPlayer { player_id: String, msg: ServerMsg },
    ToMatch(ServerMsg),
}

impl GameFlowService {
    /// Apply one action under the match lock, then render and enqueue what
    /// everyone should hear before the lock is released.
    pub(super) fn run_mutation(
        &self,
        handle: &MatchHandle,
        player_id: &str,
        action: PlayerAction,
    ) -> Result<Outcome, DomainError> {
        let mut state = handle.lock();
        let action_name = action.name();
        let outcome = apply_action(&mut state, player_id, action).inspect_err(|err| {
            warn!(
                match_id = %state.id,
                player_id,
                action = action_name,
                error = %err,
                "Action rejected"
            );
        })?;
        debug!(
            match_id = %state.id,
            player_id,
            action = action_name,
            events = outcome.events.len(),
            "Action applied"
        );
        let deliveries = render(&state, player_id, &outcome);
        // Delivery order per match must follow mutation order.
        self.dispatch(&state.id, deliveries);
        Ok(outcome)
    }

    /// Send `player_id` a fresh snapshot of the match.
    pub(super) fn resend_snapshot(&self, handle: &MatchHandle, player_id: &str) {
        let state = handle.lock();
        let msg = ServerMsg::StateSnapshot {
            game: Box::new(project_for(&state, player_id)),
        };
        self.notifier.send_to_player(&state.id, player_id, msg);
    }

    /// Hand rendered notifications to the notifier. Called with the match lock held.
    pub(super) fn dispatch(&self, match_id: &str, deliveries: Vec<Delivery>) {
        for delivery in deliveries {
            match delivery {
                Delivery::ToPlayer { player_id, msg } => {
                    self.notifier.send_to_player(match_id, &player_id, msg)
                }
                Delivery::ToMatch(msg) => self.notifier.broadcast_to_match(match_id, msg),
            }
        }
    }
}

/// Events first, in order, then one snapshot per seat, then the actor's
/// failure notice if the action counted against them.
fn render(state: &MatchState, actor: &str, outcome: &Outcome) -> Vec<Delivery> {
    let mut out = Vec::with_capacity(outcome.events.len() + state.seating.len() + 1);

    for event in &outcome.events {
        match event {
            MatchEvent::CardRevealed {
                viewer,
                owner,
                slot,
                card,
            } => out.push(Delivery::ToPlayer {
                player_id: viewer.clone(),
                msg: ServerMsg::PrivateCardReveal {
                    target_player_id: owner.clone(),
                    slot: *slot,
                    card: *card,
                },
            }),
            MatchEvent::CardsSwapped { first, second } => {
                out.push(Delivery::ToMatch(ServerMsg::PublicSwapEvent {
                    first: SwapSide::from(first),
                    second: SwapSide::from(second),
                }))
            }
            MatchEvent::StackAttempted {
                actor_id,
                actor_name,
                success,
            } => out.push(Delivery::ToMatch(ServerMsg::PublicStackResult {
                actor_id: actor_id.clone(),
                actor_name: actor_name.clone(),
                success: *success,
            })),
            // The snapshot carries the final table.
            MatchEvent::RoundEnded { .. } => {}
        }
    }

    for seat in &state.seating {
        out.push(Delivery::ToPlayer {
            player_id: seat.clone(),
            msg: ServerMsg::StateSnapshot {
                game: Box::new(project_for(state, seat)),
            },
        });
    }

    if let Some(failure) = outcome.failure {
        let (code, message) = match failure {
            ActionFailure::RankMismatch => (
                ErrorCode::RankMismatch,
                "Ranks did not match; a penalty card was dealt if any were left",
            ),
            ActionFailure::DeckExhausted => (
                ErrorCode::IllegalAction,
                "The deck is empty; the round is over",
            ),
        };
        out.push(Delivery::ToPlayer {
            player_id: actor.to_string(),
            msg: ServerMsg::ActionRejected {
                code,
                message: message.to_string(),
            },
        });
    }

    out
}
