use actix::prelude::*;
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use crate::domain::{MatchId, PlayerId};
use crate::services::notifier::Notifier;
use crate::ws::protocol::ServerMsg;

/// A message queued into one session's mailbox.
#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct Outbound(pub ServerMsg);

struct Binding {
    player_id: PlayerId,
    recipient: Recipient<Outbound>,
}

/// Live websocket connections, grouped by match.
///
/// Sending is `do_send` into the session mailbox, so delivery never waits
/// on a client.
#[derive(Default)]
pub struct WsRegistry {
    sessions: DashMap<MatchId, DashMap<Uuid, Binding>>,
    matches_by_conn: DashMap<Uuid, MatchId>,
}

impl WsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &self,
        match_id: &str,
        player_id: &str,
        conn_id: Uuid,
        recipient: Recipient<Outbound>,
    ) {
        self.sessions
            .entry(match_id.to_string())
            .or_default()
            .insert(
                conn_id,
                Binding {
                    player_id: player_id.to_string(),
                    recipient,
                },
            );
        self.matches_by_conn.insert(conn_id, match_id.to_string());
        debug!(match_id, player_id, conn_id = %conn_id, "Connection bound");
    }

    pub fn unregister(&self, conn_id: Uuid) {
        let Some((_, match_id)) = self.matches_by_conn.remove(&conn_id) else {
            return;
        };
        // Drop the inner guard before touching the outer map again.
        let now_empty = match self.sessions.get(&match_id) {
            Some(entry) => {
                entry.remove(&conn_id);
                entry.is_empty()
            }
            None => false,
        };
        if now_empty {
            self.sessions.remove_if(&match_id, |_, conns| conns.is_empty());
        }
        debug!(match_id = %match_id, conn_id = %conn_id, "Connection unbound");
    }

    pub fn connection_count(&self) -> usize {
        self.matches_by_conn.len()
    }

    pub fn match_connection_count(&self, match_id: &str) -> usize {
        self.sessions.get(match_id).map_or(0, |conns| conns.len())
    }
}

impl Notifier for WsRegistry {
    fn send_to_player(&self, match_id: &str, player_id: &str, msg: ServerMsg) {
        if let Some(conns) = self.sessions.get(match_id) {
            for binding in conns.iter().filter(|b| b.player_id == player_id) {
                binding.recipient.do_send(Outbound(msg.clone()));
            }
        }
    }

    fn broadcast_to_match(&self, match_id: &str, msg: ServerMsg) {
        if let Some(conns) = self.sessions.get(match_id) {
            for binding in conns.iter() {
                binding.recipient.do_send(Outbound(msg.clone()));
            }
        }
    }
}
