//! Outbound delivery seam between match services and the transport.

use crate::ws::protocol::ServerMsg;

/// Delivers notifications to connected players.
///
/// Implementations must only enqueue: both methods are called while the
/// match lock is held, so a stalled client must never block them.
pub trait Notifier: Send + Sync {
    /// Deliver to every connection bound to `player_id` in `match_id`.
    fn send_to_player(&self, match_id: &str, player_id: &str, msg: ServerMsg);

    /// Deliver to every connection bound to `match_id`.
    fn broadcast_to_match(&self, match_id: &str, msg: ServerMsg);
}
