// Notifier that keeps every message instead of sending it anywhere

use parking_lot::Mutex;
use pablo_backend::ws::protocol::ServerMsg;
use pablo_backend::Notifier;
use serde_json::Value;

/// One recorded delivery. `player_id` is `None` for a match broadcast.
#[derive(Debug, Clone)]
pub struct Sent {
    pub match_id: String,
    pub player_id: Option<String>,
    pub msg: Value,
}

impl Sent {
    pub fn kind(&self) -> &str {
        self.msg["type"].as_str().unwrap_or_default()
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Sent>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far, leaving the log empty.
    pub fn take(&self) -> Vec<Sent> {
        std::mem::take(&mut *self.sent.lock())
    }

    pub fn len(&self) -> usize {
        self.sent.lock().len()
    }

    fn record(&self, match_id: &str, player_id: Option<&str>, msg: ServerMsg) {
        let msg = serde_json::to_value(&msg).expect("server messages serialize");
        self.sent.lock().push(Sent {
            match_id: match_id.to_string(),
            player_id: player_id.map(str::to_string),
            msg,
        });
    }
}

impl Notifier for RecordingNotifier {
    fn send_to_player(&self, match_id: &str, player_id: &str, msg: ServerMsg) {
        self.record(match_id, Some(player_id), msg);
    }

    fn broadcast_to_match(&self, match_id: &str, msg: ServerMsg) {
        self.record(match_id, None, msg);
    }
}

/// Messages of one `type`, in delivery order.
pub fn of_kind<'a>(sent: &'a [Sent], kind: &str) -> Vec<&'a Sent> {
    sent.iter().filter(|s| s.kind() == kind).collect()
}

/// Snapshots delivered to `player_id`, in order.
pub fn snapshots_for<'a>(sent: &'a [Sent], player_id: &str) -> Vec<&'a Value> {
    sent.iter()
        .filter(|s| s.kind() == "state_snapshot" && s.player_id.as_deref() == Some(player_id))
        .map(|s| &s.msg["game"])
        .collect()
}
