// Notifier whose first delivery waits until the test opens the gate

use std::sync::mpsc::{channel, Receiver, Sender};

use parking_lot::Mutex;
use pablo_backend::ws::protocol::ServerMsg;
use pablo_backend::Notifier;

use crate::support::recording_notifier::{RecordingNotifier, Sent};

pub struct GatedNotifier {
    inner: RecordingNotifier,
    /// Taken by the first delivery.
    gate: Mutex<Option<(Sender<()>, Receiver<()>)>>,
}

/// Fires once the first delivery is waiting; send on the second to release it.
pub struct GateControl {
    pub entered: Receiver<()>,
    pub release: Sender<()>,
}

impl GatedNotifier {
    pub fn new() -> (Self, GateControl) {
        let (entered_tx, entered_rx) = channel();
        let (release_tx, release_rx) = channel();
        let notifier = Self {
            inner: RecordingNotifier::new(),
            gate: Mutex::new(Some((entered_tx, release_rx))),
        };
        let control = GateControl {
            entered: entered_rx,
            release: release_tx,
        };
        (notifier, control)
    }

    pub fn take(&self) -> Vec<Sent> {
        self.inner.take()
    }

    fn wait_at_gate(&self) {
        let gate = self.gate.lock().take();
        if let Some((entered, release)) = gate {
            entered.send(()).expect("test is waiting");
            release.recv().expect("test releases the gate");
        }
    }
}

impl Notifier for GatedNotifier {
    fn send_to_player(&self, match_id: &str, player_id: &str, msg: ServerMsg) {
        self.wait_at_gate();
        self.inner.send_to_player(match_id, player_id, msg);
    }

    fn broadcast_to_match(&self, match_id: &str, msg: ServerMsg) {
        self.wait_at_gate();
        self.inner.broadcast_to_match(match_id, msg);
    }
}
