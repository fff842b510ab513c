//! Game flow orchestration service - bridges the pure match rules with the
//! connected players.
//!
//! Every action runs as one critical section on the match lock. Snapshots
//! and event notifications are rendered and handed to the [`Notifier`]
//! under that lock, so each connection sees a match's updates in the order
//! they were applied.

mod mutation;
mod player_actions;

use std::sync::Arc;

pub use mutation::Delivery;

use crate::services::match_registry::MatchRegistry;
use crate::services::notifier::Notifier;

pub struct GameFlowService {
    registry: Arc<MatchRegistry>,
    notifier: Arc<dyn Notifier>,
}

impl GameFlowService {
    pub fn new(registry: Arc<MatchRegistry>, notifier: Arc<dyn Notifier>) -> Self {
        Self { registry, notifier }
    }

    pub fn registry(&self) -> &Arc<MatchRegistry> {
        &self.registry
    }
}
