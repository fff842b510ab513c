use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::info;

use crate::domain::{derive_match_seed, shuffled_deck, MatchId, MatchState};

/// A match behind its exclusive lock.
pub type MatchHandle = Arc<Mutex<MatchState>>;

/// Process-wide map of live matches.
///
/// The map only guards get-or-create; each match carries its own lock, so
/// different matches never contend.
#[derive(Debug, Default)]
pub struct MatchRegistry {
    matches: DashMap<MatchId, MatchHandle>,
    /// Base seed for reproducible shuffles; `None` shuffles from OS entropy.
    deck_seed: Option<u64>,
}

impl MatchRegistry {
    pub fn new(deck_seed: Option<u64>) -> Self {
        Self {
            matches: DashMap::new(),
            deck_seed,
        }
    }

    /// Look up a match, creating a waiting one with a fresh deck on first reference.
    pub fn get_or_create(&self, match_id: &str) -> MatchHandle {
        if let Some(existing) = self.matches.get(match_id) {
            return existing.value().clone();
        }
        self.matches
            .entry(match_id.to_string())
            .or_insert_with(|| {
                let seed = self.deck_seed.map(|base| derive_match_seed(base, match_id));
                info!(match_id, seeded = seed.is_some(), "Match created");
                Arc::new(Mutex::new(MatchState::new(match_id, shuffled_deck(seed))))
            })
            .value()
            .clone()
    }

    pub fn get(&self, match_id: &str) -> Option<MatchHandle> {
        self.matches.get(match_id).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
