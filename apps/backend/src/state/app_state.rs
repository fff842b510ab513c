use std::sync::Arc;

use crate::config::server::ServerConfig;
use crate::services::game_flow::GameFlowService;
use crate::services::match_registry::MatchRegistry;
use crate::ws::hub::WsRegistry;

/// Application state containing shared resources
pub struct AppState {
    pub config: ServerConfig,
    matches: Arc<MatchRegistry>,
    websocket_registry: Arc<WsRegistry>,
    game_flow: GameFlowService,
}

impl AppState {
    /// Build the registries and wire the websocket registry in as the notifier.
    pub fn new(config: ServerConfig) -> Self {
        let matches = Arc::new(MatchRegistry::new(config.deck_seed));
        let websocket_registry = Arc::new(WsRegistry::new());
        let game_flow = GameFlowService::new(matches.clone(), websocket_registry.clone());
        Self {
            config,
            matches,
            websocket_registry,
            game_flow,
        }
    }

    pub fn match_registry(&self) -> Arc<MatchRegistry> {
        self.matches.clone()
    }

    pub fn websocket_registry(&self) -> Arc<WsRegistry> {
        self.websocket_registry.clone()
    }

    pub fn game_flow(&self) -> &GameFlowService {
        &self.game_flow
    }
}
