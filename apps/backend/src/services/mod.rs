pub mod game_flow;
pub mod match_registry;
pub mod notifier;
