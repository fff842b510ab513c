use crate::domain::{Outcome, PlayerAction};
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::services::game_flow::GameFlowService;

impl GameFlowService {
    /// Submit one player action to a match.
    ///
    /// `join` creates the match on first reference; every other action needs
    /// an existing match. Plain rejections come back as `Err` and notify
    /// nobody; accepted actions fan out snapshots and events through the
    /// notifier, including the actor's own failure notice for a missed stack.
    pub fn submit(
        &self,
        match_id: &str,
        player_id: &str,
        action: PlayerAction,
    ) -> Result<Outcome, AppError> {
        let handle = match &action {
            PlayerAction::Join { .. } => self.registry.get_or_create(match_id),
            _ => self.registry.get(match_id).ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Match, format!("No match {match_id}"))
            })?,
        };

        Ok(self.run_mutation(&handle, player_id, action)?)
    }

    pub fn join(&self, match_id: &str, player_id: &str, name: &str) -> Result<Outcome, AppError> {
        self.submit(
            match_id,
            player_id,
            PlayerAction::Join {
                name: name.to_string(),
            },
        )
    }

    /// Queue a current snapshot for `player_id`, e.g. for a connection that
    /// was bound after its join was accepted.
    pub fn send_snapshot(&self, match_id: &str, player_id: &str) -> Result<(), AppError> {
        let handle = self.registry.get(match_id).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Match, format!("No match {match_id}"))
        })?;
        self.resend_snapshot(&handle, player_id);
        Ok(())
    }

    pub fn start_match(&self, match_id: &str, player_id: &str) -> Result<Outcome, AppError> {
        self.submit(match_id, player_id, PlayerAction::StartMatch)
    }
}
