//! Single entry point that routes a player action to the rule that handles it.

use crate::domain::events::Outcome;
use crate::domain::special::{skip_special_card, use_special_card, SpecialCardUse};
use crate::domain::stacking::{give_card, stack_opponent, stack_own};
use crate::domain::state::{MatchState, PlayerId};
use crate::domain::turns::{call_pablo, discard_drawn, draw, end_turn, swap_drawn};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum PlayerAction {
    Join { name: String },
    StartMatch,
    Draw,
    DiscardDrawn,
    SwapDrawn { slot: usize },
    UseSpecialCard(SpecialCardUse),
    SkipSpecialCard,
    CallPablo,
    EndTurn,
    StackOwn { slot: usize },
    StackOpponent { target: PlayerId, slot: usize },
    GiveCard { source_slot: usize },
}

impl PlayerAction {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            PlayerAction::Join { .. } => "join",
            PlayerAction::StartMatch => "start_match",
            PlayerAction::Draw => "draw",
            PlayerAction::DiscardDrawn => "discard_drawn",
            PlayerAction::SwapDrawn { .. } => "swap_drawn",
            PlayerAction::UseSpecialCard(_) => "use_special_card",
            PlayerAction::SkipSpecialCard => "skip_special_card",
            PlayerAction::CallPablo => "call_pablo",
            PlayerAction::EndTurn => "end_turn",
            PlayerAction::StackOwn { .. } => "stack_own",
            PlayerAction::StackOpponent { .. } => "stack_opponent",
            PlayerAction::GiveCard { .. } => "give_card",
        }
    }
}

/// Apply `action` by `who`. Callers hold the match lock for the whole call.
pub fn apply_action(
    state: &mut MatchState,
    who: &str,
    action: PlayerAction,
) -> Result<Outcome, DomainError> {
    match action {
        PlayerAction::Join { name } => {
            state.add_player(who, &name)?;
            Ok(Outcome::default())
        }
        PlayerAction::StartMatch => {
            state.player(who)?;
            state.start()?;
            Ok(Outcome::default())
        }
        PlayerAction::Draw => draw(state, who),
        PlayerAction::DiscardDrawn => discard_drawn(state, who),
        PlayerAction::SwapDrawn { slot } => swap_drawn(state, who, slot),
        PlayerAction::UseSpecialCard(power) => use_special_card(state, who, power),
        PlayerAction::SkipSpecialCard => skip_special_card(state, who),
        PlayerAction::CallPablo => call_pablo(state, who),
        PlayerAction::EndTurn => end_turn(state, who),
        PlayerAction::StackOwn { slot } => stack_own(state, who, slot),
        PlayerAction::StackOpponent { target, slot } => stack_opponent(state, who, &target, slot),
        PlayerAction::GiveCard { source_slot } => give_card(state, who, source_slot),
    }
}
