use serde::{Deserialize, Serialize};

use crate::domain::events::SlotCard;
use crate::domain::{Card, MatchView, PlayerAction, Rank, SlotRef, SpecialCardUse};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::errors::ErrorCode;

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ClientMsg {
    Join {
        match_id: String,
        player_id: String,
        #[serde(default)]
        name: String,
    },
    StartMatch,
    Draw,
    DiscardDrawn,
    SwapDrawn {
        slot: usize,
    },
    UseSpecialCard {
        rank: Rank,
        #[serde(default)]
        params: SpecialParams,
    },
    SkipSpecialCard,
    CallPablo,
    EndTurn,
    StackOwn {
        slot: usize,
    },
    StackOpponent {
        target_player_id: String,
        slot: usize,
    },
    GiveCard {
        source_slot: usize,
    },
}

/// Targets for a special card; which fields are needed depends on the rank.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialParams {
    /// 7 and 8.
    pub slot: Option<usize>,
    /// 8.
    pub target_player_id: Option<String>,
    /// 9.
    pub first: Option<SlotRef>,
    /// 9.
    pub second: Option<SlotRef>,
}

fn missing(what: &str, rank: Rank) -> DomainError {
    DomainError::validation(
        ValidationKind::MissingParams,
        format!("A {} needs {what}", rank.as_str()),
    )
}

impl SpecialParams {
    pub fn into_use(self, rank: Rank) -> Result<SpecialCardUse, DomainError> {
        match rank {
            Rank::Seven => Ok(SpecialCardUse::Peek {
                slot: self.slot.ok_or_else(|| missing("a slot", rank))?,
            }),
            Rank::Eight => Ok(SpecialCardUse::Spy {
                target: self
                    .target_player_id
                    .ok_or_else(|| missing("a target player", rank))?,
                slot: self.slot.ok_or_else(|| missing("a slot", rank))?,
            }),
            Rank::Nine => Ok(SpecialCardUse::Swap {
                first: self.first.ok_or_else(|| missing("two positions", rank))?,
                second: self.second.ok_or_else(|| missing("two positions", rank))?,
            }),
            other => Err(DomainError::validation(
                ValidationKind::InvalidTarget,
                format!("{} is not a special card", other.as_str()),
            )),
        }
    }
}

impl ClientMsg {
    /// Turn a message from a joined connection into a match action.
    pub fn into_action(self) -> Result<PlayerAction, DomainError> {
        Ok(match self {
            ClientMsg::Join { name, .. } => PlayerAction::Join { name },
            ClientMsg::StartMatch => PlayerAction::StartMatch,
            ClientMsg::Draw => PlayerAction::Draw,
            ClientMsg::DiscardDrawn => PlayerAction::DiscardDrawn,
            ClientMsg::SwapDrawn { slot } => PlayerAction::SwapDrawn { slot },
            ClientMsg::UseSpecialCard { rank, params } => {
                PlayerAction::UseSpecialCard(params.into_use(rank)?)
            }
            ClientMsg::SkipSpecialCard => PlayerAction::SkipSpecialCard,
            ClientMsg::CallPablo => PlayerAction::CallPablo,
            ClientMsg::EndTurn => PlayerAction::EndTurn,
            ClientMsg::StackOwn { slot } => PlayerAction::StackOwn { slot },
            ClientMsg::StackOpponent {
                target_player_id,
                slot,
            } => PlayerAction::StackOpponent {
                target: target_player_id,
                slot,
            },
            ClientMsg::GiveCard { source_slot } => PlayerAction::GiveCard { source_slot },
        })
    }
}

/// One side of a public 9 swap, as it was before the swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapSide {
    pub player_id: String,
    pub slot: usize,
    pub card: Card,
}

impl From<&SlotCard> for SwapSide {
    fn from(side: &SlotCard) -> Self {
        Self {
            player_id: side.player_id.clone(),
            slot: side.slot,
            card: side.card.turned_up(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ServerMsg {
    Ack {
        message: &'static str,
    },

    StateSnapshot {
        game: Box<MatchView>,
    },

    PrivateCardReveal {
        target_player_id: String,
        slot: usize,
        card: Card,
    },

    PublicSwapEvent {
        first: SwapSide,
        second: SwapSide,
    },

    PublicStackResult {
        actor_id: String,
        actor_name: String,
        success: bool,
    },

    ActionRejected {
        code: ErrorCode,
        message: String,
    },
}

impl ServerMsg {
    pub fn rejected(code: ErrorCode, message: impl Into<String>) -> Self {
        ServerMsg::ActionRejected {
            code,
            message: message.into(),
        }
    }
}
