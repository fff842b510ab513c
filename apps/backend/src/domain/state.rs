use std::collections::{HashMap, HashSet, VecDeque};

use serde::Serialize;
use tracing::info;

use crate::domain::dealing::deal_grids;
use crate::domain::rules::{GRID_SLOTS, MAX_PLAYERS, MIN_PLAYERS};
use crate::domain::{count_cards, Card, Rank};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};

pub type PlayerId = String;
pub type MatchId = String;

/// Lifecycle of a match. `Ended` is terminal.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Waiting,
    Playing,
    Ended,
}

/// Why a round finished.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum EndTrigger {
    /// Rotation came back to the player who called Pablo.
    PabloCalled { caller: PlayerId },
    /// Someone tried to draw from an empty deck.
    DeckExhausted,
    /// A player ran out of cards.
    ZeroCards { player_id: PlayerId },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Slots 0..4 are the grid; later slots are penalty cards in the order
    /// they were received. Slots are emptied, never removed.
    pub hand: Vec<Option<Card>>,
    pub score: i32,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            hand: vec![None; GRID_SLOTS],
            score: 0,
        }
    }

    pub fn card_count(&self) -> usize {
        count_cards(&self.hand)
    }

    /// Card at `slot`, checking both the bound and occupancy.
    pub fn card_at(&self, slot: usize) -> Result<Card, DomainError> {
        match self.hand.get(slot) {
            None => Err(DomainError::validation(
                ValidationKind::InvalidSlot,
                format!("{} has no slot {slot}", self.id),
            )),
            Some(None) => Err(DomainError::validation(
                ValidationKind::EmptySlot,
                format!("slot {slot} of {} is empty", self.id),
            )),
            Some(Some(card)) => Ok(*card),
        }
    }
}

/// The card the current player has drawn but not yet placed.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnCard {
    pub player_id: PlayerId,
    pub card: Card,
}

/// A replacement card owed after stacking an opponent's card away.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingGive {
    pub actor_id: PlayerId,
    pub target_player_id: PlayerId,
    pub target_slot: usize,
}

/// Entire match container; the unit of locking and mutation.
#[derive(Debug, Clone)]
pub struct MatchState {
    pub id: MatchId,
    /// Join order; drives turn rotation.
    pub seating: Vec<PlayerId>,
    pub players: HashMap<PlayerId, Player>,
    /// Draw from the front.
    pub deck: VecDeque<Card>,
    /// Top is the last element.
    pub discard_pile: Vec<Card>,
    pub status: MatchStatus,
    /// Player whose turn it is. `None` until the match starts.
    pub current_player: Option<PlayerId>,
    pub drawn_card: Option<DrawnCard>,
    /// Players who drew during the current rotation.
    pub has_drawn: HashSet<PlayerId>,
    /// Unresolved 7/8/9 power sitting on top of the discard pile.
    pub pending_special: Option<Rank>,
    /// Index of the discard card open to stacking.
    pub stackable_index: Option<usize>,
    /// Players owed a turn with the pending power, in the order they earned it.
    pub stack_queue: VecDeque<PlayerId>,
    pub pending_give: Option<PendingGive>,
    pub pablo_called: bool,
    pub pablo_caller: Option<PlayerId>,
    pub end_trigger: Option<EndTrigger>,
}

impl MatchState {
    /// New waiting match around an already shuffled deck.
    pub fn new(id: impl Into<MatchId>, deck: VecDeque<Card>) -> Self {
        Self {
            id: id.into(),
            seating: Vec::new(),
            players: HashMap::new(),
            deck,
            discard_pile: Vec::new(),
            status: MatchStatus::Waiting,
            current_player: None,
            drawn_card: None,
            has_drawn: HashSet::new(),
            pending_special: None,
            stackable_index: None,
            stack_queue: VecDeque::new(),
            pending_give: None,
            pablo_called: false,
            pablo_caller: None,
            end_trigger: None,
        }
    }

    /// Seat a player. Only while waiting, at most six seats.
    pub fn add_player(&mut self, id: &str, name: &str) -> Result<(), DomainError> {
        if self.status != MatchStatus::Waiting {
            return Err(DomainError::validation(
                ValidationKind::AlreadyStarted,
                "Players can only join before the match starts",
            ));
        }
        if self.players.contains_key(id) {
            return Err(DomainError::validation(
                ValidationKind::AlreadySeated,
                format!("{id} is already seated"),
            ));
        }
        if self.seating.len() >= MAX_PLAYERS {
            return Err(DomainError::conflict(
                ConflictKind::MatchFull,
                format!("Match is full ({MAX_PLAYERS} players)"),
            ));
        }

        self.seating.push(id.to_string());
        self.players.insert(id.to_string(), Player::new(id, name));
        Ok(())
    }

    /// Deal four cards per seat and hand the first turn to the first seat.
    pub fn start(&mut self) -> Result<(), DomainError> {
        if self.status != MatchStatus::Waiting {
            return Err(DomainError::validation(
                ValidationKind::AlreadyStarted,
                "Match already started",
            ));
        }
        if self.seating.len() < MIN_PLAYERS {
            return Err(DomainError::validation(
                ValidationKind::NotEnoughPlayers,
                format!("Need at least {MIN_PLAYERS} players to start"),
            ));
        }

        let grids = deal_grids(&mut self.deck, self.seating.len()).ok_or_else(|| {
            DomainError::validation_other("Invariant violated: deck too small to deal")
        })?;
        for (seat, grid) in self.seating.iter().zip(grids) {
            if let Some(player) = self.players.get_mut(seat) {
                player.hand = grid;
            }
        }

        self.status = MatchStatus::Playing;
        self.current_player = self.seating.first().cloned();
        info!(
            match_id = %self.id,
            players = self.seating.len(),
            "Match started"
        );
        Ok(())
    }

    pub fn player(&self, id: &str) -> Result<&Player, DomainError> {
        self.players
            .get(id)
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Player, format!("Unknown player {id}")))
    }

    pub fn player_mut(&mut self, id: &str) -> Result<&mut Player, DomainError> {
        self.players
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Player, format!("Unknown player {id}")))
    }

    pub fn discard_top(&self) -> Option<&Card> {
        self.discard_pile.last()
    }

    /// True when the top discard card is open to stacking.
    pub fn stacking_enabled(&self) -> bool {
        match (self.stackable_index, self.discard_pile.len()) {
            (Some(idx), len) if len > 0 => idx == len - 1,
            _ => false,
        }
    }

    pub fn is_current(&self, id: &str) -> bool {
        self.current_player.as_deref() == Some(id)
    }

    /// Seat after `id` in join order, wrapping around.
    pub fn next_seat(&self, id: &str) -> Option<&PlayerId> {
        let idx = self.seating.iter().position(|seat| seat == id)?;
        self.seating.get((idx + 1) % self.seating.len())
    }

    /// Every physical card currently on the table.
    ///
    /// Always 52 between operations.
    pub fn card_total(&self) -> usize {
        let in_hands: usize = self.players.values().map(Player::card_count).sum();
        self.deck.len() + self.discard_pile.len() + in_hands + usize::from(self.drawn_card.is_some())
    }

    pub fn require_playing(&self) -> Result<(), DomainError> {
        match self.status {
            MatchStatus::Playing => Ok(()),
            MatchStatus::Waiting => Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Match has not started",
            )),
            MatchStatus::Ended => Err(DomainError::validation(
                ValidationKind::MatchEnded,
                "Match has ended",
            )),
        }
    }

    pub fn require_current(&self, id: &str) -> Result<(), DomainError> {
        if self.is_current(id) {
            Ok(())
        } else {
            Err(DomainError::validation(
                ValidationKind::OutOfTurn,
                format!("It is not {id}'s turn"),
            ))
        }
    }

    /// While `id` owes a give-back, giving is the only thing they may do.
    pub fn require_no_debt(&self, id: &str) -> Result<(), DomainError> {
        match &self.pending_give {
            Some(give) if give.actor_id == id => Err(DomainError::validation(
                ValidationKind::GiveBackPending,
                format!(
                    "{id} must give a card to {} before doing anything else",
                    give.target_player_id
                ),
            )),
            _ => Ok(()),
        }
    }

    /// Put a card face up on the discard pile, open it to stacking and arm
    /// or lapse the special power.
    pub(crate) fn place_on_discard(&mut self, card: Card) {
        self.discard_pile.push(card.turned_up());
        self.stackable_index = Some(self.discard_pile.len() - 1);
        if card.rank.is_special() {
            self.pending_special = Some(card.rank);
        } else {
            self.pending_special = None;
            self.stack_queue.clear();
        }
    }

    /// First seated player with no cards left, in seating order.
    pub fn player_without_cards(&self) -> Option<&PlayerId> {
        self.seating.iter().find(|seat| {
            self.players
                .get(seat.as_str())
                .is_some_and(|p| p.card_count() == 0)
        })
    }
}
