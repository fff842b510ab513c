//! Fixed table rules.

/// Cards in a standard deck.
pub const DECK_SIZE: usize = 52;

/// Dealt positions per player; slots past this are penalty slots.
pub const GRID_SLOTS: usize = 4;

/// Seats per match.
pub const MAX_PLAYERS: usize = 6;

/// Seats required before a match can start.
pub const MIN_PLAYERS: usize = 2;

/// True if `slot` addresses one of the four dealt positions.
#[inline]
pub fn is_grid_slot(slot: usize) -> bool {
    slot < GRID_SLOTS
}
