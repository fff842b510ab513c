//! RNG seed derivation utilities for deterministic dealing.
//!
//! A configured base seed is mixed with the match id so that every match
//! gets its own reproducible shuffle.

/// Derive the shuffle seed for one match.
///
/// Same base seed + same match id = same deck order. Different match ids
/// under one base seed produce unrelated decks.
pub fn derive_match_seed(base_seed: u64, match_id: &str) -> u64 {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&base_seed.to_le_bytes());
    hasher.update(match_id.as_bytes());
    let digest = hasher.finalize();

    let mut first = [0u8; 8];
    first.copy_from_slice(&digest.as_bytes()[..8]);
    u64::from_le_bytes(first)
}
