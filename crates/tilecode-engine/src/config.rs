//! Per-room knobs.

use serde::{Deserialize, Serialize};

/// Fewest seats a game can start with.
pub const PLAYER_MIN_COUNT: usize = 2;
/// Most seats a room will accept.
pub const PLAYER_MAX_COUNT: usize = 4;

/// Settings fixed at room creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoomConfig {
    pub min_players: usize,
    pub max_players: usize,
    /// Fixed RNG seed for reproducible games. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for RoomConfig {
    fn default() -> Self {
        RoomConfig {
            min_players: PLAYER_MIN_COUNT,
            max_players: PLAYER_MAX_COUNT,
            seed: None,
        }
    }
}

/// Starting-hand size: four tiles with three or fewer seats, three with
/// a full table of four.
pub fn starting_hand_size(seated: usize) -> u8 {
    if seated < PLAYER_MAX_COUNT { 4 } else { 3 }
}
