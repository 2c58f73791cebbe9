//! One seat in a room: identity, hand, and per-game flags.
//!
//! The hand is the participant's ordered row of tiles; order is public
//! state because guesses address tiles by index. Non-joker tiles keep
//! the row in canonical (color, number) order, white before black. A
//! joker may sit anywhere its color's range allows, and incoming tiles
//! slide around it.

use serde::{Deserialize, Serialize};
use tilecode_protocol::{PlayerId, TileColor};

use crate::error::EngineError;
use crate::tile::Tile;

/// Upper bound of a fresh joker range. Chosen as the highest index a
/// 13-tile row can have; ranges only ever shrink from here.
pub const JOKER_RANGE_BACK: usize = 12;

/// The `[front, back]` window where a joker of one color may be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JokerRange {
    pub front: usize,
    pub back: usize,
}

impl JokerRange {
    fn fresh() -> Self {
        JokerRange {
            front: 0,
            back: JOKER_RANGE_BACK,
        }
    }

    pub fn contains(self, index: usize) -> bool {
        self.front <= index && index <= self.back
    }
}

impl Default for JokerRange {
    fn default() -> Self {
        Self::fresh()
    }
}

/// One seat's full state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    id: PlayerId,
    hand: Vec<Tile>,
    /// 1-based seat order, assigned when the game starts.
    turn_order: Option<u8>,
    ready: bool,
    white_range: JokerRange,
    black_range: JokerRange,
    retired: bool,
    connected: bool,
    /// Index of the most recent DRAW-phase tile. Starting hands do not
    /// set this; the miss penalty and the joker collision rule only care
    /// about the one tile drawn this turn-cycle.
    last_drawn: Option<usize>,
}

impl Participant {
    pub fn new(id: PlayerId) -> Self {
        Participant {
            id,
            hand: Vec::new(),
            turn_order: None,
            ready: false,
            white_range: JokerRange::fresh(),
            black_range: JokerRange::fresh(),
            retired: false,
            connected: true,
            last_drawn: None,
        }
    }

    // -- queries ----------------------------------------------------------

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn hand(&self) -> &[Tile] {
        &self.hand
    }

    pub fn turn_order(&self) -> Option<u8> {
        self.turn_order
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn is_retired(&self) -> bool {
        self.retired
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn last_drawn_index(&self) -> Option<usize> {
        self.last_drawn
    }

    pub fn joker_range(&self, color: TileColor) -> JokerRange {
        match color {
            TileColor::White => self.white_range,
            TileColor::Black => self.black_range,
        }
    }

    /// True once every tile in a non-empty hand is revealed.
    pub fn all_visible(&self) -> bool {
        !self.hand.is_empty() && self.hand.iter().all(Tile::is_visible)
    }

    // -- flag mutations (room-internal) -----------------------------------

    pub(crate) fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    pub(crate) fn set_turn_order(&mut self, order: u8) {
        self.turn_order = Some(order);
    }

    pub(crate) fn clear_turn_order(&mut self) {
        self.turn_order = None;
    }

    pub(crate) fn mark_retired(&mut self) {
        self.retired = true;
    }

    pub(crate) fn mark_disconnected(&mut self) {
        self.connected = false;
    }

    /// Clears everything a game accumulated: hand, ranges, retirement,
    /// the drawn-tile marker. Readiness and turn order are owned by the
    /// phase machine and reset separately.
    pub(crate) fn reset_game_state(&mut self) {
        self.hand.clear();
        self.white_range = JokerRange::fresh();
        self.black_range = JokerRange::fresh();
        self.retired = false;
        self.last_drawn = None;
    }

    // -- hand mutations ----------------------------------------------------

    /// Starting-hand grant: tiles slide into canonical positions and the
    /// drawn-tile marker stays unset.
    pub(crate) fn deal_tiles(&mut self, tiles: Vec<Tile>) {
        for tile in tiles {
            self.insert_sorted(tile);
        }
    }

    /// DRAW-phase grant: one tile in, marker set to where it landed.
    pub(crate) fn draw_tile(&mut self, tile: Tile) -> usize {
        let index = self.insert_sorted(tile);
        self.last_drawn = Some(index);
        index
    }

    /// Opens the tile at `index`, returning its now-public face.
    pub(crate) fn reveal_at(&mut self, index: usize) -> Result<Tile, EngineError> {
        let hand_size = self.hand.len();
        let tile = self
            .hand
            .get_mut(index)
            .ok_or(EngineError::IndexOutOfRange { index, hand_size })?;
        tile.reveal();
        Ok(*tile)
    }

    /// Relocates this seat's joker of `color` to `new_index`.
    ///
    /// Guards, in order: the joker must exist, the target must be a real
    /// hand position, it must lie inside the color's current range, and
    /// it must not be the slot of the still-undisclosed drawn tile
    /// (waived when the joker itself is that tile). On success the range
    /// front ratchets up to the committed position, so the window only
    /// ever narrows within a game.
    pub(crate) fn place_joker(
        &mut self,
        color: TileColor,
        new_index: usize,
    ) -> Result<usize, EngineError> {
        let joker_index = self
            .hand
            .iter()
            .position(|t| t.is_joker() && t.color() == color)
            .ok_or(EngineError::NoJoker { color })?;

        if new_index >= self.hand.len() {
            return Err(EngineError::IndexOutOfRange {
                index: new_index,
                hand_size: self.hand.len(),
            });
        }

        let range = self.joker_range(color);
        if !range.contains(new_index) {
            return Err(EngineError::JokerOutOfRange {
                index: new_index,
                front: range.front,
                back: range.back,
            });
        }

        let joker_is_drawn = self.last_drawn == Some(joker_index);
        if !joker_is_drawn && self.last_drawn == Some(new_index) {
            return Err(EngineError::DrawnIndexCollision { index: new_index });
        }

        let tile = self.hand.remove(joker_index);
        self.hand.insert(new_index, tile);

        if joker_is_drawn {
            // The drawn tile is the joker; the marker follows it.
            self.last_drawn = Some(new_index);
        } else if let Some(drawn) = self.last_drawn {
            // The move shifted everything between the two slots by one.
            let mut adjusted = drawn;
            if adjusted > joker_index {
                adjusted -= 1;
            }
            if adjusted >= new_index {
                adjusted += 1;
            }
            self.last_drawn = Some(adjusted);
        }

        match color {
            TileColor::White => self.white_range.front = new_index,
            TileColor::Black => self.black_range.front = new_index,
        }
        Ok(new_index)
    }

    /// Insertion position: before the first tile that sorts after the
    /// newcomer, scanning left to right. A repositioned joker is out of
    /// key order on purpose; the scan treats it like any other tile, so
    /// incoming tiles land before it when their key says so and push it
    /// rightward.
    fn insert_sorted(&mut self, tile: Tile) -> usize {
        let key = tile.sort_key();
        let index = self
            .hand
            .iter()
            .position(|t| t.sort_key() > key)
            .unwrap_or(self.hand.len());
        self.hand.insert(index, tile);
        index
    }
}

#[cfg(test)]
impl Participant {
    /// Test rigging: replace the hand wholesale.
    pub(crate) fn set_hand(&mut self, tiles: Vec<Tile>) {
        self.hand = tiles;
    }

    /// Test rigging: pretend the tile at `index` was just drawn.
    pub(crate) fn set_last_drawn(&mut self, index: Option<usize>) {
        self.last_drawn = index;
    }
}

// =========================================================================
// Tests
// =========================================================================
