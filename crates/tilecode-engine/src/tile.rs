//! The tile value type.
//!
//! A tile's color and number are fixed at creation; only `visible`
//! mutates, and it only ever opens. The two projection methods implement
//! the visibility policy: what the owner sees versus what the table
//! shows everyone else.

use serde::{Deserialize, Serialize};
use tilecode_protocol::{JOKER_NUMBER, TileCode, TileColor};

/// One colored, numbered token. Number 12 is the joker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    color: TileColor,
    number: u8,
    visible: bool,
}

impl Tile {
    /// A closed tile. Tiles normally enter play through a pool reset;
    /// this is public so tests and tools can build hands directly.
    pub fn new(color: TileColor, number: u8) -> Self {
        debug_assert!(number <= JOKER_NUMBER);
        Tile {
            color,
            number,
            visible: false,
        }
    }

    pub fn color(&self) -> TileColor {
        self.color
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_joker(&self) -> bool {
        self.number == JOKER_NUMBER
    }

    /// Opens the tile. There is no inverse; a revealed tile stays
    /// revealed until the room resets and recreates its tiles.
    pub(crate) fn reveal(&mut self) {
        self.visible = true;
    }

    /// Ordering key for canonical hands: white before black, then by
    /// number. Jokers sort after 11 within their color until their owner
    /// repositions them.
    pub fn sort_key(&self) -> (u8, u8) {
        let color_rank = match self.color {
            TileColor::White => 0,
            TileColor::Black => 1,
        };
        (color_rank, self.number)
    }

    /// The owner's view: always the true face.
    pub fn owner_code(&self) -> TileCode {
        TileCode::open(self.color, self.number)
    }

    /// Any other viewer's view. Jokers always present as the colored 12
    /// (that is their true number); closed non-jokers present as the
    /// colored 13 sentinel; revealed tiles present their true face.
    pub fn public_code(&self) -> TileCode {
        if self.is_joker() {
            TileCode::joker(self.color)
        } else if self.visible {
            TileCode::open(self.color, self.number)
        } else {
            TileCode::hidden(self.color)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tiles_are_closed() {
        let tile = Tile::new(TileColor::White, 4);
        assert!(!tile.is_visible());
        assert_eq!(tile.color(), TileColor::White);
        assert_eq!(tile.number(), 4);
    }

    #[test]
    fn test_reveal_opens_permanently() {
        let mut tile = Tile::new(TileColor::Black, 9);
        tile.reveal();
        assert!(tile.is_visible());
        // A second reveal is a no-op, not a toggle.
        tile.reveal();
        assert!(tile.is_visible());
    }

    #[test]
    fn test_joker_is_number_twelve() {
        assert!(Tile::new(TileColor::White, 12).is_joker());
        assert!(!Tile::new(TileColor::White, 11).is_joker());
    }

    #[test]
    fn test_sort_key_puts_white_before_black() {
        let white_11 = Tile::new(TileColor::White, 11);
        let black_0 = Tile::new(TileColor::Black, 0);
        assert!(white_11.sort_key() < black_0.sort_key());
    }

    #[test]
    fn test_owner_always_sees_true_number() {
        let closed = Tile::new(TileColor::Black, 7);
        assert_eq!(closed.owner_code(), TileCode::open(TileColor::Black, 7));
    }

    #[test]
    fn test_public_view_of_closed_tile_is_sentinel() {
        let closed = Tile::new(TileColor::Black, 7);
        assert_eq!(closed.public_code(), TileCode::hidden(TileColor::Black));
        assert_eq!(closed.public_code().code, -13);
    }

    #[test]
    fn test_public_view_of_revealed_tile_is_true_face() {
        let mut tile = Tile::new(TileColor::White, 2);
        tile.reveal();
        assert_eq!(tile.public_code(), TileCode::open(TileColor::White, 2));
    }

    #[test]
    fn test_public_view_of_joker_is_twelve_even_closed() {
        // A joker's "hidden" face still announces it is a joker; that is
        // the documented encoding, since 12 is also its true number.
        let closed_joker = Tile::new(TileColor::Black, 12);
        assert_eq!(
            closed_joker.public_code(),
            TileCode::joker(TileColor::Black)
        );
        assert_eq!(closed_joker.public_code().code, -12);
    }
}
