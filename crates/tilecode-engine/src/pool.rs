//! The two per-room tile pools and the draw rules.
//!
//! Pools are order-irrelevant bags; draws remove a uniformly random tile
//! from the requested color's bag, falling back to the other bag when
//! the requested one is empty. The fallback is documented behavior: the
//! caller may receive a tile of the color they did not ask for, and a
//! draw only fails once both bags are empty.

use serde::{Deserialize, Serialize};
use tilecode_protocol::{JOKER_NUMBER, NUMBERED_TILES_PER_COLOR, TileColor};

use crate::error::EngineError;
use crate::rng::EngineRng;
use crate::tile::Tile;

/// Both color pools of one room.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TilePools {
    white: Vec<Tile>,
    black: Vec<Tile>,
}

impl TilePools {
    /// Two empty bags; a room in the lobby holds no tiles.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Refills both bags with the numbered tiles 0..=11, discarding
    /// whatever remained. Jokers are not part of the initial fill; they
    /// are added at the START→DRAW edge via [`TilePools::add_jokers`].
    pub fn reset(&mut self) {
        self.white.clear();
        self.black.clear();
        for number in 0..NUMBERED_TILES_PER_COLOR {
            self.white.push(Tile::new(TileColor::White, number));
            self.black.push(Tile::new(TileColor::Black, number));
        }
    }

    /// Adds exactly one joker per color.
    pub fn add_jokers(&mut self) {
        self.white.push(Tile::new(TileColor::White, JOKER_NUMBER));
        self.black.push(Tile::new(TileColor::Black, JOKER_NUMBER));
    }

    /// Uniform destructive draw with cross-color fallback.
    pub fn draw_random(
        &mut self,
        color: TileColor,
        rng: &mut EngineRng,
    ) -> Result<Tile, EngineError> {
        let from = if self.pool(color).is_empty() {
            color.other()
        } else {
            color
        };
        let bag = self.pool_mut(from);
        if bag.is_empty() {
            return Err(EngineError::PoolsExhausted);
        }
        let picked = rng.index(bag.len());
        Ok(bag.swap_remove(picked))
    }

    /// Tiles remaining across both bags.
    pub fn remaining(&self) -> usize {
        self.white.len() + self.black.len()
    }

    /// Tiles remaining in one bag.
    pub fn remaining_of(&self, color: TileColor) -> usize {
        self.pool(color).len()
    }

    fn pool(&self, color: TileColor) -> &Vec<Tile> {
        match color {
            TileColor::White => &self.white,
            TileColor::Black => &self.black,
        }
    }

    fn pool_mut(&mut self, color: TileColor) -> &mut Vec<Tile> {
        match color {
            TileColor::White => &mut self.white,
            TileColor::Black => &mut self.black,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn rng() -> EngineRng {
        EngineRng::with_seed(0xBA6)
    }

    // =====================================================================
    // reset / add_jokers
    // =====================================================================

    #[test]
    fn test_reset_fills_twelve_per_color() {
        let mut pools = TilePools::empty();
        pools.reset();
        assert_eq!(pools.remaining_of(TileColor::White), 12);
        assert_eq!(pools.remaining_of(TileColor::Black), 12);
        assert_eq!(pools.remaining(), 24);
    }

    #[test]
    fn test_reset_discards_leftovers() {
        let mut pools = TilePools::empty();
        pools.reset();
        let mut r = rng();
        let _ = pools.draw_random(TileColor::White, &mut r).unwrap();
        pools.reset();
        assert_eq!(pools.remaining(), 24);
    }

    #[test]
    fn test_add_jokers_brings_total_to_twenty_six() {
        let mut pools = TilePools::empty();
        pools.reset();
        pools.add_jokers();
        assert_eq!(pools.remaining(), 26);
        assert_eq!(pools.remaining_of(TileColor::White), 13);
    }

    // =====================================================================
    // draw_random
    // =====================================================================

    #[test]
    fn test_draw_removes_from_requested_color() {
        let mut pools = TilePools::empty();
        pools.reset();
        let mut r = rng();
        let tile = pools.draw_random(TileColor::Black, &mut r).unwrap();
        assert_eq!(tile.color(), TileColor::Black);
        assert_eq!(pools.remaining_of(TileColor::Black), 11);
        assert_eq!(pools.remaining_of(TileColor::White), 12);
    }

    #[test]
    fn test_draw_never_repeats_a_tile_within_a_reset() {
        let mut pools = TilePools::empty();
        pools.reset();
        let mut r = rng();
        let mut seen = HashSet::new();
        for _ in 0..12 {
            let tile = pools.draw_random(TileColor::White, &mut r).unwrap();
            assert!(tile.number() <= 12);
            assert!(
                seen.insert((tile.color(), tile.number())),
                "tile {}:{} drawn twice",
                tile.color(),
                tile.number()
            );
        }
    }

    #[test]
    fn test_draw_falls_back_to_other_color_when_empty() {
        let mut pools = TilePools::empty();
        pools.reset();
        let mut r = rng();
        // Empty the white bag.
        for _ in 0..12 {
            pools.draw_random(TileColor::White, &mut r).unwrap();
        }
        // The white request silently yields a black tile.
        let tile = pools.draw_random(TileColor::White, &mut r).unwrap();
        assert_eq!(tile.color(), TileColor::Black);
    }

    #[test]
    fn test_draw_succeeds_while_any_tile_remains() {
        let mut pools = TilePools::empty();
        pools.reset();
        pools.add_jokers();
        let mut r = rng();
        for i in 0..26 {
            let result = pools.draw_random(TileColor::White, &mut r);
            assert!(result.is_ok(), "draw {i} failed with tiles remaining");
        }
        assert_eq!(pools.remaining(), 0);
    }

    #[test]
    fn test_draw_from_two_empty_pools_is_an_error() {
        let mut pools = TilePools::empty();
        let mut r = rng();
        assert!(matches!(
            pools.draw_random(TileColor::White, &mut r),
            Err(EngineError::PoolsExhausted)
        ));
    }

    #[test]
    fn test_drawn_numbers_cover_the_full_band() {
        // Drain one color completely; together the numbers must be
        // exactly 0..=11 plus the joker.
        let mut pools = TilePools::empty();
        pools.reset();
        pools.add_jokers();
        let mut r = rng();
        let mut numbers: Vec<u8> = (0..13)
            .map(|_| pools.draw_random(TileColor::Black, &mut r).unwrap())
            .map(|t| t.number())
            .collect();
        numbers.sort_unstable();
        assert_eq!(numbers, (0..=12).collect::<Vec<u8>>());
    }
}
