//! Game rules for Tilecode.
//!
//! Everything in this crate is synchronous and deterministic given a
//! seed. The engine owns the room phase machine, the tile economy, and
//! guess resolution; it knows nothing about tasks, channels, or who is
//! listening. Callers hand a [`Room`] one validated [`RoomOp`] at a
//! time and deliver the events it returns.
//!
//! # Key types
//!
//! - [`Room`]: the aggregate; all state changes go through
//!   [`Room::apply`] or the lobby/disconnect methods
//! - [`RoomOp`]: one in-game operation with its guard metadata
//! - [`Participant`]: a seat with its hand, joker ranges, and flags
//! - [`TilePools`]: the undrawn tiles, one pool per color
//! - [`EngineRng`]: seedable randomness so games can be replayed
//! - [`EngineError`]: every way a request can be refused
//!
//! # Concurrency contract
//!
//! A `Room` is not internally synchronized. Whatever owns one must
//! serialize mutation (the service crate runs one task per room); the
//! idempotency guards here then turn duplicate requests into clean
//! rejections instead of double effects.

mod config;
mod error;
mod participant;
mod phase;
mod pool;
mod rng;
mod room;
mod tile;

pub use config::{PLAYER_MAX_COUNT, PLAYER_MIN_COUNT, RoomConfig, starting_hand_size};
pub use error::EngineError;
pub use participant::{JOKER_RANGE_BACK, JokerRange, Participant};
pub use phase::RoomOp;
pub use pool::TilePools;
pub use rng::EngineRng;
pub use room::{DisconnectOutcome, Events, Room};
pub use tile::Tile;
