//! Room service layer: one actor task per room.
//!
//! Each room runs as a dedicated tokio task owning its
//! [`Room`](tilecode_engine::Room) outright, so game state is never
//! shared or locked. Callers talk to rooms through cloneable
//! [`RoomHandle`]s, and the [`RoomManager`] keeps the directory of live
//! rooms plus the participant-to-room index.
//!
//! Key types:
//! - [`RoomManager`]: creates, tracks, and destroys rooms.
//! - [`RoomHandle`]: async request surface of a single room.
//! - [`RoomOutbound`]: what a seated participant receives on their
//!   channel (full views and incremental events).
//! - [`ApplyReply`]: the caller-facing result of a state operation.

mod error;
mod manager;
mod room;

pub use error::RoomError;
pub use manager::RoomManager;
pub use room::{ApplyReply, PlayerSender, RoomHandle, RoomOutbound};
