//! # Tilecode
//!
//! Server-authoritative engine for a hidden-tile deduction game: two to
//! four players race to expose each other's numbered tiles while keeping
//! their own closed.
//!
//! The workspace splits into three layers, re-exported here under short
//! names:
//!
//! - [`protocol`]: identifiers, the signed tile encoding, per-viewer
//!   views, and change events.
//! - [`engine`]: the synchronous rules core. One [`engine::Room`] holds
//!   a full game and every mutation goes through its guarded ops.
//! - [`room`]: the async service layer. Each room runs as its own task;
//!   [`room::RoomManager`] routes participants to rooms.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use tilecode::prelude::*;
//!
//! // let mut manager = RoomManager::new();
//! // let room_id = manager.create_room(RoomConfig::default());
//! // manager.join_room(player_id, room_id, sender).await?;
//! // manager.set_ready(player_id, true).await?;
//! ```

pub use tilecode_engine as engine;
pub use tilecode_protocol as protocol;
pub use tilecode_room as room;

mod error;

pub use error::TilecodeError;

/// The names nearly every embedder needs.
pub mod prelude {
    pub use crate::TilecodeError;
    pub use tilecode_engine::{DisconnectOutcome, EngineError, Room, RoomConfig, RoomOp};
    pub use tilecode_protocol::{
        Phase, PlayerId, ProtocolError, Recipient, RoomEvent, RoomId, RoomView, TileCode,
        TileColor,
    };
    pub use tilecode_room::{
        ApplyReply, PlayerSender, RoomError, RoomHandle, RoomManager, RoomOutbound,
    };
}
