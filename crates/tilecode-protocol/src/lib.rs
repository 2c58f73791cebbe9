//! Shared vocabulary for Tilecode.
//!
//! This crate defines every type that crosses a layer boundary:
//!
//! - **Identifiers** ([`PlayerId`], [`RoomId`]) and the shared enums
//!   ([`TileColor`], [`Phase`], [`Recipient`]).
//! - **Tile encoding** ([`TileCode`]): the signed-integer wire form
//!   that enforces the hidden-information policy.
//! - **Views** ([`RoomView`], [`ParticipantView`]): per-viewer
//!   snapshots with the encoding already applied.
//! - **Events** ([`RoomEvent`]): what a room operation changed, for
//!   the delivery layer to fan out.
//!
//! # Architecture
//!
//! The protocol crate is the leaf of the workspace. It knows nothing
//! about rules or rooms; it only fixes representations so that engine,
//! service, and any external transport agree on shapes.
//!
//! ```text
//! tilecode-protocol (shapes) ← tilecode-engine (rules) ← tilecode-room (service)
//! ```

mod error;
mod event;
mod tile_code;
mod types;
mod view;

pub use error::ProtocolError;
pub use event::RoomEvent;
pub use tile_code::{
    HIDDEN_NUMBER, JOKER_NUMBER, NUMBERED_TILES_PER_COLOR, TileCode,
};
pub use types::{Phase, PlayerId, Recipient, RoomId, TileColor};
pub use view::{ParticipantView, RoomView};
