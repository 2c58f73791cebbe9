//! Unified error type for the Tilecode stack.

use tilecode_engine::EngineError;
use tilecode_protocol::ProtocolError;
use tilecode_room::RoomError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `tilecode` meta-crate, you deal with this single
/// error type instead of importing errors from each sub-crate.
/// The `#[from]` attribute on each variant auto-generates `From` impls,
/// so the `?` operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum TilecodeError {
    /// A protocol-level error (tile encoding, wire validation).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A rules-level error (guards, pools, hand manipulation).
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// A service-level error (routing, room lookup, dead actors).
    #[error(transparent)]
    Room(#[from] RoomError),
}
