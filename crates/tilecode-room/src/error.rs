//! Error types for the room service layer.

use tilecode_engine::EngineError;
use tilecode_protocol::{PlayerId, RoomId};

/// Errors surfaced by the manager and room handles.
///
/// Rule violations from inside a room pass through as
/// [`RoomError::Engine`]; everything else is about routing a request to
/// a live room.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// The room does not exist.
    #[error("room {0} not found")]
    NotFound(RoomId),

    /// The room's command channel is full or its actor is gone.
    #[error("room {0} is unavailable")]
    Unavailable(RoomId),

    /// The participant already sits in a room.
    #[error("participant {0} is already in room {1}")]
    AlreadyInRoom(PlayerId, RoomId),

    /// The participant sits in no room, so there is nowhere to route.
    #[error("participant {0} is not in any room")]
    NotInRoom(PlayerId),

    /// A game-rule rejection from the engine.
    #[error(transparent)]
    Engine(#[from] EngineError),
}
