//! Error types for the game engine.
//!
//! Every variant is a caller-correctable validation failure; none of them
//! poisons the room. The four families mirror how callers should react:
//!
//! - **Synchronization** (`PhaseMismatch`, `TurnMismatch`, `NotCurrent`,
//!   `AlreadyReady`): the caller's view of the room is stale. Re-fetch a
//!   snapshot and retry if still applicable. Duplicate and late requests
//!   land here by design and change nothing.
//! - **Capacity** (`RoomFull`, `NotEnoughParticipants`, `NotAllReady`,
//!   `AlreadySeated`): the lobby cannot satisfy the request.
//! - **Allocation** (`InvalidTileCount`, `UnknownParticipant`,
//!   `IndexOutOfRange`, `NoJoker`, `SelfGuess`, `TargetRetired`,
//!   `TileAlreadyVisible`, `PoolsExhausted`): the request references
//!   something that does not exist or adds up wrong.
//! - **Range** (`JokerOutOfRange`, `DrawnIndexCollision`): a joker
//!   placement outside its legal window.
//!
//! Engine operations are all-or-nothing: an `Err` return means no state
//! changed. (The service layer's corrective grant after a bad
//! `drawAtStart` split is a separate, deliberate follow-up operation.)

use tilecode_protocol::{Phase, PlayerId, TileColor};

/// Errors produced by room and participant operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    // -- Synchronization --
    /// The room is in a phase where this operation has no edge.
    #[error("{op} is not valid while the room is in {actual}")]
    PhaseMismatch { op: &'static str, actual: Phase },

    /// The caller's turn token does not match the current turn pointer.
    #[error("turn token {got} does not match current turn {expected}")]
    TurnMismatch { expected: u8, got: u8 },

    /// A seat-keyed operation was attempted by a seat that is not current.
    #[error("participant {0} is not the current seat")]
    NotCurrent(PlayerId),

    /// The current seat already holds this phase's grant. This is the
    /// idempotency guard absorbing duplicate auto-progress calls.
    #[error("current participant is already ready")]
    AlreadyReady,

    // -- Capacity --
    /// The room has no free seat.
    #[error("room is full ({max} seats)")]
    RoomFull { max: usize },

    /// Too few seats taken to start a game.
    #[error("{seated} participants seated, {min} required to start")]
    NotEnoughParticipants { seated: usize, min: usize },

    /// Not every seated participant is ready.
    #[error("not all participants are ready")]
    NotAllReady,

    /// The participant already holds a seat in this room.
    #[error("participant {0} is already seated")]
    AlreadySeated(PlayerId),

    // -- Allocation --
    /// A starting-hand split that does not sum to the required count.
    #[error("requested {white} white + {black} black, starting hand is {expected}")]
    InvalidTileCount { white: u8, black: u8, expected: u8 },

    /// The referenced participant holds no seat in this room.
    #[error("participant {0} is not in this room")]
    UnknownParticipant(PlayerId),

    /// A hand index past the end of the referenced hand.
    #[error("index {index} out of range for hand of {hand_size}")]
    IndexOutOfRange { index: usize, hand_size: usize },

    /// The hand holds no joker of the requested color.
    #[error("no {color} joker in hand")]
    NoJoker { color: TileColor },

    /// A guess aimed at the guesser's own hand.
    #[error("participant {0} cannot guess their own hand")]
    SelfGuess(PlayerId),

    /// A guess aimed at a seat that is already out of play.
    #[error("participant {0} is retired and cannot be targeted")]
    TargetRetired(PlayerId),

    /// A guess aimed at a tile whose number is already public.
    #[error("tile at index {index} is already revealed")]
    TileAlreadyVisible { index: usize },

    /// Both pools are empty; nothing can be drawn.
    #[error("both tile pools are exhausted")]
    PoolsExhausted,

    // -- Range --
    /// A joker placement outside the color's current `[front, back]` window.
    #[error("index {index} outside joker range [{front}, {back}]")]
    JokerOutOfRange {
        index: usize,
        front: usize,
        back: usize,
    },

    /// A joker placement onto the still-undisclosed newly drawn tile.
    #[error("index {index} collides with the undisclosed drawn tile")]
    DrawnIndexCollision { index: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_error_messages_carry_both_sides() {
        let err = EngineError::TurnMismatch {
            expected: 2,
            got: 4,
        };
        assert_eq!(
            err.to_string(),
            "turn token 4 does not match current turn 2"
        );
    }

    #[test]
    fn test_phase_mismatch_names_the_operation() {
        let err = EngineError::PhaseMismatch {
            op: "closeDraw",
            actual: Phase::Sort,
        };
        assert_eq!(
            err.to_string(),
            "closeDraw is not valid while the room is in SORT"
        );
    }

    #[test]
    fn test_range_error_shows_window() {
        let err = EngineError::JokerOutOfRange {
            index: 1,
            front: 3,
            back: 12,
        };
        assert_eq!(err.to_string(), "index 1 outside joker range [3, 12]");
    }
}
