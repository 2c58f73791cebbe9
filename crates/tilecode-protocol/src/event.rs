//! Room event objects.
//!
//! Every mutating room operation returns a list of `(Recipient, RoomEvent)`
//! pairs describing exactly what changed. The service layer delivers them
//! and otherwise stays out of game semantics; nothing in the core fires a
//! broadcast as a side effect.
//!
//! Visibility discipline: an event addressed to `All`/`AllExcept` may only
//! carry information the table shows everyone (colors, positions, counts,
//! revealed numbers). True codes for closed tiles travel exclusively in
//! [`RoomEvent::TilesGranted`] addressed to the owning seat.

use serde::{Deserialize, Serialize};

use crate::tile_code::TileCode;
use crate::types::{Phase, PlayerId, TileColor};

/// What a room operation changed.
///
/// Internally tagged so the wire form is `{"type": "TileDrawn", ...}`,
/// the same shape for every variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RoomEvent {
    // -- Lobby --
    /// A seat was taken.
    ParticipantJoined {
        player_id: PlayerId,
        seats_taken: usize,
    },

    /// A seat was vacated (lobby leave or game-over eviction).
    ParticipantLeft { player_id: PlayerId },

    /// A lobby ready flag was toggled.
    ReadyChanged { player_id: PlayerId, ready: bool },

    // -- Game lifecycle --
    /// The game started: pools reset and seats shuffled. `turn_order`
    /// lists the seats first-to-last; the room is now in SETTING.
    GameStarted { turn_order: Vec<PlayerId> },

    /// A phase edge was closed.
    PhaseClosed { phase: Phase, next: Phase },

    /// The turn pointer moved to a new current seat.
    TurnAdvanced {
        turn_pointer: usize,
        player_id: PlayerId,
    },

    /// The game ended; the room is in GAMEOVER until the winner closes it.
    GameOver { winner: PlayerId },

    /// The room was reset back to the lobby.
    RoomReset,

    // -- Tile movement --
    /// A seat received its starting hand. Public counterpart of
    /// `TilesGranted`: the white/black split is visible at the table.
    TilesDealt {
        player_id: PlayerId,
        white: u8,
        black: u8,
    },

    /// A seat drew one tile during DRAW. The color and the insert
    /// position are public; the number is not.
    TileDrawn {
        player_id: PlayerId,
        color: TileColor,
        hand_index: usize,
    },

    /// Owner-only: the true codes of tiles just granted to this seat.
    TilesGranted {
        player_id: PlayerId,
        tiles: Vec<TileCode>,
    },

    /// A joker moved to a new position within its owner's hand.
    JokerPlaced {
        player_id: PlayerId,
        color: TileColor,
        index: usize,
    },

    // -- Guessing --
    /// A guess was resolved against `target`'s hand.
    GuessResolved {
        guesser: PlayerId,
        target: PlayerId,
        index: usize,
        number: u8,
        matched: bool,
    },

    /// A tile is now permanently visible; the code is its true face.
    TileRevealed {
        owner: PlayerId,
        index: usize,
        tile: TileCode,
    },

    /// A seat's entire hand is visible; it takes no further turns.
    ParticipantRetired { player_id: PlayerId },

    // -- Disconnects --
    /// A mid-game disconnect froze this seat.
    ParticipantDisconnected { player_id: PlayerId },
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_is_internally_tagged() {
        let event = RoomEvent::TileDrawn {
            player_id: PlayerId(3),
            color: TileColor::Black,
            hand_index: 2,
        };
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "TileDrawn");
        assert_eq!(json["player_id"], 3);
        assert_eq!(json["color"], "BLACK");
        assert_eq!(json["hand_index"], 2);
    }

    #[test]
    fn test_unit_variant_serializes_with_tag_only() {
        let json: serde_json::Value =
            serde_json::to_value(&RoomEvent::RoomReset).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "RoomReset" }));
    }

    #[test]
    fn test_guess_resolved_round_trip() {
        let event = RoomEvent::GuessResolved {
            guesser: PlayerId(1),
            target: PlayerId(2),
            index: 0,
            number: 11,
            matched: true,
        };
        let bytes = serde_json::to_vec(&event).unwrap();
        let decoded: RoomEvent = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(event, decoded);
    }

    #[test]
    fn test_tiles_granted_carries_true_codes() {
        let event = RoomEvent::TilesGranted {
            player_id: PlayerId(5),
            tiles: vec![
                TileCode::open(TileColor::White, 0),
                TileCode::open(TileColor::Black, 12),
            ],
        };
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "TilesGranted");
        assert_eq!(json["tiles"][0]["code"], 0);
        assert_eq!(json["tiles"][0]["color"], "WHITE");
        assert_eq!(json["tiles"][1]["code"], -12);
    }

    #[test]
    fn test_game_over_round_trip() {
        let event = RoomEvent::GameOver {
            winner: PlayerId(9),
        };
        let bytes = serde_json::to_vec(&event).unwrap();
        let decoded: RoomEvent = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(event, decoded);
    }

    #[test]
    fn test_unknown_event_type_fails_to_parse() {
        let unknown = r#"{"type": "TileTeleported", "distance": 4}"#;
        let result: Result<RoomEvent, _> = serde_json::from_str(unknown);
        assert!(result.is_err());
    }
}
