//! Point-in-time room snapshots.
//!
//! A view is built by the engine for one specific viewer and already has
//! the [`crate::TileCode`] visibility policy applied: the viewer's own
//! hand uses true numbers, every other hand uses the hidden/joker
//! sentinels. Consumers can render a view directly without knowing the
//! encoding rules.

use serde::{Deserialize, Serialize};

use crate::tile_code::TileCode;
use crate::types::{Phase, PlayerId, RoomId};

/// One seat as a given viewer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantView {
    pub player_id: PlayerId,
    /// 1-based seat order, assigned when the game starts. `None` in the
    /// lobby before any assignment.
    pub turn_order: Option<u8>,
    pub ready: bool,
    pub retired: bool,
    pub connected: bool,
    /// Hand in canonical order, encoded for the viewer.
    pub hand: Vec<TileCode>,
    /// Where the most recent draw landed in `hand`. Public: the insert
    /// position is visible at the table even when the number is not.
    pub last_drawn_index: Option<usize>,
}

/// The whole room as a given viewer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomView {
    pub room_id: RoomId,
    pub phase: Phase,
    /// 0-based index into the turn order; identifies the current seat.
    pub turn_pointer: usize,
    /// Seats in join order (not turn order).
    pub participants: Vec<ParticipantView>,
}

impl RoomView {
    /// The seat whose turn it currently is, if the game has started.
    pub fn current(&self) -> Option<&ParticipantView> {
        let wanted = self.turn_pointer as u8 + 1;
        self.participants
            .iter()
            .find(|p| p.turn_order == Some(wanted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TileColor;

    fn seat(id: u64, order: u8) -> ParticipantView {
        ParticipantView {
            player_id: PlayerId(id),
            turn_order: Some(order),
            ready: false,
            retired: false,
            connected: true,
            hand: vec![TileCode::hidden(TileColor::Black)],
            last_drawn_index: None,
        }
    }

    #[test]
    fn test_current_follows_turn_pointer() {
        let view = RoomView {
            room_id: RoomId(1),
            phase: Phase::Draw,
            turn_pointer: 1,
            participants: vec![seat(10, 2), seat(11, 1)],
        };
        // Pointer 1 means turn order 2, which is the first-listed seat.
        assert_eq!(view.current().unwrap().player_id, PlayerId(10));
    }

    #[test]
    fn test_current_is_none_before_assignment() {
        let view = RoomView {
            room_id: RoomId(1),
            phase: Phase::Wait,
            turn_pointer: 0,
            participants: vec![ParticipantView {
                turn_order: None,
                ..seat(10, 1)
            }],
        };
        assert!(view.current().is_none());
    }

    #[test]
    fn test_view_serializes_camel_case() {
        let view = RoomView {
            room_id: RoomId(4),
            phase: Phase::Sort,
            turn_pointer: 0,
            participants: vec![seat(10, 1)],
        };
        let json: serde_json::Value = serde_json::to_value(&view).unwrap();

        assert_eq!(json["roomId"], 4);
        assert_eq!(json["phase"], "SORT");
        assert_eq!(json["turnPointer"], 0);
        assert_eq!(json["participants"][0]["playerId"], 10);
        assert_eq!(json["participants"][0]["turnOrder"], 1);
        assert_eq!(json["participants"][0]["hand"][0]["code"], -13);
    }

    #[test]
    fn test_view_round_trip() {
        let view = RoomView {
            room_id: RoomId(9),
            phase: Phase::Guess,
            turn_pointer: 2,
            participants: vec![seat(1, 3), seat(2, 1), seat(3, 2)],
        };
        let bytes = serde_json::to_vec(&view).unwrap();
        let decoded: RoomView = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(view, decoded);
    }
}
