//! The operation vocabulary of a room.
//!
//! Every in-game request is one [`RoomOp`] value. An op knows three
//! things about itself: which phases accept it, which turn token it
//! carries (for close ops), and which seat must be acting (for
//! tile-touching ops). [`crate::room::Room::apply`] checks those three
//! guards in order before any effect runs, so every effect function
//! starts from a validated world.

use tilecode_protocol::{Phase, PlayerId, TileColor};

/// One in-game operation, ready to be validated and applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomOp {
    /// Leave WAIT: seat everyone, shuffle turn order, reset the pools.
    StartGame,
    /// Close SETTING once every seat confirmed the turn order.
    CloseSetting { turn: u8 },
    /// Close START for the current seat; the last close moves to DRAW.
    CloseStart { turn: u8 },
    /// Draw for the current seat without choices: the whole starting
    /// hand in START, one random-color tile in DRAW.
    AutoProgress,
    /// Caller-chosen color split of the starting hand.
    DrawAtStart { player: PlayerId, white: u8, black: u8 },
    /// Caller-chosen color for the turn-cycle draw.
    DrawAtDraw { player: PlayerId, color: TileColor },
    /// Close DRAW and enter SORT.
    CloseDraw { turn: u8 },
    /// Relocate the acting seat's joker within its color range.
    PlaceJoker {
        player: PlayerId,
        color: TileColor,
        index: usize,
    },
    /// Close SORT and enter GUESS.
    CloseSort { turn: u8 },
    /// The GUESS-phase action and its close in one: name a target seat,
    /// a hand index, and a number. Resolution decides REPEAT or END.
    Guess {
        guesser: PlayerId,
        target: PlayerId,
        index: usize,
        number: u8,
    },
    /// Close REPEAT: guess again or stop.
    CloseRepeat { turn: u8, continue_guessing: bool },
    /// Close END: pass the turn and re-enter DRAW.
    CloseEnd { turn: u8 },
    /// Close GAMEOVER: reset the room back to WAIT.
    CloseGameover { turn: u8 },
}

impl RoomOp {
    /// Phases in which this op is legal.
    pub fn allowed_phases(self) -> &'static [Phase] {
        match self {
            RoomOp::StartGame => &[Phase::Wait],
            RoomOp::CloseSetting { .. } => &[Phase::Setting],
            RoomOp::CloseStart { .. } | RoomOp::DrawAtStart { .. } => &[Phase::Start],
            RoomOp::AutoProgress => &[Phase::Start, Phase::Draw],
            RoomOp::DrawAtDraw { .. } | RoomOp::CloseDraw { .. } => &[Phase::Draw],
            RoomOp::PlaceJoker { .. } | RoomOp::CloseSort { .. } => &[Phase::Sort],
            RoomOp::Guess { .. } => &[Phase::Guess],
            RoomOp::CloseRepeat { .. } => &[Phase::Repeat],
            RoomOp::CloseEnd { .. } => &[Phase::End],
            RoomOp::CloseGameover { .. } => &[Phase::Gameover],
        }
    }

    /// The 1-based turn token a close op carries, if any.
    pub fn turn_token(self) -> Option<u8> {
        match self {
            RoomOp::CloseSetting { turn }
            | RoomOp::CloseStart { turn }
            | RoomOp::CloseDraw { turn }
            | RoomOp::CloseSort { turn }
            | RoomOp::CloseRepeat { turn, .. }
            | RoomOp::CloseEnd { turn }
            | RoomOp::CloseGameover { turn } => Some(turn),
            _ => None,
        }
    }

    /// The seat that must currently hold the turn for this op, if any.
    pub fn acting_player(self) -> Option<PlayerId> {
        match self {
            RoomOp::DrawAtStart { player, .. }
            | RoomOp::DrawAtDraw { player, .. }
            | RoomOp::PlaceJoker { player, .. } => Some(player),
            RoomOp::Guess { guesser, .. } => Some(guesser),
            _ => None,
        }
    }

    /// Request-surface name, used in rejection errors and logs.
    pub fn name(self) -> &'static str {
        match self {
            RoomOp::StartGame => "startGame",
            RoomOp::CloseSetting { .. } => "closeSetting",
            RoomOp::CloseStart { .. } => "closeStart",
            RoomOp::AutoProgress => "autoProgress",
            RoomOp::DrawAtStart { .. } => "drawAtStart",
            RoomOp::DrawAtDraw { .. } => "drawAtDraw",
            RoomOp::CloseDraw { .. } => "closeDraw",
            RoomOp::PlaceJoker { .. } => "placeJoker",
            RoomOp::CloseSort { .. } => "closeSort",
            RoomOp::Guess { .. } => "guess",
            RoomOp::CloseRepeat { .. } => "closeRepeat",
            RoomOp::CloseEnd { .. } => "closeEnd",
            RoomOp::CloseGameover { .. } => "closeGameover",
        }
    }
}
