//! Core vocabulary shared by every Tilecode crate.
//!
//! Everything here crosses a boundary: identifiers travel in events and
//! views, `Phase` names the room's position in its state machine, and
//! `Recipient` tells the delivery layer who may see a message. None of
//! these types carry behavior beyond small queries; the rules that move
//! them live in `tilecode-engine`.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a participant.
///
/// Newtype over `u64` so a participant id can never be confused with a
/// room id in a signature. `#[serde(transparent)]` keeps the wire form a
/// plain number: `PlayerId(42)` serializes as `42`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// A unique identifier for a room (one game instance shared by 2-4 seats).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub u64);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tile color
// ---------------------------------------------------------------------------

/// The two tile colors.
///
/// Color is public information even for closed tiles (the hidden-tile
/// sentinel in [`crate::TileCode`] still carries a sign), so this enum
/// appears in public events as well as owner-private ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TileColor {
    White,
    Black,
}

impl TileColor {
    /// The opposite color. Used by the draw fallback when the requested
    /// color's pool is empty.
    pub fn other(self) -> TileColor {
        match self {
            TileColor::White => TileColor::Black,
            TileColor::Black => TileColor::White,
        }
    }

    /// Sign of this color's wire codes: `+1` for white, `-1` for black.
    pub fn sign(self) -> i8 {
        match self {
            TileColor::White => 1,
            TileColor::Black => -1,
        }
    }
}

impl fmt::Display for TileColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileColor::White => write!(f, "white"),
            TileColor::Black => write!(f, "black"),
        }
    }
}

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// The room's position in its state machine.
///
/// `Wait` and `Gameover` frame the whole game; the rest form one
/// turn-cycle that repeats (DRAW → SORT → GUESS → REPEAT → END → DRAW of
/// the next turn) until the game-over check fires. Transitions between
/// phases are only legal along the edges the engine's transition table
/// defines; the enum itself only answers cheap questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Lobby: seats fill up and toggle ready. The only phase where the
    /// participant list may change.
    Wait,
    /// Turn order has just been assigned; players see their seat order.
    Setting,
    /// Each participant in turn order takes their starting hand.
    Start,
    /// The current participant draws one tile.
    Draw,
    /// The current participant may reposition a joker.
    Sort,
    /// The current participant guesses one tile in another hand.
    Guess,
    /// A successful guesser decides whether to guess again.
    Repeat,
    /// The turn is over; closing passes play to the next seat.
    End,
    /// One participant remains unretired; closing resets to `Wait`.
    Gameover,
}

impl Phase {
    /// True for every phase except the pre-game lobby.
    ///
    /// Disconnects are handled differently in and out of game: a lobby
    /// seat is removed outright, an in-game seat is flagged and frozen.
    pub fn is_in_game(self) -> bool {
        !matches!(self, Phase::Wait)
    }

    /// True for the phases that make up one turn-cycle.
    pub fn is_turn_cycle(self) -> bool {
        !matches!(self, Phase::Wait | Phase::Gameover)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Wait => "WAIT",
            Phase::Setting => "SETTING",
            Phase::Start => "START",
            Phase::Draw => "DRAW",
            Phase::Sort => "SORT",
            Phase::Guess => "GUESS",
            Phase::Repeat => "REPEAT",
            Phase::End => "END",
            Phase::Gameover => "GAMEOVER",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// Recipient: who may see an event
// ---------------------------------------------------------------------------

/// Specifies who should receive a room event.
///
/// Every room operation returns `(Recipient, RoomEvent)` pairs; the
/// service layer delivers each event only to the seats this selects.
/// Hidden information rides `Player(owner)` exclusively. Everything
/// addressed `All` or `AllExcept` must already be public by the
/// visibility rules in [`crate::TileCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recipient {
    /// Every participant in the room.
    All,

    /// One specific participant.
    Player(PlayerId),

    /// Everyone except the specified participant.
    AllExcept(PlayerId),
}

// =========================================================================
// Tests
// =========================================================================
