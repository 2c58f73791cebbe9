//! The signed-integer wire encoding for tiles.
//!
//! A tile's public face depends on who is looking at it. Owners see true
//! numbers; everyone else sees only what the table would show them: the
//! tile's color, whether it is a joker, and (once revealed) its number.
//! [`TileCode`] is the one type that crosses the wire in hand views and
//! events, and it encodes exactly that policy:
//!
//! - the magnitude is the displayed number, the sign is the color
//!   (positive white, negative black);
//! - a closed non-joker shown to a non-owner uses the sentinel magnitude
//!   `13` instead of its true number;
//! - a joker always shows magnitude `12` to non-owners, revealed or not,
//!   because `12` *is* its true number;
//! - magnitude `0` cannot carry a sign, so zero codes carry an explicit
//!   color tag.
//!
//! Construction happens in the engine's snapshot/event code; this module
//! only owns the representation and its validity rules.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ProtocolError;
use crate::types::TileColor;

/// The tile number that denotes a joker.
pub const JOKER_NUMBER: u8 = 12;

/// The sentinel magnitude a closed non-joker presents to non-owners.
pub const HIDDEN_NUMBER: u8 = 13;

/// Count of numbered (non-joker) tiles per color: numbers `0..=11`.
pub const NUMBERED_TILES_PER_COLOR: u8 = 12;

/// One tile as a viewer is allowed to see it.
///
/// `code` is the signed displayed value; `color` is populated exactly
/// when `code == 0` (a revealed white or black zero) and omitted from
/// the serialized form otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileCode {
    pub code: i8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<TileColor>,
}

impl TileCode {
    /// A tile shown with its true number (owner view, revealed tile, or
    /// the game-over force reveal).
    pub fn open(color: TileColor, number: u8) -> Self {
        Self::with_magnitude(color, number)
    }

    /// A closed non-joker as a non-owner sees it: the colored `13`.
    pub fn hidden(color: TileColor) -> Self {
        Self::with_magnitude(color, HIDDEN_NUMBER)
    }

    /// A joker as a non-owner sees it: the colored `12`, open or not.
    pub fn joker(color: TileColor) -> Self {
        Self::with_magnitude(color, JOKER_NUMBER)
    }

    fn with_magnitude(color: TileColor, number: u8) -> Self {
        let code = color.sign() * number as i8;
        // Zero has no sign to carry the color, so it gets the tag.
        let tag = if number == 0 { Some(color) } else { None };
        TileCode { code, color: tag }
    }

    /// Validates a raw `(code, tag)` pair from storage or a peer.
    ///
    /// Magnitudes above the hidden sentinel never occur, and a zero code
    /// without a color tag is ambiguous; both are rejected.
    pub fn try_new(
        code: i8,
        color: Option<TileColor>,
    ) -> Result<Self, ProtocolError> {
        if code.unsigned_abs() > HIDDEN_NUMBER {
            return Err(ProtocolError::InvalidTileCode(code));
        }
        if code == 0 && color.is_none() {
            return Err(ProtocolError::MissingColorTag);
        }
        let tag = if code == 0 { color } else { None };
        Ok(TileCode { code, color: tag })
    }

    /// The displayed `(color, number)` pair.
    pub fn decode(self) -> (TileColor, u8) {
        let color = match self.color {
            Some(tagged) => tagged,
            None if self.code < 0 => TileColor::Black,
            None => TileColor::White,
        };
        (color, self.code.unsigned_abs())
    }

    /// Whether this code is the closed-tile sentinel.
    pub fn is_hidden(self) -> bool {
        self.code.unsigned_abs() == HIDDEN_NUMBER
    }

    /// Whether this code displays a joker.
    pub fn is_joker(self) -> bool {
        self.code.unsigned_abs() == JOKER_NUMBER
    }
}

impl fmt::Display for TileCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (color, number) = self.decode();
        match number {
            HIDDEN_NUMBER => write!(f, "{color}:?"),
            JOKER_NUMBER => write!(f, "{color}:joker"),
            n => write!(f, "{color}:{n}"),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
