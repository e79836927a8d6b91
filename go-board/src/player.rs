use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(i8)]
pub enum Player {
    Black = 1,
    White = -1,
}

impl Player {
    pub fn other(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Single-character board glyph.
    pub fn glyph(self) -> char {
        match self {
            Player::Black => 'x',
            Player::White => 'o',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => write!(f, "Black"),
            Player::White => write!(f, "White"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_flips() {
        assert_eq!(Player::Black.other(), Player::White);
        assert_eq!(Player::White.other(), Player::Black);
        assert_eq!(Player::Black.other().other(), Player::Black);
    }

    #[test]
    fn glyphs_match_board_rendering() {
        assert_eq!(Player::Black.glyph(), 'x');
        assert_eq!(Player::White.glyph(), 'o');
    }

    #[test]
    fn serializes_as_int() {
        assert_eq!(serde_json::to_value(Player::Black).unwrap(), 1);
        assert_eq!(serde_json::to_value(Player::White).unwrap(), -1);
        let back: Player = serde_json::from_value(serde_json::json!(-1)).unwrap();
        assert_eq!(back, Player::White);
    }
}
