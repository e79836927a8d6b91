use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::GoError;
use crate::point::Point;

/// Any action a player can take on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Play(Point),
    Pass,
    Resign,
}

impl Move {
    pub fn play(point: impl Into<Point>) -> Self {
        Move::Play(point.into())
    }

    pub fn pass_turn() -> Self {
        Move::Pass
    }

    pub fn resign() -> Self {
        Move::Resign
    }

    /// Build a move from independent selectors. Exactly one must be set.
    pub fn from_parts(
        point: Option<Point>,
        is_pass: bool,
        is_resign: bool,
    ) -> Result<Self, GoError> {
        match (point, is_pass, is_resign) {
            (Some(p), false, false) => Ok(Move::Play(p)),
            (None, true, false) => Ok(Move::Pass),
            (None, false, true) => Ok(Move::Resign),
            _ => Err(GoError::InvalidMoveConstruction),
        }
    }

    pub fn point(&self) -> Option<Point> {
        match self {
            Move::Play(p) => Some(*p),
            _ => None,
        }
    }

    pub fn is_play(&self) -> bool {
        matches!(self, Move::Play(_))
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Move::Pass)
    }

    pub fn is_resign(&self) -> bool {
        matches!(self, Move::Resign)
    }
}

impl std::str::FromStr for Move {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pass" => Ok(Move::Pass),
            "resign" => Ok(Move::Resign),
            other => other
                .parse::<Point>()
                .map(Move::Play)
                .map_err(|e| format!("invalid move: {s} ({e})")),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Play(p) => write!(f, "{p}"),
            Move::Pass => write!(f, "pass"),
            Move::Resign => write!(f, "resign"),
        }
    }
}
