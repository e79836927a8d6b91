use serde::{Deserialize, Serialize};
use std::fmt;

/// Column labels used for rendering and parsing coordinates. `I` is skipped.
pub const COLUMN_LABELS: &str = "ABCDEFGHJKLMNOPQRSTUVWXYZ";

/// A board location, 1-indexed.
///
/// Points carry no board bounds; `Board::is_on_grid` decides whether one is
/// playable. Row and column 0 (and the wrapped `u8::MAX`) are always off the
/// grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub row: u8,
    pub col: u8,
}

impl Point {
    pub const fn new(row: u8, col: u8) -> Self {
        Point { row, col }
    }

    /// Orthogonal neighbors in up, down, left, right order. Not filtered for
    /// board bounds.
    pub fn neighbors(self) -> [Point; 4] {
        let Point { row, col } = self;
        [
            Point::new(row.wrapping_sub(1), col),
            Point::new(row.wrapping_add(1), col),
            Point::new(row, col.wrapping_sub(1)),
            Point::new(row, col.wrapping_add(1)),
        ]
    }

    /// Diagonal neighbors, also unfiltered.
    pub fn corners(self) -> [Point; 4] {
        let Point { row, col } = self;
        let (up, down) = (row.wrapping_sub(1), row.wrapping_add(1));
        let (left, right) = (col.wrapping_sub(1), col.wrapping_add(1));
        [
            Point::new(up, left),
            Point::new(up, right),
            Point::new(down, left),
            Point::new(down, right),
        ]
    }
}

impl From<(u8, u8)> for Point {
    fn from((row, col): (u8, u8)) -> Self {
        Point::new(row, col)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match COLUMN_LABELS.chars().nth(self.col.wrapping_sub(1) as usize) {
            Some(letter) => write!(f, "{letter}{}", self.row),
            None => write!(f, "({}, {})", self.row, self.col),
        }
    }
}

impl std::str::FromStr for Point {
    type Err = String;

    /// Parses coordinates such as `C3` (column letter, then row number).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let letter = chars
            .next()
            .ok_or_else(|| "empty coordinate".to_string())?
            .to_ascii_uppercase();
        let col = COLUMN_LABELS
            .chars()
            .position(|c| c == letter)
            .ok_or_else(|| format!("invalid column: {letter}"))?;
        let row: u8 = chars
            .as_str()
            .parse()
            .map_err(|_| format!("invalid row in coordinate: {s}"))?;
        if row == 0 {
            return Err(format!("invalid row in coordinate: {s}"));
        }
        Ok(Point::new(row, col as u8 + 1))
    }
}
