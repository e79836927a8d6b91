use std::collections::BTreeSet;

use crate::error::GoError;
use crate::player::Player;
use crate::point::Point;

/// A chain of same-colored, orthogonally connected stones and its liberties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    color: Player,
    stones: BTreeSet<Point>,
    liberties: BTreeSet<Point>,
}

impl Group {
    pub fn new(
        color: Player,
        stones: impl IntoIterator<Item = Point>,
        liberties: impl IntoIterator<Item = Point>,
    ) -> Self {
        Group {
            color,
            stones: stones.into_iter().collect(),
            liberties: liberties.into_iter().collect(),
        }
    }

    pub fn color(&self) -> Player {
        self.color
    }

    pub fn stones(&self) -> &BTreeSet<Point> {
        &self.stones
    }

    pub fn liberties(&self) -> &BTreeSet<Point> {
        &self.liberties
    }

    pub fn liberty_count(&self) -> usize {
        self.liberties.len()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.stones.contains(&point)
    }

    pub fn add_liberty(&mut self, point: Point) {
        self.liberties.insert(point);
    }

    /// The point must currently be a liberty of this group.
    pub fn remove_liberty(&mut self, point: Point) {
        let removed = self.liberties.remove(&point);
        debug_assert!(removed, "{point} is not a liberty of this group");
    }

    /// Union of both groups. Liberties that the union itself occupies are
    /// dropped.
    pub fn merged_with(&self, other: &Group) -> Result<Group, GoError> {
        if self.color != other.color {
            return Err(GoError::ColorMismatch);
        }

        let stones: BTreeSet<Point> = self.stones.union(&other.stones).copied().collect();
        let liberties = self
            .liberties
            .union(&other.liberties)
            .filter(|p| !stones.contains(p))
            .copied()
            .collect();

        Ok(Group {
            color: self.color,
            stones,
            liberties,
        })
    }
}
