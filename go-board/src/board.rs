use std::fmt;

use arrayvec::ArrayVec;

use crate::error::GoError;
use crate::group::Group;
use crate::player::Player;
use crate::point::{COLUMN_LABELS, Point};
use crate::zobrist;

/// Largest supported board dimension. One below `u8::MAX` so that wrapped
/// neighbor coordinates of edge points always fall off the grid.
pub const MAX_BOARD_SIZE: u8 = u8::MAX - 1;

/// Board dimensions. A single number converts to a square board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSize {
    pub rows: u8,
    pub cols: u8,
}

impl From<u8> for BoardSize {
    fn from(size: u8) -> Self {
        BoardSize {
            rows: size,
            cols: size,
        }
    }
}

impl From<(u8, u8)> for BoardSize {
    fn from((rows, cols): (u8, u8)) -> Self {
        BoardSize { rows, cols }
    }
}

/// Outcome of placing a stone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Liberties of the group containing the new stone, after captures.
    pub liberties: usize,
    /// Opponent stones removed by the placement.
    pub captured: Vec<Point>,
}

impl Placement {
    pub fn is_self_capture(&self) -> bool {
        self.liberties == 0
    }
}

type GroupId = usize;

/// A grid of points, each empty or owned by one group.
///
/// Groups live in an arena; grid cells hold arena indices, so every stone of
/// a group refers to the same slot. Cloning a board gives a fully independent
/// snapshot.
#[derive(Debug, Clone)]
pub struct Board {
    rows: u8,
    cols: u8,
    grid: Vec<Option<GroupId>>,
    groups: Vec<Option<Group>>,
    free: Vec<GroupId>,
    hash: u64,
}

impl Board {
    /// Create an empty board.
    pub fn new(size: impl Into<BoardSize>) -> Self {
        let BoardSize { rows, cols } = size.into();
        assert!(
            (1..=MAX_BOARD_SIZE).contains(&rows) && (1..=MAX_BOARD_SIZE).contains(&cols),
            "board dimensions must be between 1 and {MAX_BOARD_SIZE}, got {rows}x{cols}"
        );

        Board {
            rows,
            cols,
            grid: vec![None; rows as usize * cols as usize],
            groups: Vec::new(),
            free: Vec::new(),
            hash: 0,
        }
    }

    /// Build a board from an ASCII layout, top line first (highest row).
    /// `x`/`B` = Black, `o`/`W` = White, anything else = empty.
    ///
    /// Stones are placed in reading order, so a layout containing a group
    /// without liberties will have that group captured.
    pub fn from_layout(layout: &[&str]) -> Result<Self, GoError> {
        let width = layout.first().map_or(0, |line| line.chars().count());
        assert!(
            layout.iter().all(|line| line.chars().count() == width),
            "malformed board layout"
        );
        let (Ok(rows), Ok(cols)) = (u8::try_from(layout.len()), u8::try_from(width)) else {
            panic!(
                "layout of {}x{width} exceeds the maximum board size of {MAX_BOARD_SIZE}",
                layout.len()
            );
        };

        let mut board = Board::new((rows, cols));
        for (i, line) in layout.iter().enumerate() {
            let row = rows - i as u8;
            for (j, c) in line.chars().enumerate() {
                let player = match c {
                    'x' | 'X' | 'B' => Player::Black,
                    'o' | 'O' | 'W' => Player::White,
                    _ => continue,
                };
                board.place_stone(player, Point::new(row, j as u8 + 1))?;
            }
        }
        Ok(board)
    }

    // -- Accessors --

    pub fn num_rows(&self) -> u8 {
        self.rows
    }

    pub fn num_cols(&self) -> u8 {
        self.cols
    }

    pub fn is_on_grid(&self, point: Point) -> bool {
        (1..=self.rows).contains(&point.row) && (1..=self.cols).contains(&point.col)
    }

    /// Color of the stone at `point`, if any. Off-grid points are empty.
    pub fn get(&self, point: Point) -> Option<Player> {
        self.get_group(point).map(Group::color)
    }

    /// The group occupying `point`, if any.
    pub fn get_group(&self, point: Point) -> Option<&Group> {
        if !self.is_on_grid(point) {
            return None;
        }
        self.grid[self.idx(point)].map(|id| self.group(id))
    }

    /// All groups currently on the board.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter().flatten()
    }

    /// Every on-grid point, row by row from the bottom.
    pub fn points(&self) -> impl Iterator<Item = Point> + use<> {
        let cols = self.cols;
        (1..=self.rows).flat_map(move |row| (1..=cols).map(move |col| Point::new(row, col)))
    }

    pub fn is_empty(&self) -> bool {
        self.grid.iter().all(Option::is_none)
    }

    /// Content hash of the stone layout. Equal layouts hash equally.
    pub fn zobrist_hash(&self) -> u64 {
        self.hash
    }

    /// The on-grid orthogonal neighbors of a point.
    pub fn neighbors(&self, point: Point) -> ArrayVec<Point, 4> {
        point
            .neighbors()
            .into_iter()
            .filter(|&n| self.is_on_grid(n))
            .collect()
    }

    // -- Placement --

    /// Place a stone, merge it with friendly neighbors and capture opponent
    /// groups left without liberties.
    ///
    /// Suicide is not rejected here; the returned `Placement` reports the
    /// resulting liberty count so callers can decide. On error the board is
    /// left untouched.
    pub fn place_stone(&mut self, player: Player, point: Point) -> Result<Placement, GoError> {
        if !self.is_on_grid(point) {
            return Err(GoError::OutOfBounds);
        }
        if self.grid[self.idx(point)].is_some() {
            return Err(GoError::Occupied);
        }

        let mut liberties = ArrayVec::<Point, 4>::new();
        let mut friendly = ArrayVec::<GroupId, 4>::new();
        let mut hostile = ArrayVec::<GroupId, 4>::new();
        for n in self.neighbors(point) {
            match self.grid[self.idx(n)] {
                None => liberties.push(n),
                Some(id) if self.group(id).color() == player => {
                    if !friendly.contains(&id) {
                        friendly.push(id);
                    }
                }
                Some(id) => {
                    if !hostile.contains(&id) {
                        hostile.push(id);
                    }
                }
            }
        }

        let merged = friendly.iter().try_fold(
            Group::new(player, [point], liberties),
            |acc, &id| acc.merged_with(self.group(id)),
        )?;

        for &id in &friendly {
            self.release(id);
        }
        let stones: Vec<Point> = merged.stones().iter().copied().collect();
        let own = self.alloc(merged);
        for stone in stones {
            let i = self.idx(stone);
            self.grid[i] = Some(own);
        }
        self.hash ^= zobrist::stone_key(point, player);

        for &id in &hostile {
            self.group_mut(id).remove_liberty(point);
        }

        let mut captured = Vec::new();
        for &id in &hostile {
            if self.group(id).liberty_count() == 0 {
                captured.extend(self.remove_group(id));
            }
        }
        if !captured.is_empty() {
            tracing::trace!(%player, %point, captured = captured.len(), "captured stones");
        }

        Ok(Placement {
            liberties: self.group(own).liberty_count(),
            captured,
        })
    }

    /// Lift a group off the board, returning its stones as liberties to every
    /// other group that touches them.
    fn remove_group(&mut self, id: GroupId) -> Vec<Point> {
        let group = self.release(id);

        for &stone in group.stones() {
            for n in self.neighbors(stone) {
                match self.grid[self.idx(n)] {
                    Some(other) if other != id => self.group_mut(other).add_liberty(stone),
                    _ => {}
                }
            }
        }

        for &stone in group.stones() {
            let i = self.idx(stone);
            self.grid[i] = None;
            self.hash ^= zobrist::stone_key(stone, group.color());
        }

        group.stones().iter().copied().collect()
    }

    // -- Arena --

    #[inline]
    fn idx(&self, point: Point) -> usize {
        (point.row as usize - 1) * self.cols as usize + (point.col as usize - 1)
    }

    fn group(&self, id: GroupId) -> &Group {
        self.groups[id]
            .as_ref()
            .expect("grid refers to a live group")
    }

    fn group_mut(&mut self, id: GroupId) -> &mut Group {
        self.groups[id]
            .as_mut()
            .expect("grid refers to a live group")
    }

    fn alloc(&mut self, group: Group) -> GroupId {
        match self.free.pop() {
            Some(id) => {
                self.groups[id] = Some(group);
                id
            }
            None => {
                self.groups.push(Some(group));
                self.groups.len() - 1
            }
        }
    }

    fn release(&mut self, id: GroupId) -> Group {
        let group = self.groups[id]
            .take()
            .expect("released group must be live");
        self.free.push(id);
        group
    }
}

/// Boards compare by occupancy only: how the groups were built does not
/// matter.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self.hash == other.hash
            && self.points().all(|p| self.get(p) == other.get(p))
    }
}

impl Eq for Board {}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (1..=self.rows).rev() {
            write!(f, "{row:>2} ")?;
            for col in 1..=self.cols {
                let glyph = self.get(Point::new(row, col)).map_or('.', Player::glyph);
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        // Column letters run out past 25 columns.
        if self.cols as usize <= COLUMN_LABELS.len() {
            let labels: String = COLUMN_LABELS.chars().take(self.cols as usize).collect();
            writeln!(f, "   {labels}")?;
        }
        Ok(())
    }
}
