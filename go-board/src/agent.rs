use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::board::Board;
use crate::game_state::GameState;
use crate::moves::Move;
use crate::player::Player;
use crate::point::Point;

/// A move-selection policy. Called once per turn by a game driver.
pub trait Agent {
    fn select_move(&mut self, state: &GameState) -> Move;
}

/// Plays uniformly at random among valid moves that do not fill one of its
/// own eyes. Passes when nothing else is left.
#[derive(Debug, Clone)]
pub struct RandomBot<R = StdRng> {
    rng: R,
}

impl RandomBot<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for RandomBot<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomBot<R> {
    pub fn with_rng(rng: R) -> Self {
        RandomBot { rng }
    }
}

impl<R: Rng> Agent for RandomBot<R> {
    fn select_move(&mut self, state: &GameState) -> Move {
        let player = state.next_player();
        let board = state.board();
        let candidates: Vec<Move> = board
            .points()
            .filter(|&p| !is_point_an_eye(board, p, player))
            .map(Move::Play)
            .filter(|&mv| state.is_valid_move(mv))
            .collect();

        candidates
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Move::Pass)
    }
}

/// An empty point surrounded by `color`, with enough friendly diagonals that
/// the opponent cannot break it. Edge and corner points need every on-grid
/// diagonal; interior points need three of four.
pub fn is_point_an_eye(board: &Board, point: Point, color: Player) -> bool {
    if !board.is_on_grid(point) || board.get(point).is_some() {
        return false;
    }
    if board
        .neighbors(point)
        .iter()
        .any(|&n| board.get(n) != Some(color))
    {
        return false;
    }

    let mut friendly = 0;
    let mut off_board = 0;
    for corner in point.corners() {
        if !board.is_on_grid(corner) {
            off_board += 1;
        } else if board.get(corner) == Some(color) {
            friendly += 1;
        }
    }

    if off_board > 0 {
        off_board + friendly == 4
    } else {
        friendly >= 3
    }
}
