use std::sync::Arc;

use crate::board::{Board, BoardSize, Placement};
use crate::error::GoError;
use crate::moves::Move;
use crate::player::Player;
use crate::point::Point;
use crate::zobrist;

/// One node of the game history.
///
/// A state never changes after construction. Applying a move produces a new
/// state that links back to this one. Boards are shared between states when a
/// move leaves them unchanged (pass, resign).
#[derive(Debug, Clone)]
pub struct GameState {
    board: Arc<Board>,
    next_player: Player,
    previous: Option<Arc<GameState>>,
    last_move: Option<Move>,
}

impl GameState {
    /// Root state on an empty board, Black to move.
    pub fn new_game(size: impl Into<BoardSize>) -> Self {
        Self::with_board(Board::new(size), Player::Black)
    }

    /// Root state on an arbitrary starting position.
    pub fn with_board(board: Board, next_player: Player) -> Self {
        GameState {
            board: Arc::new(board),
            next_player,
            previous: None,
            last_move: None,
        }
    }

    // -- Accessors --

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn next_player(&self) -> Player {
        self.next_player
    }

    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    pub fn previous_state(&self) -> Option<&GameState> {
        self.previous.as_deref()
    }

    /// The player to move and the board: what superko compares.
    pub fn situation(&self) -> (Player, &Board) {
        (self.next_player, &self.board)
    }

    /// This state followed by each of its ancestors back to the root.
    pub fn history(&self) -> impl Iterator<Item = &GameState> {
        std::iter::successors(Some(self), |state| state.previous_state())
    }

    // -- Transitions --

    /// Produce the state that follows `mv`.
    ///
    /// Legality (superko in particular) is the caller's job via
    /// `is_valid_move`. Moves that would corrupt the position are still
    /// refused: off-board or occupied points, suicide, and any move after the
    /// game has ended.
    pub fn apply_move(&self, mv: Move) -> Result<GameState, GoError> {
        if self.is_over() {
            tracing::debug!(%mv, "move applied after game end");
            return Err(GoError::GameOver);
        }

        let board = match mv {
            Move::Play(point) => {
                let (board, placed) = self.simulate(self.next_player, point)?;
                if placed.is_self_capture() {
                    tracing::debug!(player = %self.next_player, %point, "self-capture applied");
                    return Err(GoError::SelfCapture);
                }
                Arc::new(board)
            }
            Move::Pass | Move::Resign => Arc::clone(&self.board),
        };

        Ok(GameState {
            board,
            next_player: self.next_player.other(),
            previous: Some(Arc::new(self.clone())),
            last_move: Some(mv),
        })
    }

    pub fn is_over(&self) -> bool {
        match self.last_move {
            None => false,
            Some(Move::Resign) => true,
            Some(Move::Pass) => self
                .previous_state()
                .and_then(GameState::last_move)
                .is_some_and(|m| m.is_pass()),
            Some(Move::Play(_)) => false,
        }
    }

    // -- Legality --

    pub fn is_move_self_capture(&self, player: Player, mv: Move) -> bool {
        let Move::Play(point) = mv else {
            return false;
        };
        self.simulate(player, point)
            .is_ok_and(|(_, placed)| placed.is_self_capture())
    }

    /// Positional superko: would `mv` recreate any earlier situation?
    pub fn does_move_violate_ko(&self, player: Player, mv: Move) -> bool {
        let Move::Play(point) = mv else {
            return false;
        };
        self.simulate(player, point)
            .is_ok_and(|(board, _)| self.has_seen(player.other(), &board))
    }

    pub fn is_valid_move(&self, mv: Move) -> bool {
        if self.is_over() {
            return false;
        }
        let Move::Play(point) = mv else {
            return true;
        };
        if !self.board.is_on_grid(point) || self.board.get(point).is_some() {
            return false;
        }

        match self.simulate(self.next_player, point) {
            Ok((board, placed)) => {
                !placed.is_self_capture() && !self.has_seen(self.next_player.other(), &board)
            }
            Err(_) => false,
        }
    }

    /// Every valid move for the player to move: plays first, then pass and
    /// resign. Empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_over() {
            return Vec::new();
        }
        self.board
            .points()
            .map(Move::Play)
            .filter(|&mv| self.is_valid_move(mv))
            .chain([Move::Pass, Move::Resign])
            .collect()
    }

    // -- Internal helpers --

    /// Place a stone on a private copy of the board.
    fn simulate(&self, player: Player, point: Point) -> Result<(Board, Placement), GoError> {
        let mut board = Board::clone(&self.board);
        let placed = board.place_stone(player, point)?;
        Ok((board, placed))
    }

    fn situation_hash(next_player: Player, board: &Board) -> u64 {
        board.zobrist_hash() ^ zobrist::to_move_key(next_player)
    }

    /// Whether `(next_player, board)` occurred anywhere in this history.
    /// Hashes filter candidates; occupancy equality confirms them.
    fn has_seen(&self, next_player: Player, board: &Board) -> bool {
        let hash = Self::situation_hash(next_player, board);
        let repeat = self.history().position(|state| {
            Self::situation_hash(state.next_player, &state.board) == hash
                && state.situation() == (next_player, board)
        });

        if let Some(plies_back) = repeat {
            tracing::debug!(%next_player, plies_back, "position repeats earlier situation");
        }
        repeat.is_some()
    }
}

/// Unlinks the history iteratively so very long games do not recurse on drop.
impl Drop for GameState {
    fn drop(&mut self) {
        let mut previous = self.previous.take();
        while let Some(state) = previous {
            match Arc::try_unwrap(state) {
                Ok(mut state) => previous = state.previous.take(),
                Err(_) => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: u8, col: u8) -> Point {
        Point::new(row, col)
    }

    fn play_all(mut state: GameState, moves: &[Move]) -> GameState {
        for &mv in moves {
            assert!(state.is_valid_move(mv), "{mv} should be valid");
            state = state.apply_move(mv).unwrap();
        }
        state
    }

    // -- Initialization --

    #[test]
    fn new_game_is_empty_with_black_to_move() {
        let state = GameState::new_game(9);
        assert!(state.board().is_empty());
        assert_eq!(state.board().num_rows(), 9);
        assert_eq!(state.board().num_cols(), 9);
        assert_eq!(state.next_player(), Player::Black);
        assert!(state.previous_state().is_none());
        assert!(state.last_move().is_none());
        assert!(!state.is_over());
    }

    #[test]
    fn new_game_accepts_rectangular_size() {
        let state = GameState::new_game((5, 7));
        assert_eq!(state.board().num_rows(), 5);
        assert_eq!(state.board().num_cols(), 7);
    }

    // -- Transitions --

    #[test]
    fn play_links_history_and_flips_player() {
        let root = GameState::new_game(5);
        let next = root.apply_move(Move::play((3, 3))).unwrap();

        assert_eq!(next.next_player(), Player::White);
        assert_eq!(next.last_move(), Some(Move::play((3, 3))));
        assert_eq!(next.board().get(p(3, 3)), Some(Player::Black));
        assert_eq!(next.previous_state().unwrap().board(), root.board());
        assert_eq!(next.history().count(), 2);
    }

    #[test]
    fn play_leaves_parent_board_untouched() {
        let root = GameState::new_game(5);
        let _next = root.apply_move(Move::play((3, 3))).unwrap();
        assert!(root.board().is_empty());
    }

    #[test]
    fn pass_shares_the_board() {
        let root = GameState::new_game(5);
        let first = root.apply_move(Move::play((1, 1))).unwrap();
        let passed = first.apply_move(Move::pass_turn()).unwrap();

        assert!(Arc::ptr_eq(&first.board, &passed.board));
        assert_eq!(passed.next_player(), Player::Black);
    }

    #[test]
    fn apply_rejects_occupied_and_off_board_points() {
        let state = GameState::new_game(5)
            .apply_move(Move::play((1, 1)))
            .unwrap();
        assert_eq!(
            state.apply_move(Move::play((1, 1))).unwrap_err(),
            GoError::Occupied
        );
        assert_eq!(
            state.apply_move(Move::play((6, 1))).unwrap_err(),
            GoError::OutOfBounds
        );
    }

    #[test]
    fn apply_rejects_self_capture() {
        let board = Board::from_layout(&[
            "...", //
            "o..", //
            ".o.", //
        ])
        .unwrap();
        let state = GameState::with_board(board, Player::Black);
        assert_eq!(
            state.apply_move(Move::play((1, 1))).unwrap_err(),
            GoError::SelfCapture
        );
    }

    #[test]
    fn apply_rejects_moves_after_game_end() {
        let state = GameState::new_game(5)
            .apply_move(Move::resign())
            .unwrap();
        assert_eq!(
            state.apply_move(Move::pass_turn()).unwrap_err(),
            GoError::GameOver
        );
    }

    // -- Termination --

    #[test]
    fn single_pass_does_not_end_game() {
        let state = play_all(GameState::new_game(5), &[Move::pass_turn()]);
        assert!(!state.is_over());
    }

    #[test]
    fn two_passes_end_game() {
        let state = play_all(
            GameState::new_game(5),
            &[Move::play((1, 1)), Move::pass_turn(), Move::pass_turn()],
        );
        assert!(state.is_over());
        assert!(!state.is_valid_move(Move::play((3, 3))));
        assert!(!state.is_valid_move(Move::pass_turn()));
        assert!(state.legal_moves().is_empty());
    }

    #[test]
    fn pass_then_play_continues() {
        let state = play_all(
            GameState::new_game(5),
            &[Move::pass_turn(), Move::play((1, 1)), Move::pass_turn()],
        );
        assert!(!state.is_over());
    }

    #[test]
    fn resign_ends_game_immediately() {
        let state = play_all(GameState::new_game(5), &[Move::resign()]);
        assert!(state.is_over());
    }

    // -- Legality --

    #[test]
    fn pass_and_resign_are_always_valid_while_playing() {
        let state = GameState::new_game(5);
        assert!(state.is_valid_move(Move::pass_turn()));
        assert!(state.is_valid_move(Move::resign()));
    }

    #[test]
    fn rejects_occupied_and_off_board_plays() {
        let state = play_all(GameState::new_game(5), &[Move::play((2, 2))]);
        assert!(!state.is_valid_move(Move::play((2, 2))));
        assert!(!state.is_valid_move(Move::play((0, 2))));
        assert!(!state.is_valid_move(Move::play((2, 6))));
    }

    #[test]
    fn detects_self_capture() {
        let board = Board::from_layout(&[
            ".....", //
            "..o..", //
            ".o.o.", //
            "..o..", //
            ".....", //
        ])
        .unwrap();
        let state = GameState::with_board(board, Player::Black);
        let mv = Move::play((3, 3));

        assert!(state.is_move_self_capture(Player::Black, mv));
        assert!(!state.is_move_self_capture(Player::White, mv));
        assert!(!state.is_move_self_capture(Player::Black, Move::pass_turn()));
        assert!(!state.is_valid_move(mv));
    }

    #[test]
    fn capturing_is_not_self_capture() {
        let board = Board::from_layout(&[
            ".....", //
            ".xo..", //
            "xo.o.", //
            ".xo..", //
            ".....", //
        ])
        .unwrap();
        let state = GameState::with_board(board, Player::Black);
        let mv = Move::play((3, 3));

        assert!(!state.is_move_self_capture(Player::Black, mv));
        assert!(state.is_valid_move(mv));
        let next = state.apply_move(mv).unwrap();
        assert_eq!(next.board().get(p(3, 2)), None);
    }

    #[test]
    fn forbids_immediate_ko_recapture() {
        let board = Board::from_layout(&[
            ".....", //
            ".xo..", //
            "xo.o.", //
            ".xo..", //
            ".....", //
        ])
        .unwrap();
        let state = GameState::with_board(board, Player::Black);
        let state = play_all(state, &[Move::play((3, 3))]);

        let retake = Move::play((3, 2));
        assert!(state.does_move_violate_ko(Player::White, retake));
        assert!(!state.is_move_self_capture(Player::White, retake));
        assert!(!state.is_valid_move(retake));
        assert!(!state.legal_moves().contains(&retake));
    }

    #[test]
    fn ko_can_be_retaken_after_board_changes() {
        let board = Board::from_layout(&[
            ".....", //
            ".xo..", //
            "xo.o.", //
            ".xo..", //
            ".....", //
        ])
        .unwrap();
        let state = GameState::with_board(board, Player::Black);
        let state = play_all(
            state,
            &[Move::play((3, 3)), Move::play((5, 5)), Move::play((1, 5))],
        );
        assert!(state.is_valid_move(Move::play((3, 2))));
    }

    #[test]
    fn ko_check_ignores_non_plays() {
        let state = GameState::new_game(5);
        assert!(!state.does_move_violate_ko(Player::Black, Move::pass_turn()));
        assert!(!state.does_move_violate_ko(Player::Black, Move::resign()));
    }

    #[test]
    fn legal_moves_on_empty_board() {
        let state = GameState::new_game(3);
        let moves = state.legal_moves();
        assert_eq!(moves.len(), 9 + 2);
        assert!(moves.contains(&Move::pass_turn()));
        assert!(moves.contains(&Move::resign()));
    }

    #[test]
    fn deep_history_drops_without_overflow() {
        let mut state = GameState::new_game(3);
        for _ in 0..100_000 {
            state = GameState {
                board: Arc::clone(&state.board),
                next_player: state.next_player.other(),
                previous: Some(Arc::new(state.clone())),
                last_move: Some(Move::Pass),
            };
        }
        assert_eq!(state.history().count(), 100_001);
        drop(state);
    }
}
