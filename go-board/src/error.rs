use std::fmt;

/// Contract violations surfaced by the board and game state.
///
/// Suicide and superko are not errors here: `GameState::is_valid_move`
/// reports them as `false`. `SelfCapture` and `GameOver` are only returned
/// when a caller skips that check and applies the move anyway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoError {
    OutOfBounds,
    Occupied,
    ColorMismatch,
    InvalidMoveConstruction,
    SelfCapture,
    GameOver,
}

impl fmt::Display for GoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoError::OutOfBounds => write!(f, "point is off the board"),
            GoError::Occupied => write!(f, "point is occupied"),
            GoError::ColorMismatch => write!(f, "cannot merge groups of different colors"),
            GoError::InvalidMoveConstruction => {
                write!(f, "a move must be exactly one of play, pass or resign")
            }
            GoError::SelfCapture => write!(f, "self-capture"),
            GoError::GameOver => write!(f, "game is over"),
        }
    }
}

impl std::error::Error for GoError {}
