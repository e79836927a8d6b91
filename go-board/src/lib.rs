pub mod agent;
pub mod board;
pub mod error;
pub mod game_state;
pub mod group;
pub mod moves;
pub mod player;
pub mod point;
mod zobrist;

pub use agent::{Agent, RandomBot};
pub use board::{Board, BoardSize, MAX_BOARD_SIZE, Placement};
pub use error::GoError;
pub use game_state::GameState;
pub use group::Group;
pub use moves::Move;
pub use player::Player;
pub use point::Point;
