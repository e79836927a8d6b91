mod config;

use std::process::ExitCode;
use std::thread;

use go_board::{Agent, GameState, GoError, Move, Player, RandomBot};

use crate::config::Config;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "go_selfplay=info,go_board=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        board_size = config.board_size,
        seed = ?config.seed,
        "Starting random bot self-play"
    );

    match play(&config) {
        Ok(game) => {
            print!("{}", game.board());
            report(&game);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Game aborted: {e}");
            ExitCode::FAILURE
        }
    }
}

fn play(config: &Config) -> Result<GameState, GoError> {
    let (mut black, mut white) = match config.seed {
        Some(seed) => (RandomBot::seeded(seed), RandomBot::seeded(seed.wrapping_add(1))),
        None => (RandomBot::new(), RandomBot::new()),
    };

    let mut game = GameState::new_game(config.board_size);
    let mut moves = 0;
    while !game.is_over() {
        if config.max_moves.is_some_and(|max| moves >= max) {
            tracing::warn!(moves, "Move limit reached, stopping");
            break;
        }
        if !config.move_delay.is_zero() {
            thread::sleep(config.move_delay);
        }

        print!("{CLEAR_SCREEN}{}", game.board());
        let player = game.next_player();
        let bot = match player {
            Player::Black => &mut black,
            Player::White => &mut white,
        };
        let mv = bot.select_move(&game);
        game = game.apply_move(mv)?;
        moves += 1;

        println!("{}", describe(player, mv));
        tracing::debug!(%player, %mv, moves, "move played");
    }

    Ok(game)
}

fn describe(player: Player, mv: Move) -> String {
    match mv {
        Move::Play(point) => format!("{player} {point}"),
        Move::Pass => format!("{player} passes"),
        Move::Resign => format!("{player} resigns"),
    }
}

fn report(game: &GameState) {
    let moves = game.history().count() - 1;
    match game.last_move() {
        Some(Move::Resign) => {
            tracing::info!(moves, "{} resigned", game.next_player().other())
        }
        Some(Move::Pass) if game.is_over() => {
            tracing::info!(moves, "Both players passed")
        }
        _ => tracing::info!(moves, "Game stopped before the end"),
    }
}
