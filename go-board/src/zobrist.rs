use crate::player::Player;
use crate::point::Point;

/// SplitMix64 finalizer. Spreads structured inputs across all 64 bits.
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Hash contribution of a single stone.
pub(crate) fn stone_key(point: Point, player: Player) -> u64 {
    let color = match player {
        Player::Black => 1,
        Player::White => 2,
    };
    mix(((point.row as u64) << 16) | ((point.col as u64) << 8) | color)
}

/// Hash contribution of the player to move.
pub(crate) fn to_move_key(player: Player) -> u64 {
    match player {
        Player::Black => 0,
        Player::White => mix(u64::MAX),
    }
}
