//! Knight attack table, generated at compile time from the eight fixed jumps.

use crate::game_state::square::Square;
use crate::game_state::square_set::SquareSet;

pub const KNIGHT_ATTACKS: [SquareSet; 64] = generate_knight_attacks();

const KNIGHT_JUMPS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

#[inline]
pub const fn knight_attacks(square: Square) -> SquareSet {
    KNIGHT_ATTACKS[square.index()]
}

const fn generate_knight_attacks() -> [SquareSet; 64] {
    let mut table = [SquareSet::EMPTY; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;
        let mut jump = 0usize;

        while jump < KNIGHT_JUMPS.len() {
            let (df, dr) = KNIGHT_JUMPS[jump];
            attacks |= bit_if_on_board(file + df, rank + dr);
            jump += 1;
        }

        table[sq] = SquareSet(attacks);
        sq += 1;
    }

    table
}

pub(crate) const fn bit_if_on_board(file: i32, rank: i32) -> u64 {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        return 0;
    }
    1u64 << ((rank as usize) * 8 + (file as usize))
}
