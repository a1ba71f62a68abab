//! King attack table, generated at compile time from the eight neighbours.

use crate::game_state::square::Square;
use crate::game_state::square_set::SquareSet;
use crate::moves::knight_moves::bit_if_on_board;

pub const KING_ATTACKS: [SquareSet; 64] = generate_king_attacks();

#[inline]
pub const fn king_attacks(square: Square) -> SquareSet {
    KING_ATTACKS[square.index()]
}

const fn generate_king_attacks() -> [SquareSet; 64] {
    let mut table = [SquareSet::EMPTY; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;

        let mut df = -1;
        while df <= 1 {
            let mut dr = -1;
            while dr <= 1 {
                if df != 0 || dr != 0 {
                    attacks |= bit_if_on_board(file + df, rank + dr);
                }
                dr += 1;
            }
            df += 1;
        }

        table[sq] = SquareSet(attacks);
        sq += 1;
    }

    table
}
