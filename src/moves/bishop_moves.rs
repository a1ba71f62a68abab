use crate::game_state::square::Square;
use crate::game_state::square_set::SquareSet;
use crate::moves::rook_moves::trace_ray;

pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

#[inline]
pub fn bishop_attacks(square: Square, occupied: SquareSet) -> SquareSet {
    BISHOP_DIRECTIONS
        .iter()
        .fold(SquareSet::EMPTY, |acc, &(df, dr)| {
            acc | trace_ray(square, df, dr, occupied)
        })
}
