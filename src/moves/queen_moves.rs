use crate::game_state::square::Square;
use crate::game_state::square_set::SquareSet;
use crate::moves::bishop_moves::bishop_attacks;
use crate::moves::rook_moves::rook_attacks;

#[inline]
pub fn queen_attacks(square: Square, occupied: SquareSet) -> SquareSet {
    bishop_attacks(square, occupied) | rook_attacks(square, occupied)
}
