//! Attack detection.
//!
//! A square is attacked when any enemy piece, dispatched by kind to its attack
//! pattern, covers it. Both `Position` and the legality filter's scratch board
//! go through the same code.

use crate::game_state::chess_types::{Color, Piece, PieceKind};
use crate::game_state::square::Square;
use crate::game_state::square_set::SquareSet;
use crate::move_generation::legal_move_shared::BoardView;
use crate::moves::bishop_moves::bishop_attacks;
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::pawn_moves::pawn_attacks;
use crate::moves::queen_moves::queen_attacks;
use crate::moves::rook_moves::rook_attacks;

/// Squares a piece standing on `from` attacks, given the board occupancy.
#[inline]
pub fn attacks_from(piece: Piece, from: Square, occupied: SquareSet) -> SquareSet {
    match piece.kind {
        PieceKind::Pawn => pawn_attacks(piece.color, from),
        PieceKind::Knight => knight_attacks(from),
        PieceKind::Bishop => bishop_attacks(from, occupied),
        PieceKind::Rook => rook_attacks(from, occupied),
        PieceKind::Queen => queen_attacks(from, occupied),
        PieceKind::King => king_attacks(from),
    }
}

#[inline]
pub fn king_square(board: &impl BoardView, color: Color) -> Option<Square> {
    board
        .occupancy(color)
        .iter()
        .find(|&square| board.piece_kind_for(color, square) == Some(PieceKind::King))
}

pub fn is_square_attacked(board: &impl BoardView, square: Square, attacker_color: Color) -> bool {
    let occupied = board.occupied();
    board.occupancy(attacker_color).iter().any(|from| {
        board
            .piece_at(from)
            .is_some_and(|piece| attacks_from(piece, from, occupied).contains(square))
    })
}

/// Whether `color`'s king is attacked. A board without that king is never in
/// check.
#[inline]
pub fn is_in_check(board: &impl BoardView, color: Color) -> bool {
    let Some(king_sq) = king_square(board, color) else {
        return false;
    };
    is_square_attacked(board, king_sq, color.opposite())
}

/// Every enemy piece attacking `square`, in ascending square order.
pub fn attackers_to_square(
    board: &impl BoardView,
    square: Square,
    attacker_color: Color,
) -> Vec<(Square, PieceKind)> {
    let occupied = board.occupied();
    board
        .occupancy(attacker_color)
        .iter()
        .filter_map(|from| {
            let piece = board.piece_at(from)?;
            attacks_from(piece, from, occupied)
                .contains(square)
                .then_some((from, piece.kind))
        })
        .collect()
}
