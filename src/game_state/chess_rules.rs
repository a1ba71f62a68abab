//! Canonical chess-rule constants.
//!
//! Holds the standard starting arrangement and the fixed square geometry of
//! the four castling moves.

use crate::game_state::chess_types::{CastleSide, Color, PieceKind};
use crate::game_state::square::Square;
use crate::game_state::square_set::SquareSet;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Back-rank piece order from the a-file to the h-file.
pub const BACK_RANK_ORDER: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Half-move clock value at which the fifty-move rule applies.
pub const FIFTY_MOVE_HALFMOVES: u16 = 100;

/// Fixed squares involved in one castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingGeometry {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares strictly between king and rook.
    pub must_be_empty: SquareSet,
    /// Squares the king crosses, destination included.
    pub king_path: SquareSet,
}

pub const fn castling_geometry(color: Color, side: CastleSide) -> CastlingGeometry {
    let base = match color {
        Color::White => 0u8,
        Color::Black => 56u8,
    };
    match side {
        CastleSide::KingSide => CastlingGeometry {
            king_from: Square::from_index(base + 4),
            king_to: Square::from_index(base + 6),
            rook_from: Square::from_index(base + 7),
            rook_to: Square::from_index(base + 5),
            must_be_empty: SquareSet((1u64 << (base + 5)) | (1u64 << (base + 6))),
            king_path: SquareSet((1u64 << (base + 5)) | (1u64 << (base + 6))),
        },
        CastleSide::QueenSide => CastlingGeometry {
            king_from: Square::from_index(base + 4),
            king_to: Square::from_index(base + 2),
            rook_from: Square::from_index(base),
            rook_to: Square::from_index(base + 3),
            must_be_empty: SquareSet(
                (1u64 << (base + 1)) | (1u64 << (base + 2)) | (1u64 << (base + 3)),
            ),
            king_path: SquareSet((1u64 << (base + 2)) | (1u64 << (base + 3))),
        },
    }
}

/// Recognize a king move as a castling attempt by its squares alone.
pub fn castle_side_for_king_move(color: Color, from: Square, to: Square) -> Option<CastleSide> {
    [CastleSide::KingSide, CastleSide::QueenSide]
        .into_iter()
        .find(|&side| {
            let geometry = castling_geometry(color, side);
            geometry.king_from == from && geometry.king_to == to
        })
}
