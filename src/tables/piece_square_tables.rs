//! Middlegame and endgame piece-square tables in centipawns.
//!
//! Tables are laid out as seen from White with rank 8 on the first row, so a
//! White piece on square `sq` reads entry `sq.mirrored()` and a Black piece
//! reads `sq` directly. Black therefore gets the vertically mirrored table,
//! which keeps symmetric positions at exactly zero.

use crate::game_state::chess_types::{Color, PieceKind};
use crate::game_state::square::Square;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Middlegame,
    Endgame,
}

#[rustfmt::skip]
const PAWN_MG: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const PAWN_EG: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    80, 80, 80, 80, 80, 80, 80, 80,
    50, 50, 50, 50, 50, 50, 50, 50,
    30, 30, 30, 30, 30, 30, 30, 30,
    20, 20, 20, 20, 20, 20, 20, 20,
    10, 10, 10, 10, 10, 10, 10, 10,
     0,  0,  0,  0,  0,  0,  0,  0,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
const BISHOP: [i32; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
const ROOK: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN: [i32; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
      0,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];

#[rustfmt::skip]
const KING_MG: [i32; 64] = [
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -10,-20,-20,-20,-20,-20,-20,-10,
     20, 20,  0,  0,  0,  0, 20, 20,
     20, 30, 10,  0,  0, 10, 30, 20,
];

#[rustfmt::skip]
const KING_EG: [i32; 64] = [
    -50,-40,-30,-20,-20,-30,-40,-50,
    -30,-20,-10,  0,  0,-10,-20,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-30,  0,  0,  0,  0,-30,-30,
    -50,-30,-30,-30,-30,-30,-30,-50,
];

fn table(kind: PieceKind, phase: GamePhase) -> &'static [i32; 64] {
    match (kind, phase) {
        (PieceKind::Pawn, GamePhase::Middlegame) => &PAWN_MG,
        (PieceKind::Pawn, GamePhase::Endgame) => &PAWN_EG,
        (PieceKind::Knight, _) => &KNIGHT,
        (PieceKind::Bishop, _) => &BISHOP,
        (PieceKind::Rook, _) => &ROOK,
        (PieceKind::Queen, _) => &QUEEN,
        (PieceKind::King, GamePhase::Middlegame) => &KING_MG,
        (PieceKind::King, GamePhase::Endgame) => &KING_EG,
    }
}

/// Bonus for a piece of `color` and `kind` standing on `square`, from that
/// color's own point of view.
#[inline]
pub fn piece_square_bonus(kind: PieceKind, color: Color, square: Square, phase: GamePhase) -> i32 {
    let index = match color {
        Color::White => square.mirrored().index(),
        Color::Black => square.index(),
    };
    table(kind, phase)[index]
}

#[cfg(test)]
mod tests {
    use super::{piece_square_bonus, GamePhase};
    use crate::game_state::chess_types::{Color, PieceKind};
    use crate::game_state::square::Square;

    #[test]
    fn tables_are_color_mirrored() {
        for square in Square::all() {
            for kind in PieceKind::ALL {
                for phase in [GamePhase::Middlegame, GamePhase::Endgame] {
                    assert_eq!(
                        piece_square_bonus(kind, Color::White, square, phase),
                        piece_square_bonus(kind, Color::Black, square.mirrored(), phase)
                    );
                }
            }
        }
    }

    #[test]
    fn central_knight_beats_rim_knight() {
        let e4 = Square::from_coords(4, 3).expect("e4");
        let a1 = Square::from_coords(0, 0).expect("a1");
        let mg = GamePhase::Middlegame;
        assert!(
            piece_square_bonus(PieceKind::Knight, Color::White, e4, mg)
                > piece_square_bonus(PieceKind::Knight, Color::White, a1, mg)
        );
    }

    #[test]
    fn castled_king_is_preferred_in_the_middlegame_only() {
        let g1 = Square::from_coords(6, 0).expect("g1");
        let e4 = Square::from_coords(4, 3).expect("e4");
        assert!(
            piece_square_bonus(PieceKind::King, Color::White, g1, GamePhase::Middlegame)
                > piece_square_bonus(PieceKind::King, Color::White, e4, GamePhase::Middlegame)
        );
        assert!(
            piece_square_bonus(PieceKind::King, Color::White, e4, GamePhase::Endgame)
                > piece_square_bonus(PieceKind::King, Color::White, g1, GamePhase::Endgame)
        );
    }
}
