//! Bishop, rook and queen moves: ray attacks minus own occupancy.

use crate::game_state::chess_types::{Piece, PieceKind};
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::push_piece_moves;
use crate::moves::bishop_moves::bishop_attacks;
use crate::moves::move_intent::ValidatedMove;
use crate::moves::queen_moves::queen_attacks;
use crate::moves::rook_moves::rook_attacks;

pub fn generate_bishop_moves(position: &Position, out: &mut Vec<ValidatedMove>) {
    generate_slider_moves(position, PieceKind::Bishop, out);
}

pub fn generate_rook_moves(position: &Position, out: &mut Vec<ValidatedMove>) {
    generate_slider_moves(position, PieceKind::Rook, out);
}

pub fn generate_queen_moves(position: &Position, out: &mut Vec<ValidatedMove>) {
    generate_slider_moves(position, PieceKind::Queen, out);
}

fn generate_slider_moves(position: &Position, kind: PieceKind, out: &mut Vec<ValidatedMove>) {
    let side = position.side_to_move();
    let own_occ = position.occupancy(side);
    let occupied = position.occupied();
    let piece = Piece::new(kind, side);

    for from in position.pieces(side, kind) {
        let attacks = match kind {
            PieceKind::Bishop => bishop_attacks(from, occupied),
            PieceKind::Rook => rook_attacks(from, occupied),
            _ => queen_attacks(from, occupied),
        };
        push_piece_moves(position, piece, from, attacks - own_occ, out);
    }
}

#[cfg(test)]
mod tests {
    use super::{generate_bishop_moves, generate_queen_moves, generate_rook_moves};
    use crate::game_state::position::Position;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn sliders_are_boxed_in_at_the_start() {
        let position = Position::initial();
        let mut out = Vec::new();
        generate_bishop_moves(&position, &mut out);
        generate_rook_moves(&position, &mut out);
        generate_queen_moves(&position, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn rook_stops_on_enemy_and_before_friend() {
        let position = parse_fen("4k3/8/8/p7/8/8/8/R3K3 w - - 0 1").expect("FEN should parse");
        let mut out = Vec::new();
        generate_rook_moves(&position, &mut out);

        let tokens: Vec<String> = out.iter().map(|mv| mv.to_string()).collect();
        assert!(tokens.contains(&"a1a5".to_owned()));
        assert!(!tokens.contains(&"a1a6".to_owned()));
        assert!(!tokens.contains(&"a1e1".to_owned()));
        assert!(tokens.contains(&"a1d1".to_owned()));
        assert_eq!(out.iter().filter(|mv| mv.is_capture()).count(), 1);
        assert_eq!(out.len(), 7);
    }
}
