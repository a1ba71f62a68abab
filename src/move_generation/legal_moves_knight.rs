use crate::game_state::chess_types::{Piece, PieceKind};
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::push_piece_moves;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::move_intent::ValidatedMove;

pub fn generate_knight_moves(position: &Position, out: &mut Vec<ValidatedMove>) {
    let side = position.side_to_move();
    let own_occ = position.occupancy(side);
    let knight = Piece::new(PieceKind::Knight, side);

    for from in position.pieces(side, PieceKind::Knight) {
        push_piece_moves(position, knight, from, knight_attacks(from) - own_occ, out);
    }
}

#[cfg(test)]
mod tests {
    use super::generate_knight_moves;
    use crate::game_state::position::Position;

    #[test]
    fn initial_knights_have_four_moves() {
        let mut out = Vec::new();
        generate_knight_moves(&Position::initial(), &mut out);
        let tokens: Vec<String> = out.iter().map(|mv| mv.to_string()).collect();
        assert_eq!(tokens, vec!["b1a3", "b1c3", "g1f3", "g1h3"]);
    }
}
