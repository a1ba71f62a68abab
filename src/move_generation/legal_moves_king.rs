use crate::game_state::chess_rules::castling_geometry;
use crate::game_state::chess_types::{CastleSide, CastlingRights, Piece, PieceKind};
use crate::game_state::position::Position;
use crate::move_generation::legal_move_shared::push_piece_moves;
use crate::moves::king_moves::king_attacks;
use crate::moves::move_intent::{MoveCategory, MoveIntent, ValidatedMove};

pub fn generate_king_moves(position: &Position, out: &mut Vec<ValidatedMove>) {
    let side = position.side_to_move();
    let own_occ = position.occupancy(side);
    let king = Piece::new(PieceKind::King, side);

    let Some(from) = position.king_square(side) else {
        return;
    };

    push_piece_moves(position, king, from, king_attacks(from) - own_occ, out);
    generate_castling_moves(position, out);
}

/// Castling candidates by rights and emptiness only. Whether the king starts
/// in, crosses or lands in check is left to the legality filter.
fn generate_castling_moves(position: &Position, out: &mut Vec<ValidatedMove>) {
    let side = position.side_to_move();
    let king = Piece::new(PieceKind::King, side);
    let rook = Piece::new(PieceKind::Rook, side);

    for castle_side in [CastleSide::KingSide, CastleSide::QueenSide] {
        if !position
            .castling_rights()
            .contains(CastlingRights::for_side(side, castle_side))
        {
            continue;
        }

        let geometry = castling_geometry(side, castle_side);
        if position.piece_at(geometry.king_from) != Some(king)
            || position.piece_at(geometry.rook_from) != Some(rook)
            || !(position.occupied() & geometry.must_be_empty).is_empty()
        {
            continue;
        }

        out.push(ValidatedMove::new(
            MoveIntent::new(geometry.king_from, geometry.king_to),
            king,
            None,
            MoveCategory::Castling(castle_side),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::generate_king_moves;
    use crate::utils::fen_parser::parse_fen;

    fn tokens(fen: &str) -> Vec<String> {
        let position = parse_fen(fen).expect("FEN should parse");
        let mut out = Vec::new();
        generate_king_moves(&position, &mut out);
        out.iter().map(|mv| mv.to_string()).collect()
    }

    #[test]
    fn both_castles_offered_with_clear_paths() {
        let moves = tokens("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        assert!(moves.contains(&"e1g1".to_owned()));
        assert!(moves.contains(&"e1c1".to_owned()));
    }

    #[test]
    fn occupied_b_file_blocks_queenside_only() {
        let moves = tokens("r3k2r/8/8/8/8/8/8/RN2K2R w KQkq - 0 1");
        assert!(moves.contains(&"e1g1".to_owned()));
        assert!(!moves.contains(&"e1c1".to_owned()));
    }

    #[test]
    fn missing_rights_mean_no_castling() {
        let moves = tokens("r3k2r/8/8/8/8/8/8/R3K2R w kq - 0 1");
        assert!(!moves.contains(&"e1g1".to_owned()));
        assert!(!moves.contains(&"e1c1".to_owned()));
        assert_eq!(moves.len(), 5);
    }
}
