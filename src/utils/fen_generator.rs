use crate::game_state::chess_types::{CastlingRights, Color};
use crate::game_state::position::Position;
use crate::game_state::square::Square;

pub fn generate_fen(position: &Position) -> String {
    let side_to_move = match position.side_to_move() {
        Color::White => "w",
        Color::Black => "b",
    };
    let en_passant = position
        .en_passant()
        .map_or_else(|| "-".to_owned(), |square| square.to_string());

    format!(
        "{} {} {} {} {} {}",
        generate_board_field(position),
        side_to_move,
        generate_castling_field(position.castling_rights()),
        en_passant,
        position.halfmove_clock(),
        position.fullmove_number()
    )
}

fn generate_board_field(position: &Position) -> String {
    let mut out = String::new();

    for rank in (0..8u8).rev() {
        let mut empty_count = 0u8;

        for file in 0..8u8 {
            let piece = Square::from_coords(file, rank).and_then(|sq| position.piece_at(sq));
            if let Some(piece) = piece {
                if empty_count > 0 {
                    out.push(char::from(b'0' + empty_count));
                    empty_count = 0;
                }
                out.push(piece.symbol());
            } else {
                empty_count += 1;
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }
        if rank > 0 {
            out.push('/');
        }
    }

    out
}

fn generate_castling_field(rights: CastlingRights) -> String {
    let out: String = [
        (CastlingRights::WHITE_KINGSIDE, 'K'),
        (CastlingRights::WHITE_QUEENSIDE, 'Q'),
        (CastlingRights::BLACK_KINGSIDE, 'k'),
        (CastlingRights::BLACK_QUEENSIDE, 'q'),
    ]
    .iter()
    .filter(|(right, _)| rights.contains(*right))
    .map(|(_, ch)| *ch)
    .collect();

    if out.is_empty() {
        "-".to_owned()
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::generate_fen;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::position::Position;
    use crate::move_generation::legal_move_apply::apply_move;
    use crate::move_generation::move_validator::validate_move;
    use crate::moves::move_intent::MoveIntent;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn initial_position_round_trips() {
        assert_eq!(generate_fen(&Position::initial()), STARTING_POSITION_FEN);
    }

    #[test]
    fn fen_reflects_played_moves() {
        let initial = Position::initial();
        let intent = MoveIntent::from_token("e2e4", None).expect("valid token");
        let mv = validate_move(&initial, intent).expect("legal move");
        let (next, _) = apply_move(&initial, &mv);
        assert_eq!(
            generate_fen(&next),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
    }

    #[test]
    fn parsed_positions_regenerate_identically() {
        for fen in [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R2Pp1k/8/6P1/8 b - e3 0 1",
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        ] {
            let position = parse_fen(fen).expect("FEN should parse");
            assert_eq!(generate_fen(&position), fen);
        }
    }
}
