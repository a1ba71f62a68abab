//! Independent validation of externally supplied moves.
//!
//! A move token coming from a protocol is never trusted to match the
//! generator's output. It goes through three stages, each short-circuiting
//! with the matching `ChessError`:
//!
//! 1. geometry: ownership, destination, movement pattern, promotion marker;
//! 2. path: the squares a slider crosses must be empty;
//! 3. rules: castling rights and safety, en-passant target, own king safety.
//!
//! Success yields a `ValidatedMove` that the transition engine consumes as-is.

use tracing::trace;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{castle_side_for_king_move, castling_geometry};
use crate::game_state::chess_types::{CastlingRights, Piece, PieceKind};
use crate::game_state::position::Position;
use crate::game_state::square::Square;
use crate::move_generation::legal_move_generator::{castling_check_square, leaves_king_in_check};
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::move_intent::{MoveCategory, MoveIntent, ValidatedMove};
use crate::moves::pawn_moves::pawn_attacks;

pub fn validate_move(position: &Position, intent: MoveIntent) -> ChessResult<ValidatedMove> {
    let result = check_geometry(position, intent).and_then(|mv| {
        check_path(position, &mv)?;
        check_rules(position, &mv)?;
        Ok(mv)
    });
    if let Err(err) = &result {
        trace!(mv = %intent, %err, "rejected move");
    }
    result
}

/// Stage 1. Classifies the move; no board simulation.
pub fn check_geometry(position: &Position, intent: MoveIntent) -> ChessResult<ValidatedMove> {
    let MoveIntent {
        from,
        to,
        promotion,
    } = intent;
    let side = position.side_to_move();

    let piece = position
        .piece_at(from)
        .ok_or(ChessError::EmptySourceSquare(from))?;
    if piece.color != side {
        return Err(ChessError::NotSideToMove {
            square: from,
            owner: piece.color,
        });
    }

    let target = position.piece_at(to);
    if target.is_some_and(|t| t.color == side) {
        return Err(ChessError::FriendlyDestination(to));
    }

    let unreachable = ChessError::UnreachableDestination {
        piece: piece.kind,
        from,
        to,
    };

    let mut category = match piece.kind {
        PieceKind::Pawn => pawn_category(position, piece, from, to).ok_or(unreachable)?,
        PieceKind::Knight if knight_attacks(from).contains(to) => MoveCategory::Regular,
        PieceKind::King if king_attacks(from).contains(to) => MoveCategory::Regular,
        PieceKind::King => castle_side_for_king_move(side, from, to)
            .map(MoveCategory::Castling)
            .ok_or(unreachable)?,
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
            if slider_step(piece.kind, from, to).is_some() =>
        {
            MoveCategory::Regular
        }
        _ => return Err(unreachable),
    };

    let reaches_last_rank = piece.kind == PieceKind::Pawn && to.rank() == side.promotion_rank();
    // No en-passant target can sit on the last rank, so an empty diagonal there is unreachable.
    if reaches_last_rank && category == MoveCategory::EnPassant {
        return Err(ChessError::UnreachableDestination {
            piece: piece.kind,
            from,
            to,
        });
    }
    match (reaches_last_rank, promotion) {
        (true, None) => return Err(ChessError::PromotionRequired { from, to }),
        (true, Some(kind)) if !kind.is_promotion_target() => {
            return Err(ChessError::InvalidPromotionPiece(kind));
        }
        (true, Some(kind)) => category = MoveCategory::Promotion(kind),
        (false, Some(_)) => return Err(ChessError::PromotionNotAllowed { from, to }),
        (false, None) => {}
    }

    let captured = match category {
        MoveCategory::EnPassant => Some(Piece::new(PieceKind::Pawn, side.opposite())),
        _ => target,
    };
    Ok(ValidatedMove::new(intent, piece, captured, category))
}

/// Stage 2. Sliders need every square strictly between the endpoints empty.
pub fn check_path(position: &Position, mv: &ValidatedMove) -> ChessResult<()> {
    let kind = mv.piece().kind;
    if !kind.is_slider() {
        return Ok(());
    }
    let Some((df, dr)) = slider_step(kind, mv.from(), mv.to()) else {
        return Err(ChessError::UnreachableDestination {
            piece: kind,
            from: mv.from(),
            to: mv.to(),
        });
    };

    let mut cursor = mv.from().offset(df, dr);
    while let Some(square) = cursor {
        if square == mv.to() {
            break;
        }
        if position.piece_at(square).is_some() {
            return Err(ChessError::PathBlocked {
                from: mv.from(),
                to: mv.to(),
                blocker: square,
            });
        }
        cursor = square.offset(df, dr);
    }
    Ok(())
}

/// Stage 3. Chess-rule legality on the actual position.
pub fn check_rules(position: &Position, mv: &ValidatedMove) -> ChessResult<()> {
    match mv.category() {
        MoveCategory::Castling(side) => {
            let color = mv.color();
            let geometry = castling_geometry(color, side);
            if !position
                .castling_rights()
                .contains(CastlingRights::for_side(color, side))
                || position.piece_at(geometry.rook_from) != Some(Piece::new(PieceKind::Rook, color))
            {
                return Err(ChessError::CastlingRightsMissing);
            }
            if let Some(blocker) = (position.occupied() & geometry.must_be_empty).first() {
                return Err(ChessError::CastlingPathOccupied(blocker));
            }
            if let Some(attacked) = castling_check_square(position, color, side) {
                return Err(ChessError::CastlingThroughCheck(attacked));
            }
        }
        MoveCategory::EnPassant if position.en_passant() != Some(mv.to()) => {
            return Err(ChessError::EnPassantMismatch { attempted: mv.to() });
        }
        _ => {}
    }

    if leaves_king_in_check(position, mv) {
        return Err(ChessError::KingLeftInCheck {
            from: mv.from(),
            to: mv.to(),
        });
    }
    Ok(())
}

/// Pawn move shape: push, double push from home, capture, or a diagonal onto
/// an empty square (an en-passant attempt).
fn pawn_category(position: &Position, pawn: Piece, from: Square, to: Square) -> Option<MoveCategory> {
    let side = pawn.color;
    let one_step = from.offset(0, side.forward())?;

    if to == one_step {
        return position.piece_at(to).is_none().then_some(MoveCategory::Regular);
    }
    if from.rank() == side.pawn_home_rank() && Some(to) == one_step.offset(0, side.forward()) {
        let clear = position.piece_at(one_step).is_none() && position.piece_at(to).is_none();
        return clear.then_some(MoveCategory::Regular);
    }
    if pawn_attacks(side, from).contains(to) {
        return Some(match position.piece_at(to) {
            Some(_) => MoveCategory::Regular,
            None => MoveCategory::EnPassant,
        });
    }
    None
}

/// Unit step from `from` towards `to` when the slider can move along that line.
fn slider_step(kind: PieceKind, from: Square, to: Square) -> Option<(i8, i8)> {
    if from == to {
        return None;
    }
    let df = to.file() as i8 - from.file() as i8;
    let dr = to.rank() as i8 - from.rank() as i8;
    let orthogonal = df == 0 || dr == 0;
    let diagonal = df.abs() == dr.abs();

    let allowed = match kind {
        PieceKind::Rook => orthogonal,
        PieceKind::Bishop => diagonal,
        PieceKind::Queen => orthogonal || diagonal,
        _ => false,
    };
    allowed.then_some((df.signum(), dr.signum()))
}

#[cfg(test)]
mod tests {
    use super::validate_move;
    use crate::chess_errors::{ChessError, ErrorCategory};
    use crate::game_state::chess_types::{Color, PieceKind};
    use crate::game_state::position::Position;
    use crate::move_generation::legal_move_generator::generate_legal_moves;
    use crate::moves::move_intent::{MoveCategory, MoveIntent};
    use crate::utils::algebraic::algebraic_to_square;
    use crate::utils::fen_parser::parse_fen;

    fn check(position: &Position, token: &str) -> Result<(), ChessError> {
        let intent = MoveIntent::from_token(token, None).expect("valid token");
        validate_move(position, intent).map(|_| ())
    }

    fn sq(name: &str) -> crate::game_state::square::Square {
        algebraic_to_square(name).expect("valid square")
    }

    #[test]
    fn e2e4_validates_as_a_pawn_move() {
        let position = Position::initial();
        let intent = MoveIntent::from_token("e2e4", None).expect("valid token");
        let mv = validate_move(&position, intent).expect("legal opening move");
        assert_eq!(mv.piece().kind, PieceKind::Pawn);
        assert!(!mv.is_capture());
        assert!(mv.is_double_push());
    }

    #[test]
    fn geometry_errors() {
        let position = Position::initial();
        assert_eq!(check(&position, "e3e4"), Err(ChessError::EmptySourceSquare(sq("e3"))));
        assert_eq!(
            check(&position, "e7e5"),
            Err(ChessError::NotSideToMove {
                square: sq("e7"),
                owner: Color::Black
            })
        );
        assert_eq!(check(&position, "d1d2"), Err(ChessError::FriendlyDestination(sq("d2"))));
        assert!(matches!(
            check(&position, "g1g3"),
            Err(ChessError::UnreachableDestination { .. })
        ));
        assert!(matches!(
            check(&position, "e2e5"),
            Err(ChessError::UnreachableDestination { .. })
        ));
        assert_eq!(
            check(&position, "e2e4q"),
            Err(ChessError::PromotionNotAllowed {
                from: sq("e2"),
                to: sq("e4")
            })
        );
    }

    #[test]
    fn promotion_marker_is_required_on_the_last_rank() {
        let position = parse_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(
            check(&position, "b7b8"),
            Err(ChessError::PromotionRequired {
                from: sq("b7"),
                to: sq("b8")
            })
        );
        assert!(check(&position, "b7b8r").is_ok());

        let king_promotion = MoveIntent::with_promotion(sq("b7"), sq("b8"), PieceKind::King);
        assert_eq!(
            validate_move(&position, king_promotion),
            Err(ChessError::InvalidPromotionPiece(PieceKind::King))
        );
    }

    #[test]
    fn pawn_cannot_promote_diagonally_onto_an_empty_square() {
        let position = parse_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let unreachable = |to: &str| ChessError::UnreachableDestination {
            piece: PieceKind::Pawn,
            from: sq("b7"),
            to: sq(to),
        };
        assert_eq!(check(&position, "b7c8q"), Err(unreachable("c8")));
        assert_eq!(check(&position, "b7a8n"), Err(unreachable("a8")));
        assert_eq!(check(&position, "b7c8"), Err(unreachable("c8")));

        let generated = generate_legal_moves(&position);
        assert!(generated.iter().all(|mv| mv.to != sq("c8") && mv.to != sq("a8")));
    }

    #[test]
    fn pawn_diagonal_onto_an_empty_square_needs_the_en_passant_target() {
        let position = parse_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(
            check(&position, "e2d3"),
            Err(ChessError::EnPassantMismatch {
                attempted: sq("d3")
            })
        );
        assert_eq!(
            check(&position, "e2f3"),
            Err(ChessError::EnPassantMismatch {
                attempted: sq("f3")
            })
        );
    }

    #[test]
    fn pawn_push_onto_an_occupied_last_rank_square_is_unreachable() {
        let blocked = parse_fen("1n2k3/1P6/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(
            check(&blocked, "b7b8q"),
            Err(ChessError::UnreachableDestination {
                piece: PieceKind::Pawn,
                from: sq("b7"),
                to: sq("b8")
            })
        );

        let capture = parse_fen("2n1k3/1P6/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let intent = MoveIntent::from_token("b7c8q", None).expect("valid token");
        let mv = validate_move(&capture, intent).expect("capture promotion");
        assert_eq!(mv.category(), MoveCategory::Promotion(PieceKind::Queen));
        assert_eq!(mv.captured().map(|p| p.kind), Some(PieceKind::Knight));
        assert!(generate_legal_moves(&capture).contains(&intent));
    }

    #[test]
    fn blocked_slider_reports_the_blocker() {
        let position = Position::initial();
        assert_eq!(
            check(&position, "a1a3"),
            Err(ChessError::PathBlocked {
                from: sq("a1"),
                to: sq("a3"),
                blocker: sq("a2")
            })
        );
        assert_eq!(
            check(&position, "c1e3").map_err(|e| e.category()),
            Err(ErrorCategory::Path)
        );
    }

    #[test]
    fn rule_errors() {
        let pinned = parse_fen("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(
            check(&pinned, "e2d3"),
            Err(ChessError::KingLeftInCheck {
                from: sq("e2"),
                to: sq("d3")
            })
        );

        let no_rights = parse_fen("4k3/8/8/8/8/8/8/4K2R w - - 0 1").expect("FEN should parse");
        assert_eq!(check(&no_rights, "e1g1"), Err(ChessError::CastlingRightsMissing));

        let occupied = parse_fen("4k3/8/8/8/8/8/8/4KN1R w K - 0 1").expect("FEN should parse");
        assert_eq!(
            check(&occupied, "e1g1"),
            Err(ChessError::CastlingPathOccupied(sq("f1")))
        );

        let attacked = parse_fen("4kr2/8/8/8/8/8/8/4K2R w K - 0 1").expect("FEN should parse");
        assert_eq!(
            check(&attacked, "e1g1"),
            Err(ChessError::CastlingThroughCheck(sq("f1")))
        );

        let no_target = parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(
            check(&no_target, "e5d6"),
            Err(ChessError::EnPassantMismatch {
                attempted: sq("d6")
            })
        );
    }

    #[test]
    fn en_passant_with_matching_target_is_accepted() {
        let position = parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        let intent = MoveIntent::from_token("e5d6", None).expect("valid token");
        let mv = validate_move(&position, intent).expect("legal en passant");
        assert!(mv.is_en_passant());
        assert_eq!(mv.captured_square(), Some(sq("d5")));
    }
}
