use crate::game_state::chess_types::{Piece, PieceKind};
use crate::game_state::position::Position;
use crate::game_state::square::Square;
use crate::moves::move_intent::{MoveCategory, MoveIntent, ValidatedMove};
use crate::moves::pawn_moves::pawn_attacks;

pub fn generate_pawn_moves(position: &Position, out: &mut Vec<ValidatedMove>) {
    let side = position.side_to_move();
    let enemy_occ = position.occupancy(side.opposite());
    let occupied = position.occupied();
    let pawn = Piece::new(PieceKind::Pawn, side);

    for from in position.pieces(side, PieceKind::Pawn) {
        if let Some(one_step) = from.offset(0, side.forward()) {
            if !occupied.contains(one_step) {
                push_pawn_move(pawn, from, one_step, None, out);

                if from.rank() == side.pawn_home_rank() {
                    if let Some(two_step) = one_step.offset(0, side.forward()) {
                        if !occupied.contains(two_step) {
                            push_pawn_move(pawn, from, two_step, None, out);
                        }
                    }
                }
            }
        }

        for to in pawn_attacks(side, from) {
            if enemy_occ.contains(to) {
                push_pawn_move(pawn, from, to, position.piece_at(to), out);
            } else if position.en_passant() == Some(to) {
                out.push(ValidatedMove::new(
                    MoveIntent::new(from, to),
                    pawn,
                    Some(Piece::new(PieceKind::Pawn, side.opposite())),
                    MoveCategory::EnPassant,
                ));
            }
        }
    }
}

/// Plain pawn move, expanded into the four promotions on the last rank.
fn push_pawn_move(
    pawn: Piece,
    from: Square,
    to: Square,
    captured: Option<Piece>,
    out: &mut Vec<ValidatedMove>,
) {
    if to.rank() == pawn.color.promotion_rank() {
        for kind in PieceKind::PROMOTIONS {
            out.push(ValidatedMove::new(
                MoveIntent::with_promotion(from, to, kind),
                pawn,
                captured,
                MoveCategory::Promotion(kind),
            ));
        }
    } else {
        out.push(ValidatedMove::new(
            MoveIntent::new(from, to),
            pawn,
            captured,
            MoveCategory::Regular,
        ));
    }
}
