//! Full legal move generation pipeline.
//!
//! Runs the piece-wise pseudo-legal generators in a fixed order (pawns,
//! knights, bishops, rooks, queens, king), then keeps only moves that do not
//! leave the mover's king attacked. The filter plays each candidate on a
//! scratch board rather than running the full transition.

use crate::game_state::chess_rules::castling_geometry;
use crate::game_state::chess_types::{CastleSide, Color, Piece};
use crate::game_state::position::Position;
use crate::game_state::square::Square;
use crate::move_generation::legal_move_checks::{is_in_check, is_square_attacked};
use crate::move_generation::legal_move_shared::BoardScratch;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_sliders::{
    generate_bishop_moves, generate_queen_moves, generate_rook_moves,
};
use crate::moves::move_intent::{MoveCategory, MoveIntent, ValidatedMove};

/// Outcome of a position from the rules' point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    FiftyMoveDraw,
}

/// Every pseudo-legal move of the side to move, in generation order.
pub fn generate_pseudo_legal_moves(position: &Position) -> Vec<ValidatedMove> {
    let mut pseudo = Vec::<ValidatedMove>::with_capacity(64);

    generate_pawn_moves(position, &mut pseudo);
    generate_knight_moves(position, &mut pseudo);
    generate_bishop_moves(position, &mut pseudo);
    generate_rook_moves(position, &mut pseudo);
    generate_queen_moves(position, &mut pseudo);
    generate_king_moves(position, &mut pseudo);

    pseudo
}

/// Legal moves with everything the transition engine needs already resolved.
pub fn generate_validated_moves(position: &Position) -> Vec<ValidatedMove> {
    let mut legal = generate_pseudo_legal_moves(position);
    legal.retain(|mv| is_legal(position, mv));
    legal
}

/// Legal moves of the side to move as plain intents. Deterministic and free
/// of duplicates for any position.
pub fn generate_legal_moves(position: &Position) -> Vec<MoveIntent> {
    generate_validated_moves(position)
        .into_iter()
        .map(MoveIntent::from)
        .collect()
}

/// Number of legal moves `color` would have if it were its turn. En passant
/// is only counted for the side actually to move.
pub fn legal_move_count(position: &Position, color: Color) -> usize {
    if color == position.side_to_move() {
        return generate_validated_moves(position).len();
    }

    let mut turned = position.clone();
    turned.side_to_move = color;
    turned.en_passant = None;
    generate_validated_moves(&turned).len()
}

pub fn game_status(position: &Position) -> GameStatus {
    if generate_validated_moves(position).is_empty() {
        if position.is_in_check() {
            return GameStatus::Checkmate {
                winner: position.side_to_move().opposite(),
            };
        }
        return GameStatus::Stalemate;
    }
    if position.is_fifty_move_draw() {
        return GameStatus::FiftyMoveDraw;
    }
    GameStatus::Ongoing
}

/// Whether a pseudo-legal move keeps its own king safe. Castling additionally
/// requires that the king neither starts in nor passes through check.
pub(crate) fn is_legal(position: &Position, mv: &ValidatedMove) -> bool {
    if let MoveCategory::Castling(side) = mv.category() {
        if castling_check_square(position, mv.color(), side).is_some() {
            return false;
        }
    }
    !leaves_king_in_check(position, mv)
}

/// First square of the king's castling route (start square included) that the
/// enemy attacks.
pub(crate) fn castling_check_square(
    position: &Position,
    color: Color,
    side: CastleSide,
) -> Option<Square> {
    let geometry = castling_geometry(color, side);
    std::iter::once(geometry.king_from)
        .chain(geometry.king_path.iter())
        .find(|&square| is_square_attacked(position, square, color.opposite()))
}

/// Play the move on a scratch board and test the mover's king.
pub(crate) fn leaves_king_in_check(position: &Position, mv: &ValidatedMove) -> bool {
    let mut scratch = BoardScratch::from_position(position);
    let color = mv.color();

    if let Some(victim_square) = mv.captured_square() {
        scratch.clear(victim_square);
    }
    scratch.relocate(mv.from(), mv.to());

    match mv.category() {
        MoveCategory::Promotion(kind) => scratch.place(mv.to(), Piece::new(kind, color)),
        MoveCategory::Castling(side) => {
            let geometry = castling_geometry(color, side);
            scratch.relocate(geometry.rook_from, geometry.rook_to);
        }
        MoveCategory::Regular | MoveCategory::EnPassant => {}
    }

    is_in_check(&scratch, color)
}
