//! The state transition engine.
//!
//! `apply_move` takes a move that has already been validated against the
//! position and returns a brand-new `Position` plus the `MoveEvent` describing
//! what happened. The input is never touched. The board array and occupancy
//! cache are edited together through `BoardEdit`, and every field of the
//! successor is set in a single constructor expression.

use crate::game_state::chess_rules::castling_geometry;
use crate::game_state::chess_types::{CastlingRights, Color, Piece, PieceKind};
use crate::game_state::move_event::MoveEvent;
use crate::game_state::position::{occupancy_of, Position};
use crate::game_state::square::Square;
use crate::game_state::square_set::SquareSet;
use crate::moves::move_intent::{MoveCategory, ValidatedMove};
use crate::search::zobrist::key_after_move;

/// Board array and occupancy cache under edit; both change in the same call.
struct BoardEdit {
    board: [Option<Piece>; 64],
    occupancy: [SquareSet; 2],
}

impl BoardEdit {
    fn new(position: &Position) -> Self {
        Self {
            board: position.board,
            occupancy: position.occupancy,
        }
    }

    fn remove(&mut self, square: Square) {
        if let Some(piece) = self.board[square.index()].take() {
            self.occupancy[piece.color.index()].remove(square);
        }
    }

    fn put(&mut self, square: Square, piece: Piece) {
        self.remove(square);
        self.board[square.index()] = Some(piece);
        self.occupancy[piece.color.index()].insert(square);
    }
}

pub fn apply_move(position: &Position, mv: &ValidatedMove) -> (Position, MoveEvent) {
    let mover = mv.piece();
    let color = mover.color;
    let (from, to) = (mv.from(), mv.to());
    let mut edit = BoardEdit::new(position);

    let event = match mv.category() {
        MoveCategory::Regular => {
            edit.remove(from);
            edit.put(to, mover);
            MoveEvent::Moved {
                piece: mover,
                from,
                to,
                captured: mv.captured(),
            }
        }
        MoveCategory::Castling(side) => {
            let geometry = castling_geometry(color, side);
            let rook = Piece::new(PieceKind::Rook, color);
            edit.remove(geometry.king_from);
            edit.remove(geometry.rook_from);
            edit.put(geometry.king_to, mover);
            edit.put(geometry.rook_to, rook);
            MoveEvent::Castled {
                color,
                side,
                king_from: geometry.king_from,
                king_to: geometry.king_to,
                rook_from: geometry.rook_from,
                rook_to: geometry.rook_to,
            }
        }
        MoveCategory::EnPassant => {
            // The victim stands beside the source square, not on the target.
            let captured_square = mv.captured_square().unwrap_or(to);
            edit.remove(captured_square);
            edit.remove(from);
            edit.put(to, mover);
            MoveEvent::EnPassant {
                color,
                from,
                to,
                captured_square,
            }
        }
        MoveCategory::Promotion(kind) => {
            edit.remove(from);
            edit.put(to, Piece::new(kind, color));
            MoveEvent::Promoted {
                color,
                from,
                to,
                promoted_to: kind,
                captured: mv.captured(),
            }
        }
    };

    debug_assert_eq!(edit.occupancy, occupancy_of(&edit.board));

    let halfmove_clock = if mv.is_pawn_move() || mv.is_capture() {
        0
    } else {
        position.halfmove_clock().saturating_add(1)
    };
    let fullmove_number = match color {
        Color::White => position.fullmove_number(),
        Color::Black => position.fullmove_number().saturating_add(1),
    };

    let mut history = position.history.clone();
    history.push(event);

    let next = Position {
        board: edit.board,
        occupancy: edit.occupancy,
        side_to_move: color.opposite(),
        castling_rights: castling_rights_after(position.castling_rights(), mv),
        en_passant: en_passant_after(mv),
        halfmove_clock,
        fullmove_number,
        zobrist_key: key_after_move(position, mv),
        history,
    };

    (next, event)
}

/// Rights left after `mv`: a king move drops both of its side's bits, and any
/// move from or onto a rook corner drops that corner's bit.
pub fn castling_rights_after(rights: CastlingRights, mv: &ValidatedMove) -> CastlingRights {
    let mut remaining = rights;
    if mv.piece().kind == PieceKind::King {
        remaining = remaining.without(CastlingRights::for_color(mv.color()));
    }
    for square in [mv.from(), mv.to()] {
        remaining = remaining.without(corner_right(square));
    }
    remaining
}

fn corner_right(square: Square) -> CastlingRights {
    match square.index() {
        0 => CastlingRights::WHITE_QUEENSIDE,
        7 => CastlingRights::WHITE_KINGSIDE,
        56 => CastlingRights::BLACK_QUEENSIDE,
        63 => CastlingRights::BLACK_KINGSIDE,
        _ => CastlingRights::NONE,
    }
}

/// The jumped-over square after a double pawn push, otherwise none.
pub fn en_passant_after(mv: &ValidatedMove) -> Option<Square> {
    if !mv.is_double_push() {
        return None;
    }
    Square::from_coords(mv.from().file(), (mv.from().rank() + mv.to().rank()) / 2)
}
