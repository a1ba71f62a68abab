//! Read-only board access shared by attack detection and the legality filter.

use crate::game_state::chess_types::{Color, Piece, PieceKind};
use crate::game_state::position::Position;
use crate::game_state::square::Square;
use crate::game_state::square_set::SquareSet;
use crate::moves::move_intent::{MoveCategory, MoveIntent, ValidatedMove};

/// Anything that can answer "what stands on this square" and "which squares
/// does this color occupy".
pub trait BoardView {
    fn piece_at(&self, square: Square) -> Option<Piece>;

    fn occupancy(&self, color: Color) -> SquareSet;

    #[inline]
    fn occupied(&self) -> SquareSet {
        self.occupancy(Color::White) | self.occupancy(Color::Black)
    }

    #[inline]
    fn piece_kind_for(&self, color: Color, square: Square) -> Option<PieceKind> {
        self.piece_at(square)
            .filter(|piece| piece.color == color)
            .map(|piece| piece.kind)
    }
}

/// Board array plus occupancy, without any game metadata.
///
/// The legality filter plays a candidate move on a scratch copy and asks
/// whether the mover's king is attacked; the full transition is never run.
#[derive(Debug, Clone, Copy)]
pub struct BoardScratch {
    board: [Option<Piece>; 64],
    occupancy: [SquareSet; 2],
}

impl BoardScratch {
    pub fn from_position(position: &Position) -> Self {
        Self {
            board: position.board,
            occupancy: position.occupancy,
        }
    }

    pub fn clear(&mut self, square: Square) -> Option<Piece> {
        let previous = self.board[square.index()].take();
        if let Some(piece) = previous {
            self.occupancy[piece.color.index()].remove(square);
        }
        previous
    }

    pub fn place(&mut self, square: Square, piece: Piece) {
        self.clear(square);
        self.board[square.index()] = Some(piece);
        self.occupancy[piece.color.index()].insert(square);
    }

    /// Move whatever stands on `from` to `to`, replacing any occupant.
    pub fn relocate(&mut self, from: Square, to: Square) {
        if let Some(piece) = self.clear(from) {
            self.place(to, piece);
        }
    }
}

impl BoardView for BoardScratch {
    #[inline]
    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square.index()]
    }

    #[inline]
    fn occupancy(&self, color: Color) -> SquareSet {
        self.occupancy[color.index()]
    }
}

/// Push one move per destination in `targets`, annotating captures from the
/// board. Own-occupied squares must already be removed from `targets`.
pub(crate) fn push_piece_moves(
    position: &Position,
    piece: Piece,
    from: Square,
    targets: SquareSet,
    out: &mut Vec<ValidatedMove>,
) {
    for to in targets {
        out.push(ValidatedMove::new(
            MoveIntent::new(from, to),
            piece,
            position.piece_at(to),
            MoveCategory::Regular,
        ));
    }
}
