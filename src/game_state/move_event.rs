use crate::game_state::chess_types::{CastleSide, Color, Piece, PieceKind};
use crate::game_state::square::Square;

/// Record of what a transition did, appended to the position history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveEvent {
    Moved {
        piece: Piece,
        from: Square,
        to: Square,
        captured: Option<Piece>,
    },
    Castled {
        color: Color,
        side: CastleSide,
        king_from: Square,
        king_to: Square,
        rook_from: Square,
        rook_to: Square,
    },
    EnPassant {
        color: Color,
        from: Square,
        to: Square,
        captured_square: Square,
    },
    Promoted {
        color: Color,
        from: Square,
        to: Square,
        promoted_to: PieceKind,
        captured: Option<Piece>,
    },
}

impl MoveEvent {
    pub fn from(&self) -> Square {
        match *self {
            MoveEvent::Moved { from, .. }
            | MoveEvent::EnPassant { from, .. }
            | MoveEvent::Promoted { from, .. } => from,
            MoveEvent::Castled { king_from, .. } => king_from,
        }
    }

    pub fn to(&self) -> Square {
        match *self {
            MoveEvent::Moved { to, .. }
            | MoveEvent::EnPassant { to, .. }
            | MoveEvent::Promoted { to, .. } => to,
            MoveEvent::Castled { king_to, .. } => king_to,
        }
    }

    pub fn is_capture(&self) -> bool {
        match self {
            MoveEvent::Moved { captured, .. } | MoveEvent::Promoted { captured, .. } => {
                captured.is_some()
            }
            MoveEvent::EnPassant { .. } => true,
            MoveEvent::Castled { .. } => false,
        }
    }
}
