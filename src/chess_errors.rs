//! Errors used throughout the chess engine.
//!
//! `ChessError` is the single error type returned by the validator, the board
//! description constructor, the notation helpers and the search entry point.
//! Every variant is recoverable by the caller: an illegal move is rejected and
//! the engine keeps operating on its existing `Position`.
//!
//! Usage guidelines:
//! - Geometry, Path and Rule variants describe why an externally supplied move
//!   was rejected. They are produced by the three validator stages in order.
//! - Parse variants are raised only at the notation boundary (square names,
//!   move tokens, FEN, board descriptions).
//! - Internal variants indicate a bug (for example occupancy drifting away from
//!   the board array). A search that hits one fails as a whole.

use thiserror::Error;

use crate::game_state::chess_types::{Color, PieceKind};
use crate::game_state::square::Square;

pub type ChessResult<T> = Result<T, ChessError>;

/// Coarse grouping of [`ChessError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Geometry,
    Path,
    Rule,
    Parse,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error("square index {0} is outside 0..64")]
    SquareOutOfRange(u8),

    #[error("no piece on source square {0}")]
    EmptySourceSquare(Square),

    #[error("piece on {square} belongs to {owner:?}, not the side to move")]
    NotSideToMove { square: Square, owner: Color },

    #[error("destination {0} is occupied by a friendly piece")]
    FriendlyDestination(Square),

    #[error("{piece:?} on {from} cannot reach {to}")]
    UnreachableDestination {
        piece: PieceKind,
        from: Square,
        to: Square,
    },

    #[error("pawn move {from}{to} reaches the last rank and needs a promotion piece")]
    PromotionRequired { from: Square, to: Square },

    #[error("move {from}{to} cannot carry a promotion")]
    PromotionNotAllowed { from: Square, to: Square },

    #[error("cannot promote to {0:?}")]
    InvalidPromotionPiece(PieceKind),

    #[error("path from {from} to {to} is blocked at {blocker}")]
    PathBlocked {
        from: Square,
        to: Square,
        blocker: Square,
    },

    #[error("move {from}{to} leaves the king in check")]
    KingLeftInCheck { from: Square, to: Square },

    #[error("castling right is not available for this move")]
    CastlingRightsMissing,

    #[error("castling path is occupied at {0}")]
    CastlingPathOccupied(Square),

    #[error("king would castle out of or through check at {0}")]
    CastlingThroughCheck(Square),

    #[error("en-passant capture onto {attempted} does not match the recorded target")]
    EnPassantMismatch { attempted: Square },

    #[error("invalid square name: {0}")]
    InvalidSquareName(String),

    #[error("invalid move token: {0}")]
    InvalidMoveToken(String),

    #[error("invalid promotion character: {0}")]
    InvalidPromotionChar(char),

    #[error("invalid board description: {0}")]
    InvalidBoardDescription(String),

    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("corrupted position: {0}")]
    CorruptedPosition(String),

    #[error("search setup failed: {0}")]
    SearchSetup(String),
}

impl ChessError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ChessError::SquareOutOfRange(_)
            | ChessError::EmptySourceSquare(_)
            | ChessError::NotSideToMove { .. }
            | ChessError::FriendlyDestination(_)
            | ChessError::UnreachableDestination { .. }
            | ChessError::PromotionRequired { .. }
            | ChessError::PromotionNotAllowed { .. }
            | ChessError::InvalidPromotionPiece(_) => ErrorCategory::Geometry,
            ChessError::PathBlocked { .. } => ErrorCategory::Path,
            ChessError::KingLeftInCheck { .. }
            | ChessError::CastlingRightsMissing
            | ChessError::CastlingPathOccupied(_)
            | ChessError::CastlingThroughCheck(_)
            | ChessError::EnPassantMismatch { .. } => ErrorCategory::Rule,
            ChessError::InvalidSquareName(_)
            | ChessError::InvalidMoveToken(_)
            | ChessError::InvalidPromotionChar(_)
            | ChessError::InvalidBoardDescription(_)
            | ChessError::InvalidFen(_) => ErrorCategory::Parse,
            ChessError::CorruptedPosition(_) | ChessError::SearchSetup(_) => {
                ErrorCategory::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ChessError, ErrorCategory};
    use crate::game_state::square::Square;

    #[test]
    fn categories_group_validator_stages() {
        let e4 = Square::from_coords(4, 3).expect("e4 is on the board");
        assert_eq!(
            ChessError::FriendlyDestination(e4).category(),
            ErrorCategory::Geometry
        );
        assert_eq!(
            ChessError::PathBlocked {
                from: e4,
                to: e4,
                blocker: e4
            }
            .category(),
            ErrorCategory::Path
        );
        assert_eq!(
            ChessError::CastlingRightsMissing.category(),
            ErrorCategory::Rule
        );
        assert_eq!(
            ChessError::InvalidMoveToken("zz".to_owned()).category(),
            ErrorCategory::Parse
        );
    }

    #[test]
    fn messages_name_the_squares() {
        let err = ChessError::KingLeftInCheck {
            from: Square::from_coords(4, 0).expect("e1"),
            to: Square::from_coords(4, 1).expect("e2"),
        };
        assert_eq!(err.to_string(), "move e1e2 leaves the king in check");
    }
}
