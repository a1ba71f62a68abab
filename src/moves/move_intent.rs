//! Move proposals and validated moves.
//!
//! A [`MoveIntent`] is what a user, a protocol or the generator proposes: two
//! squares and an optional promotion kind. A [`ValidatedMove`] can only be
//! produced by the validator or the legal generator and carries what they
//! established about the move, so the transition engine never re-derives it.

use std::fmt;
use std::str::FromStr;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{CastleSide, Color, Piece, PieceKind};
use crate::game_state::square::Square;
use crate::utils::algebraic::algebraic_to_square;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveIntent {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl MoveIntent {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    #[inline]
    pub const fn with_promotion(from: Square, to: Square, promotion: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(promotion),
        }
    }

    /// Range-checked construction from raw square indices.
    pub fn from_indices(from: u8, to: u8, promotion: Option<PieceKind>) -> ChessResult<Self> {
        Ok(Self {
            from: Square::new(from)?,
            to: Square::new(to)?,
            promotion,
        })
    }

    /// Coordinate notation such as `e2e4` or `e7e8q`.
    pub fn to_token(&self) -> String {
        let mut token = format!("{}{}", self.from, self.to);
        if let Some(kind) = self.promotion {
            token.push(kind.symbol());
        }
        token
    }

    /// Parse coordinate notation. The promotion letter may be part of the token
    /// or passed separately; giving two different letters is an error.
    pub fn from_token(token: &str, promotion: Option<char>) -> ChessResult<Self> {
        let token = token.trim();
        if !token.is_ascii() || !(token.len() == 4 || token.len() == 5) {
            return Err(ChessError::InvalidMoveToken(token.to_owned()));
        }

        let from = algebraic_to_square(&token[0..2])?;
        let to = algebraic_to_square(&token[2..4])?;
        let inline = token[4..].chars().next();

        let letter = match (inline, promotion) {
            (Some(a), Some(b)) if !a.eq_ignore_ascii_case(&b) => {
                return Err(ChessError::InvalidMoveToken(format!("{token} with promotion {b}")));
            }
            (Some(a), _) => Some(a),
            (None, b) => b,
        };

        let promotion = letter.map(promotion_from_char).transpose()?;
        Ok(Self { from, to, promotion })
    }
}

/// Promotion letter to piece kind; kings and pawns are rejected.
pub fn promotion_from_char(ch: char) -> ChessResult<PieceKind> {
    PieceKind::from_symbol(ch)
        .filter(|kind| kind.is_promotion_target())
        .ok_or(ChessError::InvalidPromotionChar(ch))
}

impl fmt::Display for MoveIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_token())
    }
}

impl FromStr for MoveIntent {
    type Err = ChessError;

    fn from_str(s: &str) -> ChessResult<Self> {
        MoveIntent::from_token(s, None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveCategory {
    Regular,
    Castling(CastleSide),
    EnPassant,
    Promotion(PieceKind),
}

/// A move known to be legal in the position it was validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValidatedMove {
    intent: MoveIntent,
    piece: Piece,
    captured: Option<Piece>,
    category: MoveCategory,
}

impl ValidatedMove {
    pub(crate) const fn new(
        intent: MoveIntent,
        piece: Piece,
        captured: Option<Piece>,
        category: MoveCategory,
    ) -> Self {
        Self {
            intent,
            piece,
            captured,
            category,
        }
    }

    #[inline]
    pub fn intent(&self) -> MoveIntent {
        self.intent
    }

    #[inline]
    pub fn from(&self) -> Square {
        self.intent.from
    }

    #[inline]
    pub fn to(&self) -> Square {
        self.intent.to
    }

    #[inline]
    pub fn piece(&self) -> Piece {
        self.piece
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.piece.color
    }

    /// The captured piece, en-passant victims included.
    #[inline]
    pub fn captured(&self) -> Option<Piece> {
        self.captured
    }

    #[inline]
    pub fn category(&self) -> MoveCategory {
        self.category
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub fn is_en_passant(&self) -> bool {
        self.category == MoveCategory::EnPassant
    }

    #[inline]
    pub fn is_castling(&self) -> bool {
        matches!(self.category, MoveCategory::Castling(_))
    }

    #[inline]
    pub fn is_pawn_move(&self) -> bool {
        self.piece.kind == PieceKind::Pawn
    }

    /// Square of the captured piece. Differs from the destination only for
    /// en passant, where the victim sits on the destination file and the
    /// source rank.
    pub fn captured_square(&self) -> Option<Square> {
        self.captured?;
        if self.is_en_passant() {
            Square::from_coords(self.to().file(), self.from().rank())
        } else {
            Some(self.to())
        }
    }

    /// Two-rank pawn advance from the home rank.
    pub fn is_double_push(&self) -> bool {
        self.is_pawn_move() && self.from().rank().abs_diff(self.to().rank()) == 2
    }
}

impl From<ValidatedMove> for MoveIntent {
    fn from(mv: ValidatedMove) -> Self {
        mv.intent
    }
}

impl fmt::Display for ValidatedMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.intent, f)
    }
}

#[cfg(test)]
mod tests {
    use super::{MoveCategory, MoveIntent, ValidatedMove};
    use crate::chess_errors::ChessError;
    use crate::game_state::chess_types::{Color, Piece, PieceKind};

    #[test]
    fn token_round_trip() {
        let intent: MoveIntent = "e7e8q".parse().expect("valid token");
        assert_eq!(intent.from.to_string(), "e7");
        assert_eq!(intent.to.to_string(), "e8");
        assert_eq!(intent.promotion, Some(PieceKind::Queen));
        assert_eq!(intent.to_token(), "e7e8q");

        let separate = MoveIntent::from_token("e7e8", Some('N')).expect("valid token");
        assert_eq!(separate.promotion, Some(PieceKind::Knight));
    }

    #[test]
    fn malformed_tokens_are_parse_errors() {
        assert_eq!(
            MoveIntent::from_token("e2", None),
            Err(ChessError::InvalidMoveToken("e2".to_owned()))
        );
        assert!(matches!(
            MoveIntent::from_token("i2e4", None),
            Err(ChessError::InvalidSquareName(_))
        ));
        assert_eq!(
            MoveIntent::from_token("e7e8k", None),
            Err(ChessError::InvalidPromotionChar('k'))
        );
        assert!(MoveIntent::from_token("e7e8q", Some('r')).is_err());
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        assert_eq!(
            MoveIntent::from_indices(12, 64, None),
            Err(ChessError::SquareOutOfRange(64))
        );
        let intent = MoveIntent::from_indices(12, 28, None).expect("in range");
        assert_eq!(intent.to_token(), "e2e4");
    }

    #[test]
    fn en_passant_victim_square_uses_source_rank() {
        let intent = MoveIntent::from_token("e5d6", None).expect("valid token");
        let mv = ValidatedMove::new(
            intent,
            Piece::new(PieceKind::Pawn, Color::White),
            Some(Piece::new(PieceKind::Pawn, Color::Black)),
            MoveCategory::EnPassant,
        );
        assert!(mv.is_en_passant());
        assert!(mv.is_capture());
        assert_eq!(mv.captured_square().map(|s| s.to_string()), Some("d5".to_owned()));
    }
}
