//! Immutable board snapshot.
//!
//! `Position` is the aggregate the whole engine works on: a 64-slot board
//! array, a per-color occupancy cache that always mirrors that array, the side
//! to move, castling rights, the en-passant target, clocks, the Zobrist key and
//! the append-only history of move events. Nothing ever mutates a `Position`
//! after construction; the transition engine builds a fresh one per move.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{castling_geometry, BACK_RANK_ORDER, FIFTY_MOVE_HALFMOVES};
use crate::game_state::chess_types::{CastleSide, CastlingRights, Color, Piece, PieceKind};
use crate::game_state::move_event::MoveEvent;
use crate::game_state::square::Square;
use crate::game_state::square_set::SquareSet;
use crate::move_generation::legal_move_checks::{is_in_check, king_square};
use crate::move_generation::legal_move_shared::BoardView;
use crate::search::zobrist::compute_zobrist_key;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub(crate) board: [Option<Piece>; 64],
    pub(crate) occupancy: [SquareSet; 2],
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u16,
    pub(crate) fullmove_number: u16,
    pub(crate) zobrist_key: u64,
    pub(crate) history: Vec<MoveEvent>,
}

/// Parsed board description handed over by an external notation parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardDescription {
    pub pieces: Vec<(Square, Piece)>,
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

impl BoardDescription {
    /// Empty board with no rights, clocks at their game-start values.
    pub fn new(side_to_move: Color) -> Self {
        Self {
            pieces: Vec::new(),
            side_to_move,
            castling_rights: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    pub fn with_piece(mut self, square: Square, piece: Piece) -> Self {
        self.pieces.push((square, piece));
        self
    }
}

impl Position {
    /// Standard starting arrangement, White to move.
    pub fn initial() -> Self {
        let mut board = [None; 64];
        for (file, kind) in BACK_RANK_ORDER.iter().enumerate() {
            for color in Color::BOTH {
                let back = Square::from_index((color.back_rank() * 8) + file as u8);
                let pawn = Square::from_index((color.pawn_home_rank() * 8) + file as u8);
                board[back.index()] = Some(Piece::new(*kind, color));
                board[pawn.index()] = Some(Piece::new(PieceKind::Pawn, color));
            }
        }

        let mut position = Self {
            board,
            occupancy: occupancy_of(&board),
            side_to_move: Color::White,
            castling_rights: CastlingRights::ALL,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            zobrist_key: 0,
            history: Vec::new(),
        };
        position.zobrist_key = compute_zobrist_key(&position);
        position
    }

    /// Build a position from an externally parsed description, rejecting
    /// arrangements that cannot arise in a legal game.
    pub fn from_board_description(description: BoardDescription) -> ChessResult<Self> {
        let mut board = [None; 64];
        for (square, piece) in &description.pieces {
            if board[square.index()].is_some() {
                return Err(invalid(format!("square {square} is listed twice")));
            }
            if piece.kind == PieceKind::Pawn && (square.rank() == 0 || square.rank() == 7) {
                return Err(invalid(format!("pawn on back rank square {square}")));
            }
            board[square.index()] = Some(*piece);
        }

        for color in Color::BOTH {
            let kings = board
                .iter()
                .filter(|slot| **slot == Some(Piece::new(PieceKind::King, color)))
                .count();
            if kings != 1 {
                return Err(invalid(format!("{color:?} has {kings} kings")));
            }
        }

        for color in Color::BOTH {
            for side in [CastleSide::KingSide, CastleSide::QueenSide] {
                if !description
                    .castling_rights
                    .contains(CastlingRights::for_side(color, side))
                {
                    continue;
                }
                let geometry = castling_geometry(color, side);
                let king_home = board[geometry.king_from.index()]
                    == Some(Piece::new(PieceKind::King, color));
                let rook_home = board[geometry.rook_from.index()]
                    == Some(Piece::new(PieceKind::Rook, color));
                if !king_home || !rook_home {
                    return Err(invalid(format!(
                        "{color:?} {side:?} castling right without king and rook at home"
                    )));
                }
            }
        }

        if let Some(target) = description.en_passant {
            check_en_passant_target(&board, description.side_to_move, target)?;
        }

        let mut position = Self {
            board,
            occupancy: occupancy_of(&board),
            side_to_move: description.side_to_move,
            castling_rights: description.castling_rights,
            en_passant: description.en_passant,
            halfmove_clock: description.halfmove_clock,
            fullmove_number: description.fullmove_number.max(1),
            zobrist_key: 0,
            history: Vec::new(),
        };

        if is_in_check(&position, position.side_to_move.opposite()) {
            return Err(invalid("side not to move is in check".to_owned()));
        }

        position.zobrist_key = compute_zobrist_key(&position);
        Ok(position)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square.index()]
    }

    #[inline]
    pub fn board(&self) -> &[Option<Piece>; 64] {
        &self.board
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> SquareSet {
        self.occupancy[color.index()]
    }

    #[inline]
    pub fn occupied(&self) -> SquareSet {
        self.occupancy[0] | self.occupancy[1]
    }

    /// Squares holding a given piece.
    pub fn pieces(&self, color: Color, kind: PieceKind) -> SquareSet {
        self.occupancy(color)
            .iter()
            .filter(|sq| self.board[sq.index()].map(|p| p.kind) == Some(kind))
            .collect()
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    #[inline]
    pub fn zobrist_key(&self) -> u64 {
        self.zobrist_key
    }

    #[inline]
    pub fn history(&self) -> &[MoveEvent] {
        &self.history
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        king_square(self, color)
    }

    /// Whether the side to move is in check.
    pub fn is_in_check(&self) -> bool {
        is_in_check(self, self.side_to_move)
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= FIFTY_MOVE_HALFMOVES
    }

    /// Re-derive occupancy from the board array and compare it with the cache.
    pub fn verify_invariants(&self) -> ChessResult<()> {
        let derived = occupancy_of(&self.board);
        for color in Color::BOTH {
            if derived[color.index()] != self.occupancy[color.index()] {
                return Err(ChessError::CorruptedPosition(format!(
                    "{color:?} occupancy cache {:?} differs from board {:?}",
                    self.occupancy[color.index()],
                    derived[color.index()]
                )));
            }
        }
        if !(self.occupancy[0] & self.occupancy[1]).is_empty() {
            return Err(ChessError::CorruptedPosition(
                "a square is occupied by both colors".to_owned(),
            ));
        }
        Ok(())
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::initial()
    }
}

impl BoardView for Position {
    #[inline]
    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square.index()]
    }

    #[inline]
    fn occupancy(&self, color: Color) -> SquareSet {
        self.occupancy[color.index()]
    }
}

/// Occupancy sets derived from a board array.
pub(crate) fn occupancy_of(board: &[Option<Piece>; 64]) -> [SquareSet; 2] {
    let mut occupancy = [SquareSet::EMPTY; 2];
    for square in Square::all() {
        if let Some(piece) = board[square.index()] {
            occupancy[piece.color.index()].insert(square);
        }
    }
    occupancy
}

fn check_en_passant_target(
    board: &[Option<Piece>; 64],
    side_to_move: Color,
    target: Square,
) -> ChessResult<()> {
    let expected_rank = match side_to_move {
        Color::White => 5,
        Color::Black => 2,
    };
    if target.rank() != expected_rank {
        return Err(invalid(format!(
            "en-passant target {target} is on the wrong rank"
        )));
    }
    let pushed_from = target.offset(0, side_to_move.forward());
    let pushed_to = target.offset(0, -side_to_move.forward());
    let (Some(pushed_from), Some(pushed_to)) = (pushed_from, pushed_to) else {
        return Err(invalid(format!("en-passant target {target} is off the board")));
    };
    let pawn = Some(Piece::new(PieceKind::Pawn, side_to_move.opposite()));
    if board[target.index()].is_some()
        || board[pushed_from.index()].is_some()
        || board[pushed_to.index()] != pawn
    {
        return Err(invalid(format!(
            "en-passant target {target} does not follow a double pawn push"
        )));
    }
    Ok(())
}

fn invalid(message: String) -> ChessError {
    ChessError::InvalidBoardDescription(message)
}
