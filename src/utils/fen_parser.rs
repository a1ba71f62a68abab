//! FEN-to-Position parser.
//!
//! Reads a Forsyth-Edwards Notation string into a `BoardDescription` and hands
//! it to `Position::from_board_description`, which performs the chess-level
//! sanity checks. The clock fields may be omitted and default to `0 1`.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{CastlingRights, Color, Piece};
use crate::game_state::position::{BoardDescription, Position};
use crate::game_state::square::Square;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> ChessResult<Position> {
    Position::from_board_description(parse_fen_description(fen)?)
}

/// Syntax-only parse; no chess rules are checked here.
pub fn parse_fen_description(fen: &str) -> ChessResult<BoardDescription> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() != 4 && fields.len() != 6 {
        return Err(invalid(format!("expected 4 or 6 fields, found {}", fields.len())));
    }

    let pieces = parse_board(fields[0])?;
    let side_to_move = parse_side_to_move(fields[1])?;
    let castling_rights = parse_castling_rights(fields[2])?;
    let en_passant = parse_en_passant_square(fields[3])?;
    let (halfmove_clock, fullmove_number) = match fields.get(4..6) {
        Some([halfmove, fullmove]) => (
            halfmove
                .parse::<u16>()
                .map_err(|_| invalid(format!("invalid halfmove clock: {halfmove}")))?,
            fullmove
                .parse::<u16>()
                .map_err(|_| invalid(format!("invalid fullmove number: {fullmove}")))?,
        ),
        _ => (0, 1),
    };

    Ok(BoardDescription {
        pieces,
        side_to_move,
        castling_rights,
        en_passant,
        halfmove_clock,
        fullmove_number,
    })
}

fn parse_board(board_part: &str) -> ChessResult<Vec<(Square, Piece)>> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks".to_owned()));
    }

    let mut pieces = Vec::with_capacity(32);
    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(format!("invalid empty-square count '{ch}'")));
                }
                file = file
                    .checked_add(empty_count as u8)
                    .filter(|&next| next <= 8)
                    .ok_or_else(|| invalid(format!("rank '{rank_str}' has too many files")))?;
                continue;
            }

            let piece = Piece::from_symbol(ch)
                .ok_or_else(|| invalid(format!("invalid piece character '{ch}'")))?;
            let square = Square::from_coords(file, rank)
                .ok_or_else(|| invalid(format!("rank '{rank_str}' has too many files")))?;
            pieces.push((square, piece));
            file += 1;
        }

        if file != 8 {
            return Err(invalid(format!("rank '{rank_str}' does not sum to 8 files")));
        }
    }

    Ok(pieces)
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(invalid(format!("invalid side to move: {side_part}"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(CastlingRights::NONE);
    }

    castling_part
        .chars()
        .try_fold(CastlingRights::NONE, |rights, ch| {
            let right = match ch {
                'K' => CastlingRights::WHITE_KINGSIDE,
                'Q' => CastlingRights::WHITE_QUEENSIDE,
                'k' => CastlingRights::BLACK_KINGSIDE,
                'q' => CastlingRights::BLACK_QUEENSIDE,
                _ => return Err(invalid(format!("invalid castling character '{ch}'"))),
            };
            Ok(rights.union(right))
        })
}

fn parse_en_passant_square(en_passant_part: &str) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }
    algebraic_to_square(en_passant_part)
        .map(Some)
        .map_err(|_| invalid(format!("invalid en-passant square: {en_passant_part}")))
}

fn invalid(message: String) -> ChessError {
    ChessError::InvalidFen(message)
}
