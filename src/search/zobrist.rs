//! Zobrist hashing for position identity and transposition lookups.
//!
//! Keys come from a fixed-seed generator so hashes are deterministic across
//! runs. Besides one key per (color, kind, square) there are keys for the side
//! to move, each of the 16 castling-rights states and each en-passant file.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game_state::chess_rules::castling_geometry;
use crate::game_state::chess_types::{CastlingRights, Color, Piece, PieceKind};
use crate::game_state::position::Position;
use crate::game_state::square::Square;
use crate::move_generation::legal_move_apply::{castling_rights_after, en_passant_after};
use crate::moves::move_intent::{MoveCategory, ValidatedMove};

const ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    side_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for color in &mut piece_square {
        for kind in color {
            for key in kind {
                *key = rng.random::<u64>();
            }
        }
    }

    let side_to_move = rng.random::<u64>();

    let mut castling = [0u64; 16];
    for key in &mut castling {
        *key = rng.random::<u64>();
    }

    let mut en_passant_file = [0u64; 8];
    for key in &mut en_passant_file {
        *key = rng.random::<u64>();
    }

    ZobristTables {
        piece_square,
        side_to_move,
        castling,
        en_passant_file,
    }
}

#[inline]
pub fn piece_square_key(piece: Piece, square: Square) -> u64 {
    tables().piece_square[piece.color.index()][piece.kind.index()][square.index()]
}

#[inline]
pub fn castling_key(castling_rights: CastlingRights) -> u64 {
    tables().castling[castling_rights.bits() as usize]
}

#[inline]
pub fn en_passant_key(target: Option<Square>) -> u64 {
    target.map_or(0, |square| tables().en_passant_file[square.file() as usize])
}

/// Toggle key, XORed in while Black is to move.
#[inline]
pub fn side_to_move_key() -> u64 {
    tables().side_to_move
}

/// Full key of a position, folding every occupied square.
pub fn compute_zobrist_key(position: &Position) -> u64 {
    let mut key = 0u64;

    for square in position.occupied() {
        if let Some(piece) = position.piece_at(square) {
            key ^= piece_square_key(piece, square);
        }
    }

    if position.side_to_move() == Color::Black {
        key ^= side_to_move_key();
    }
    key ^= castling_key(position.castling_rights());
    key ^= en_passant_key(position.en_passant());
    key
}

/// Key of the position reached by playing `mv`, derived from the current key
/// without rescanning the board.
pub fn key_after_move(position: &Position, mv: &ValidatedMove) -> u64 {
    let mover = mv.piece();
    let mut key = position.zobrist_key();

    key ^= piece_square_key(mover, mv.from());

    if let (Some(captured), Some(captured_square)) = (mv.captured(), mv.captured_square()) {
        key ^= piece_square_key(captured, captured_square);
    }

    let landing = match mv.category() {
        MoveCategory::Promotion(kind) => Piece::new(kind, mover.color),
        _ => mover,
    };
    key ^= piece_square_key(landing, mv.to());

    if let MoveCategory::Castling(side) = mv.category() {
        let geometry = castling_geometry(mover.color, side);
        let rook = Piece::new(PieceKind::Rook, mover.color);
        key ^= piece_square_key(rook, geometry.rook_from);
        key ^= piece_square_key(rook, geometry.rook_to);
    }

    key ^= side_to_move_key();
    key ^= castling_key(position.castling_rights());
    key ^= castling_key(castling_rights_after(position.castling_rights(), mv));
    key ^= en_passant_key(position.en_passant());
    key ^= en_passant_key(en_passant_after(mv));
    key
}
