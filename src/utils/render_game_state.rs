//! Terminal-oriented Unicode board renderer for the UCI `d` command and for
//! debugging.

use crate::game_state::chess_types::{Color, Piece, PieceKind};
use crate::game_state::position::Position;
use crate::game_state::square::Square;
use crate::utils::fen_generator::generate_fen;

/// Render the board with White at the bottom, followed by the FEN and key.
pub fn render_position(position: &Position) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for rank in (0..8u8).rev() {
        out.push(char::from(b'1' + rank));
        out.push(' ');

        for file in 0..8u8 {
            let piece = Square::from_coords(file, rank).and_then(|sq| position.piece_at(sq));
            out.push(piece.map_or('·', piece_to_unicode));
            if file < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(char::from(b'1' + rank));
        out.push('\n');
    }

    out.push_str("  a b c d e f g h\n");
    out.push_str(&format!("Fen: {}\n", generate_fen(position)));
    out.push_str(&format!("Key: {:016X}", position.zobrist_key()));

    out
}

fn piece_to_unicode(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}
