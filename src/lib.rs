//! Crate root module declarations for the rook_engine chess engine.
//!
//! Exposes the position model, move generation and validation, the state
//! transition, evaluation and search, plus the FEN/UCI boundary helpers, so
//! the binary, benches and external tooling can import stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod move_event;
    pub mod position;
    pub mod square;
    pub mod square_set;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_intent;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod rook_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_sliders;
    pub mod move_generator;
    pub mod move_validator;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod minimax;
    pub mod threading;
    pub mod transposition_table;
    pub mod zobrist;
}

pub mod tables {
    pub mod piece_square_tables;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod render_game_state;
}

pub mod uci {
    pub mod uci_top;
}

pub use chess_errors::{ChessError, ChessResult, ErrorCategory};
pub use game_state::chess_types::{CastleSide, CastlingRights, Color, Piece, PieceKind};
pub use game_state::position::{BoardDescription, Position};
pub use game_state::square::Square;
pub use game_state::square_set::SquareSet;
pub use move_generation::legal_move_apply::apply_move;
pub use move_generation::legal_move_generator::{
    game_status, generate_legal_moves, generate_pseudo_legal_moves, GameStatus,
};
pub use move_generation::move_validator::validate_move;
pub use moves::move_intent::{MoveCategory, MoveIntent, ValidatedMove};
pub use search::board_scoring::{evaluate, MATE_SCORE};
pub use search::minimax::{find_best_move, SearchConfig, SearchEngine, SearchResult};
