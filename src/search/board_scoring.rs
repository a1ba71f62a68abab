//! Static evaluation.
//!
//! Search delegates position scoring to the `BoardScorer` trait so heuristics
//! can be swapped without touching the tree walk. Every scorer returns an
//! absolute score in centipawns: positive favours White, negative favours
//! Black, regardless of whose turn it is.

use crate::game_state::chess_types::{Color, PieceKind};
use crate::game_state::position::Position;
use crate::move_generation::legal_move_generator::{generate_validated_moves, legal_move_count};
use crate::tables::piece_square_tables::{piece_square_bonus, GamePhase};

/// Score of a checkmate, far above any material balance.
pub const MATE_SCORE: i32 = 30_000;

/// Non-pawn, non-king material (both sides) at or below which endgame tables
/// apply even with queens on the board.
pub const ENDGAME_MATERIAL_THRESHOLD: i32 = 1_300;

pub trait BoardScorer: Send + Sync {
    /// Score from White's point of view.
    fn score(&self, position: &Position) -> i32;
}

/// Material only; no move generation, no terminal detection.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    pub fn material_balance(position: &Position) -> i32 {
        Color::BOTH
            .iter()
            .map(|&color| {
                color.sign()
                    * position
                        .occupancy(color)
                        .iter()
                        .filter_map(|sq| position.piece_at(sq))
                        .map(|piece| piece.kind.value())
                        .sum::<i32>()
            })
            .sum()
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, position: &Position) -> i32 {
        Self::material_balance(position)
    }
}

/// The engine's evaluator: material, phase-dependent piece-square tables,
/// single-counted mobility and king safety, with mate and stalemate detection.
#[derive(Debug, Clone, Copy)]
pub struct StandardScorer {
    pub mobility_weight: i32,
    pub check_penalty: i32,
    pub pawn_shield_bonus: i32,
}

impl Default for StandardScorer {
    fn default() -> Self {
        Self {
            mobility_weight: 2,
            check_penalty: 50,
            pawn_shield_bonus: 10,
        }
    }
}

impl StandardScorer {
    fn positional_term(position: &Position, phase: GamePhase) -> i32 {
        position
            .occupied()
            .iter()
            .filter_map(|sq| position.piece_at(sq).map(|piece| (sq, piece)))
            .map(|(sq, piece)| {
                piece.color.sign() * piece_square_bonus(piece.kind, piece.color, sq, phase)
            })
            .sum()
    }

    /// `weight * (white moves - black moves)`; the side to move's count is
    /// passed in since the terminal check already produced it.
    fn mobility_term(&self, position: &Position, mover_count: usize) -> i32 {
        let side = position.side_to_move();
        let waiting_count = legal_move_count(position, side.opposite()) as i32;
        let mover_count = mover_count as i32;
        self.mobility_weight * side.sign() * (mover_count - waiting_count)
    }

    fn king_safety_term(&self, position: &Position, phase: GamePhase) -> i32 {
        let mut score = 0;
        let side = position.side_to_move();
        if position.is_in_check() {
            score -= side.sign() * self.check_penalty;
        }
        if phase == GamePhase::Middlegame {
            for color in Color::BOTH {
                score += color.sign() * self.pawn_shield_bonus * pawn_shield_count(position, color);
            }
        }
        score
    }
}

impl BoardScorer for StandardScorer {
    fn score(&self, position: &Position) -> i32 {
        let side = position.side_to_move();
        let mover_count = generate_validated_moves(position).len();
        if mover_count == 0 {
            return if position.is_in_check() {
                -side.sign() * MATE_SCORE
            } else {
                0
            };
        }

        let phase = game_phase(position);
        MaterialScorer::material_balance(position)
            + Self::positional_term(position, phase)
            + self.mobility_term(position, mover_count)
            + self.king_safety_term(position, phase)
    }
}

/// Evaluate with the default [`StandardScorer`].
pub fn evaluate(position: &Position) -> i32 {
    StandardScorer::default().score(position)
}

/// Endgame when no queens remain or little non-pawn material is left.
pub fn game_phase(position: &Position) -> GamePhase {
    let mut queens = 0;
    let mut non_pawn_material = 0;
    for square in position.occupied() {
        let Some(piece) = position.piece_at(square) else {
            continue;
        };
        match piece.kind {
            PieceKind::Pawn | PieceKind::King => {}
            PieceKind::Queen => {
                queens += 1;
                non_pawn_material += piece.kind.value();
            }
            kind => non_pawn_material += kind.value(),
        }
    }
    if queens == 0 || non_pawn_material <= ENDGAME_MATERIAL_THRESHOLD {
        GamePhase::Endgame
    } else {
        GamePhase::Middlegame
    }
}

/// Own pawns on the three files around the king, one or two ranks ahead.
fn pawn_shield_count(position: &Position, color: Color) -> i32 {
    let Some(king) = position.king_square(color) else {
        return 0;
    };
    let forward = color.forward();
    let pawns = position.pieces(color, PieceKind::Pawn);
    let mut count = 0;
    for file_delta in -1..=1 {
        for ranks_ahead in 1..=2 {
            if king
                .offset(file_delta, forward * ranks_ahead)
                .is_some_and(|sq| pawns.contains(sq))
            {
                count += 1;
            }
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::{evaluate, game_phase, BoardScorer, MaterialScorer, StandardScorer, MATE_SCORE};
    use crate::game_state::position::Position;
    use crate::tables::piece_square_tables::GamePhase;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn initial_position_is_exactly_balanced() {
        assert_eq!(evaluate(&Position::initial()), 0);
        assert_eq!(MaterialScorer.score(&Position::initial()), 0);
    }

    #[test]
    fn mirrored_positions_negate() {
        let white_up = parse_fen("4k3/pppp4/8/8/8/8/PPPPP3/4K3 w - - 0 1").expect("FEN should parse");
        let black_up = parse_fen("4k3/ppppp3/8/8/8/8/PPPP4/4K3 b - - 0 1").expect("FEN should parse");
        assert_eq!(evaluate(&white_up), -evaluate(&black_up));
        assert!(evaluate(&white_up) > 0);
    }

    #[test]
    fn score_is_absolute_not_side_relative() {
        let white_to_move =
            parse_fen("4k3/8/8/8/8/8/8/Q3K3 w - - 0 1").expect("FEN should parse");
        let black_to_move =
            parse_fen("4k3/8/8/8/8/8/8/Q3K3 b - - 0 1").expect("FEN should parse");
        assert!(MaterialScorer.score(&white_to_move) > 0);
        assert_eq!(
            MaterialScorer.score(&white_to_move),
            MaterialScorer.score(&black_to_move)
        );
        assert!(evaluate(&black_to_move) > 0);
    }

    #[test]
    fn central_knight_scores_above_rim_knight() {
        let centre = parse_fen("4k3/8/8/8/4N3/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let rim = parse_fen("4k3/8/8/8/8/8/8/N3K3 w - - 0 1").expect("FEN should parse");
        assert!(evaluate(&centre) > evaluate(&rim));
    }

    #[test]
    fn checkmate_and_stalemate_are_terminal_scores() {
        let black_mated = parse_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").expect("FEN should parse");
        assert_eq!(evaluate(&black_mated), MATE_SCORE);

        let white_mated = parse_fen("6k1/8/8/8/8/8/5PPP/r5K1 w - - 0 1").expect("FEN should parse");
        assert_eq!(evaluate(&white_mated), -MATE_SCORE);

        let stalemate = parse_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        assert_eq!(evaluate(&stalemate), 0);
    }

    #[test]
    fn being_in_check_costs_the_checked_side() {
        let quiet = parse_fen("4k3/8/8/8/8/8/3R4/4K3 b - - 0 1").expect("FEN should parse");
        let checked = parse_fen("4k3/8/8/8/8/8/4R3/4K3 b - - 0 1").expect("FEN should parse");
        let scorer = StandardScorer {
            mobility_weight: 0,
            ..StandardScorer::default()
        };
        assert_eq!(
            scorer.score(&checked) - scorer.score(&quiet),
            scorer.check_penalty
        );
    }

    #[test]
    fn phase_detection() {
        assert_eq!(game_phase(&Position::initial()), GamePhase::Middlegame);
        let no_queens = parse_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w - - 0 1")
            .expect("FEN should parse");
        assert_eq!(game_phase(&no_queens), GamePhase::Endgame);
        let lone_queen = parse_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").expect("FEN should parse");
        assert_eq!(game_phase(&lone_queen), GamePhase::Endgame);
        let queens_on = parse_fen("3qk3/8/8/8/8/8/8/3QK3 w - - 0 1").expect("FEN should parse");
        assert_eq!(game_phase(&queens_on), GamePhase::Middlegame);
    }
}
