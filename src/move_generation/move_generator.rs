use crate::game_state::position::Position;
use crate::move_generation::legal_move_generator::generate_validated_moves;
use crate::moves::move_intent::ValidatedMove;

/// Source of legal moves for tree walkers such as perft.
pub trait MoveGenerator: Send + Sync {
    fn generate_legal_moves(&self, position: &Position) -> Vec<ValidatedMove>;
}

/// The rules-complete generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, position: &Position) -> Vec<ValidatedMove> {
        generate_validated_moves(position)
    }
}
