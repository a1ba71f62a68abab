//! Perft: exhaustive legal-move tree counts used to check the generator and
//! the transition engine against published reference numbers.

use rayon::prelude::*;

use crate::chess_errors::ChessResult;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::move_generator::MoveGenerator;
use crate::moves::move_intent::ValidatedMove;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(mut self, rhs: PerftCounts) -> PerftCounts {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
        self
    }

    fn leaf<G: MoveGenerator + ?Sized>(generator: &G, mv: &ValidatedMove, next: &Position) -> Self {
        let gives_check = next.is_in_check();
        PerftCounts {
            nodes: 1,
            captures: u64::from(mv.is_capture()),
            en_passant: u64::from(mv.is_en_passant()),
            castles: u64::from(mv.is_castling()),
            promotions: u64::from(mv.intent().promotion.is_some()),
            checks: u64::from(gives_check),
            checkmates: u64::from(gives_check && generator.generate_legal_moves(next).is_empty()),
        }
    }
}

/// Leaf node count only.
pub fn perft<G: MoveGenerator + ?Sized>(generator: &G, position: &Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = generator.generate_legal_moves(position);
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .iter()
        .map(|mv| perft(generator, &apply_move(position, mv).0, depth - 1))
        .sum()
}

/// Leaf counts broken down by move kind.
pub fn perft_detailed<G: MoveGenerator + ?Sized>(
    generator: &G,
    position: &Position,
    depth: u8,
) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }
    generator
        .generate_legal_moves(position)
        .iter()
        .map(|mv| {
            let (next, _) = apply_move(position, mv);
            if depth == 1 {
                PerftCounts::leaf(generator, mv, &next)
            } else {
                perft_detailed(generator, &next, depth - 1)
            }
        })
        .fold(PerftCounts::default(), PerftCounts::merge)
}

/// Root moves split across the rayon pool; each subtree is walked serially.
pub fn perft_parallel<G: MoveGenerator>(
    generator: &G,
    position: &Position,
    depth: u8,
) -> ChessResult<u64> {
    if depth <= 1 {
        return Ok(perft(generator, position, depth));
    }
    let root_moves = generator.generate_legal_moves(position);
    let counts = root_moves
        .par_iter()
        .map(|mv| {
            let (next, _) = apply_move(position, mv);
            next.verify_invariants()?;
            Ok(perft(generator, &next, depth - 1))
        })
        .collect::<ChessResult<Vec<u64>>>()?;
    Ok(counts.into_iter().sum())
}

/// Per-root-move leaf counts, as printed by `go perft` style tools.
pub fn perft_divide<G: MoveGenerator + ?Sized>(
    generator: &G,
    position: &Position,
    depth: u8,
) -> Vec<(String, u64)> {
    generator
        .generate_legal_moves(position)
        .iter()
        .map(|mv| {
            let nodes = if depth <= 1 {
                1
            } else {
                perft(generator, &apply_move(position, mv).0, depth - 1)
            };
            (mv.to_string(), nodes)
        })
        .collect()
}
