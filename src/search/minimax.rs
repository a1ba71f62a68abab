//! Fixed-depth minimax search with optional alpha-beta pruning, a capture-only
//! quiescence extension and a shared transposition table.
//!
//! Scores are always from White's point of view: White maximizes, Black
//! minimizes. Root moves are searched in parallel on the engine's rayon pool,
//! each with a full window, and gathered in generator order so that the first
//! move reaching the best score wins.

use std::sync::Arc;

use rayon::prelude::*;
use rayon::ThreadPool;
use tracing::{debug, info};

use crate::chess_errors::ChessResult;
use crate::game_state::chess_types::Color;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::generate_validated_moves;
use crate::moves::move_intent::{MoveCategory, MoveIntent, ValidatedMove};
use crate::search::board_scoring::{BoardScorer, StandardScorer, MATE_SCORE};
use crate::search::threading::{SearchCounters, ThreadingConfig};
use crate::search::transposition_table::{Bound, SharedTranspositionTable, TTEntry, TTStats};

/// Strictly outside every reachable score.
const INFINITY: i32 = MATE_SCORE + 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_depth: u8,
    /// Disable to get plain minimax (useful to cross-check pruning).
    pub alpha_beta: bool,
    /// Maximum number of capture plies explored past the horizon.
    pub quiescence_depth: u8,
    pub use_transposition_table: bool,
    pub tt_max_entries: usize,
    pub threading: ThreadingConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            alpha_beta: true,
            quiescence_depth: 4,
            use_transposition_table: true,
            tt_max_entries: 1 << 20,
            threading: ThreadingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` at depth 0 or when the root has no legal move.
    pub best_move: Option<MoveIntent>,
    pub score: i32,
    pub depth: u8,
    pub nodes: u64,
    /// Score of every root move, in generator order.
    pub root_scores: Vec<(MoveIntent, i32)>,
    pub tt_stats: TTStats,
}

/// Owns the worker pool, the shared cache and the node counter. The cache
/// persists across searches until [`SearchEngine::clear_transposition_table`].
pub struct SearchEngine<S: BoardScorer = StandardScorer> {
    config: SearchConfig,
    scorer: S,
    pool: ThreadPool,
    tt: Option<Arc<SharedTranspositionTable>>,
    counters: SearchCounters,
}

impl SearchEngine<StandardScorer> {
    pub fn new(config: SearchConfig) -> ChessResult<Self> {
        Self::with_scorer(config, StandardScorer::default())
    }
}

impl<S: BoardScorer> SearchEngine<S> {
    pub fn with_scorer(config: SearchConfig, scorer: S) -> ChessResult<Self> {
        let pool = config.threading.build_pool()?;
        let tt = config
            .use_transposition_table
            .then(|| SharedTranspositionTable::new(config.tt_max_entries));
        Ok(Self {
            config,
            scorer,
            pool,
            tt,
            counters: SearchCounters::default(),
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn transposition_table(&self) -> Option<&Arc<SharedTranspositionTable>> {
        self.tt.as_ref()
    }

    pub fn clear_transposition_table(&self) {
        if let Some(tt) = &self.tt {
            tt.clear();
        }
    }

    pub fn find_best_move(&self, position: &Position) -> ChessResult<SearchResult> {
        self.search_to_depth(position, self.config.max_depth)
    }

    /// Like [`SearchEngine::find_best_move`] with the depth given per call.
    pub fn search_to_depth(&self, position: &Position, depth: u8) -> ChessResult<SearchResult> {
        self.counters.reset();

        let moves = if depth == 0 {
            Vec::new()
        } else {
            generate_validated_moves(position)
        };
        if moves.is_empty() {
            self.counters.add_node();
            let score = self.scorer.score(position);
            return Ok(self.finish(position, None, score, 0, Vec::new()));
        }

        let scores = self.pool.install(|| {
            moves
                .par_iter()
                .map(|mv| {
                    let (child, _) = apply_move(position, mv);
                    child.verify_invariants()?;
                    self.minimax(&child, depth - 1, -INFINITY, INFINITY)
                })
                .collect::<ChessResult<Vec<i32>>>()
        })?;

        let maximizing = position.side_to_move() == Color::White;
        let mut best: Option<(MoveIntent, i32)> = None;
        let mut root_scores = Vec::with_capacity(moves.len());
        for (mv, score) in moves.iter().zip(scores) {
            debug!(mv = %mv, score, "root move searched");
            root_scores.push((mv.intent(), score));
            let improves = match best {
                None => true,
                Some((_, best_score)) if maximizing => score > best_score,
                Some((_, best_score)) => score < best_score,
            };
            if improves {
                best = Some((mv.intent(), score));
            }
        }

        let (best_move, score) = match best {
            Some((mv, score)) => (Some(mv), score),
            None => (None, self.scorer.score(position)),
        };
        self.counters.add_node();
        self.store(position.zobrist_key(), depth, score, Bound::Exact, best_move);
        Ok(self.finish(position, best_move, score, depth, root_scores))
    }

    fn finish(
        &self,
        position: &Position,
        best_move: Option<MoveIntent>,
        score: i32,
        depth: u8,
        root_scores: Vec<(MoveIntent, i32)>,
    ) -> SearchResult {
        let tt_stats = self.tt.as_ref().map(|tt| tt.stats()).unwrap_or_default();
        let nodes = self.counters.nodes();
        info!(
            key = %format!("{:016X}", position.zobrist_key()),
            best_move = ?best_move.map(|mv| mv.to_token()),
            score,
            depth,
            nodes,
            tt_hits = tt_stats.hits,
            tt_probes = tt_stats.probes,
            "search finished"
        );
        SearchResult {
            best_move,
            score,
            depth,
            nodes,
            root_scores,
            tt_stats,
        }
    }

    fn minimax(
        &self,
        position: &Position,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
    ) -> ChessResult<i32> {
        self.counters.add_node();
        let key = position.zobrist_key();
        if let Some(score) = self.probe(key, depth, alpha, beta) {
            return Ok(score);
        }
        let window = (alpha, beta);

        if depth == 0 {
            let score = self.quiescence(position, self.config.quiescence_depth, alpha, beta)?;
            self.store(key, 0, score, self.bound_for(score, window), None);
            return Ok(score);
        }

        let mut moves = generate_validated_moves(position);
        if moves.is_empty() {
            let score = self.scorer.score(position);
            self.store(key, depth, score, Bound::Exact, None);
            return Ok(score);
        }
        order_moves(&mut moves);

        let maximizing = position.side_to_move() == Color::White;
        let mut best = if maximizing { -INFINITY } else { INFINITY };
        let mut best_move = None;
        for mv in &moves {
            let (child, _) = apply_move(position, mv);
            let score = self.minimax(&child, depth - 1, alpha, beta)?;
            if maximizing {
                if score > best {
                    best = score;
                    best_move = Some(mv.intent());
                }
                alpha = alpha.max(best);
            } else {
                if score < best {
                    best = score;
                    best_move = Some(mv.intent());
                }
                beta = beta.min(best);
            }
            if self.config.alpha_beta && alpha >= beta {
                break;
            }
        }

        self.store(key, depth, best, self.bound_for(best, window), best_move);
        Ok(best)
    }

    /// Capture-only search past the horizon. The static score is the floor
    /// (White) or ceiling (Black) the side to move can always fall back on.
    fn quiescence(
        &self,
        position: &Position,
        budget: u8,
        mut alpha: i32,
        mut beta: i32,
    ) -> ChessResult<i32> {
        self.counters.add_node();
        let stand_pat = self.scorer.score(position);
        if budget == 0 {
            return Ok(stand_pat);
        }

        let mut captures: Vec<ValidatedMove> = generate_validated_moves(position)
            .into_iter()
            .filter(ValidatedMove::is_capture)
            .collect();
        if captures.is_empty() {
            return Ok(stand_pat);
        }
        order_moves(&mut captures);

        let maximizing = position.side_to_move() == Color::White;
        let mut best = stand_pat;
        if self.config.alpha_beta {
            if maximizing {
                if best >= beta {
                    return Ok(best);
                }
                alpha = alpha.max(best);
            } else {
                if best <= alpha {
                    return Ok(best);
                }
                beta = beta.min(best);
            }
        }

        for mv in &captures {
            let (child, _) = apply_move(position, mv);
            let score = self.quiescence(&child, budget - 1, alpha, beta)?;
            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if self.config.alpha_beta && alpha >= beta {
                break;
            }
        }
        Ok(best)
    }

    fn bound_for(&self, score: i32, (alpha, beta): (i32, i32)) -> Bound {
        if !self.config.alpha_beta {
            Bound::Exact
        } else if score <= alpha {
            Bound::Upper
        } else if score >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        }
    }

    fn probe(&self, key: u64, depth: u8, alpha: i32, beta: i32) -> Option<i32> {
        self.tt
            .as_ref()?
            .probe(key)
            .and_then(|entry| entry.usable_score(depth, alpha, beta))
    }

    fn store(&self, key: u64, depth: u8, score: i32, bound: Bound, best_move: Option<MoveIntent>) {
        if let Some(tt) = &self.tt {
            tt.store(TTEntry {
                key,
                depth,
                score,
                bound,
                best_move,
            });
        }
    }
}

/// One-shot search with a freshly built engine.
pub fn find_best_move(position: &Position, config: SearchConfig) -> ChessResult<SearchResult> {
    SearchEngine::new(config)?.find_best_move(position)
}

/// Captures first by most valuable victim then least valuable attacker,
/// promotions next, quiet moves last. Stable, so ties keep generator order.
fn order_moves(moves: &mut [ValidatedMove]) {
    moves.sort_by_key(|mv| std::cmp::Reverse(ordering_key(mv)));
}

fn ordering_key(mv: &ValidatedMove) -> i32 {
    let promotion = match mv.category() {
        MoveCategory::Promotion(kind) => kind.value(),
        _ => 0,
    };
    match mv.captured() {
        Some(victim) => {
            100_000 + victim.kind.value() * 10 - mv.piece().kind.index() as i32 + promotion
        }
        None => promotion,
    }
}

#[cfg(test)]
mod tests {
    use super::{find_best_move, ordering_key, SearchConfig, SearchEngine};
    use crate::game_state::position::Position;
    use crate::move_generation::legal_move_apply::apply_move;
    use crate::game_state::chess_types::Color;
    use crate::move_generation::legal_move_generator::{
        game_status, generate_validated_moves, GameStatus,
    };
    use crate::move_generation::move_validator::validate_move;
    use crate::search::board_scoring::{evaluate, MaterialScorer, MATE_SCORE};
    use crate::search::threading::ThreadingConfig;
    use crate::utils::fen_parser::parse_fen;

    fn config(depth: u8) -> SearchConfig {
        SearchConfig {
            max_depth: depth,
            threading: ThreadingConfig::with_threads(2),
            ..SearchConfig::default()
        }
    }

    fn position(fen: &str) -> Position {
        parse_fen(fen).expect("test FEN should parse")
    }

    #[test]
    fn depth_zero_returns_static_score_without_move() {
        let start = Position::initial();
        let result = find_best_move(&start, config(0)).expect("search should run");
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, evaluate(&start));
        assert_eq!(result.depth, 0);
        assert!(result.root_scores.is_empty());
    }

    #[test]
    fn depth_one_score_matches_evaluation_of_chosen_child() {
        let start = Position::initial();
        let result = find_best_move(&start, config(1)).expect("search should run");
        let best = result.best_move.expect("start position has moves");
        let mv = validate_move(&start, best).expect("best move is legal");
        let (child, _) = apply_move(&start, &mv);
        assert_eq!(result.score, evaluate(&child));
        assert_eq!(result.root_scores.len(), 20);
        let max = result.root_scores.iter().map(|&(_, s)| s).max();
        assert_eq!(max, Some(result.score));
    }

    #[test]
    fn ties_resolve_to_first_move_in_generator_order() {
        let start = Position::initial();
        let result = find_best_move(&start, config(1)).expect("search should run");
        let first_best = result
            .root_scores
            .iter()
            .find(|&&(_, s)| s == result.score)
            .map(|&(mv, _)| mv);
        assert_eq!(result.best_move, first_best);
    }

    #[test]
    fn finds_mate_in_one() {
        let pos = position("6k1/5Q2/6K1/8/8/8/8/8 w - - 0 1");
        for depth in [1, 2] {
            let result = find_best_move(&pos, config(depth)).expect("search should run");
            let best = result.best_move.expect("white has moves");
            let mv = validate_move(&pos, best).expect("best move is legal");
            let (child, _) = apply_move(&pos, &mv);
            assert_eq!(
                game_status(&child),
                GameStatus::Checkmate {
                    winner: Color::White
                }
            );
            assert_eq!(result.score, MATE_SCORE);
        }
    }

    #[test]
    fn black_minimizes() {
        let pos = position("4k3/8/8/8/8/8/8/q2QK3 b - - 0 1");
        let result = find_best_move(&pos, config(1)).expect("search should run");
        let min = result.root_scores.iter().map(|&(_, s)| s).min();
        assert_eq!(min, Some(result.score));
    }

    #[test]
    fn takes_a_hanging_queen() {
        let pos = position("4k3/8/8/8/8/8/4q3/4KQ2 w - - 0 1");
        let engine = SearchEngine::with_scorer(config(1), MaterialScorer).expect("engine builds");
        let result = engine.find_best_move(&pos).expect("search should run");
        assert_eq!(result.best_move.map(|mv| mv.to_token()), Some("f1e2".to_owned()));
    }

    #[test]
    fn pruning_does_not_change_the_score() {
        let pos = position("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3");
        let shallow = SearchConfig {
            quiescence_depth: 2,
            ..config(2)
        };
        let pruned = find_best_move(&pos, shallow).expect("search should run");
        let full = find_best_move(
            &pos,
            SearchConfig {
                alpha_beta: false,
                ..shallow
            },
        )
        .expect("search should run");
        assert_eq!(pruned.score, full.score);
        assert_eq!(pruned.best_move, full.best_move);
        assert!(pruned.nodes <= full.nodes);
    }

    #[test]
    fn cache_does_not_change_the_score() {
        let pos = position("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3");
        let with_cache = SearchConfig {
            quiescence_depth: 2,
            ..config(3)
        };
        let cached = find_best_move(&pos, with_cache).expect("search should run");
        let uncached = find_best_move(
            &pos,
            SearchConfig {
                use_transposition_table: false,
                ..with_cache
            },
        )
        .expect("search should run");
        assert_eq!(cached.score, uncached.score);
        assert_eq!(cached.best_move, uncached.best_move);
        assert!(cached.tt_stats.stores > 0);
        assert_eq!(uncached.tt_stats.probes, 0);
    }

    #[test]
    fn no_legal_moves_yields_no_best_move() {
        let mated = position("6k1/6Q1/6K1/8/8/8/8/8 b - - 0 1");
        let result = find_best_move(&mated, config(3)).expect("search should run");
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, MATE_SCORE);

        let stalemate = position("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        let result = find_best_move(&stalemate, config(3)).expect("search should run");
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn quiescence_sees_a_recapture() {
        // Qxd5 wins a pawn but loses the queen to exd5.
        let pos = position("4k3/8/4p3/3p4/8/8/8/3QK3 w - - 0 1");
        let result = find_best_move(
            &pos,
            SearchConfig {
                quiescence_depth: 4,
                ..config(1)
            },
        )
        .expect("search should run");
        assert_ne!(result.best_move.map(|mv| mv.to_token()), Some("d1d5".to_owned()));
    }

    #[test]
    fn captures_are_ordered_before_quiet_moves() {
        let pos = position("4k3/8/8/8/8/8/4q3/4KQ2 w - - 0 1");
        let moves = generate_validated_moves(&pos);
        let best = moves
            .iter()
            .max_by_key(|mv| ordering_key(mv))
            .expect("white has moves");
        assert!(best.is_capture());
    }

    #[test]
    fn engine_reuse_keeps_the_cache_until_cleared() {
        let engine = SearchEngine::new(config(2)).expect("engine builds");
        let start = Position::initial();
        engine.find_best_move(&start).expect("search should run");
        let tt = engine.transposition_table().expect("cache enabled");
        assert!(!tt.is_empty());
        engine.clear_transposition_table();
        assert!(tt.is_empty());
    }
}
