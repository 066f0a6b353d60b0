//! Alpha-Beta search over pruned candidate moves
//!
//! This module implements the core search algorithm for the Gomoku AI:
//! depth-bounded minimax in negamax form with alpha-beta pruning.
//!
//! # Features
//!
//! - Candidate moves restricted to the neighborhood of existing stones
//! - Move ordering: win-in-one, forced block, then heuristic score
//! - Top-K truncation at interior nodes (breadth-limited by design)
//! - Win scores adjusted by ply so faster wins rank higher
//! - Every tentative stone is placed through a scope guard and undone on
//!   every exit path
//! - Optional root-parallel search, one private board per worker
//! - Wall-clock budget checked before each root subtree
//!
//! # Example
//!
//! ```
//! use gomoku15::board::{Board, Stone, Pos};
//! use gomoku15::config::EngineConfig;
//! use gomoku15::search::Searcher;
//!
//! let searcher = Searcher::new(&EngineConfig::default());
//! let mut board = Board::from_moves(&[(7, 7)]).unwrap();
//!
//! let result = searcher.search(&mut board, Stone::White, 2);
//! if let Some(best_move) = result.best_move {
//!     println!("Best move: ({}, {})", best_move.row, best_move.col);
//! }
//! ```

use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, trace, warn};

use crate::board::{Board, Pos, Stone};
use crate::config::EngineConfig;
use crate::eval::{evaluate, ScoreTable};
use crate::rules::has_five_at_pos;

use super::candidates::generate_candidates;
use super::ordering::{order_moves, retain_forced, MoveClass, ScoredMove};
use super::policy::RootMove;

/// Score of a completed five, before the ply adjustment
pub const WIN_SCORE: i32 = 1_000_000_000;

/// Scores beyond this magnitude are forced wins or losses
pub const WIN_THRESHOLD: i32 = WIN_SCORE - 1_000;

/// Infinity score for alpha-beta bounds
const INF: i32 = WIN_SCORE + 1;

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Total beta cutoffs (fail-high)
    pub beta_cutoffs: u64,
    /// Beta cutoffs on the first move tried (measures move ordering quality)
    pub first_move_cutoffs: u64,
}

impl SearchStats {
    /// First-move cutoff rate in percent
    pub fn first_move_rate(&self) -> f64 {
        if self.beta_cutoffs == 0 {
            0.0
        } else {
            self.first_move_cutoffs as f64 / self.beta_cutoffs as f64 * 100.0
        }
    }

    fn merge(&mut self, other: &SearchStats) {
        self.beta_cutoffs += other.beta_cutoffs;
        self.first_move_cutoffs += other.first_move_cutoffs;
    }
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Best move found; `None` only when the position is already decided
    pub best_move: Option<Pos>,
    /// Score of the best move from the mover's perspective
    pub score: i32,
    /// Ply budget used
    pub depth: u8,
    /// Total nodes searched
    pub nodes: u64,
    /// Fully searched root moves, best first
    pub ranked: Vec<RootMove>,
    /// Root was decided by a one-move shortcut (immediate win)
    pub immediate_win: bool,
    /// Root was narrowed to blocking the opponent's five
    pub forced_block: bool,
    /// The deadline cut the root loop short
    pub timed_out: bool,
    /// Search diagnostics
    pub stats: SearchStats,
}

impl SearchResult {
    fn empty(depth: u8) -> Self {
        Self {
            best_move: None,
            score: 0,
            depth,
            nodes: 0,
            ranked: Vec::new(),
            immediate_win: false,
            forced_block: false,
            timed_out: false,
            stats: SearchStats::default(),
        }
    }

    fn single(pos: Pos, score: i32, depth: u8) -> Self {
        Self {
            best_move: Some(pos),
            score,
            ranked: vec![RootMove { pos, score }],
            ..Self::empty(depth)
        }
    }
}

// =============================================================================
// Per-subtree search state
// =============================================================================

/// Mutable state for one depth-first walk. Root-parallel workers each own one.
struct SearchContext<'a> {
    table: &'a ScoreTable,
    radius: u8,
    branch_width: usize,
    nodes: u64,
    stats: SearchStats,
}

impl<'a> SearchContext<'a> {
    fn new(table: &'a ScoreTable, radius: u8, branch_width: usize) -> Self {
        Self {
            table,
            radius,
            branch_width,
            nodes: 0,
            stats: SearchStats::default(),
        }
    }

    /// Ordered, pruned candidates for `color` at an interior or root node.
    fn ordered_moves(&self, board: &Board, color: Stone, width: usize) -> Vec<ScoredMove> {
        let candidates = generate_candidates(board, self.radius);
        let mut moves = order_moves(board, &candidates, color, self.table);
        retain_forced(&mut moves);
        moves.truncate(width);
        moves
    }

    /// Negamax alpha-beta. `last_move` is the stone the opponent just
    /// played; `ply` counts half-moves from the root.
    ///
    /// Returns the score from `color`'s perspective. The board is restored
    /// before returning.
    #[allow(clippy::too_many_arguments)]
    fn alpha_beta(
        &mut self,
        board: &mut Board,
        color: Stone,
        depth: u8,
        ply: u8,
        mut alpha: i32,
        beta: i32,
        last_move: Pos,
    ) -> i32 {
        self.nodes += 1;

        // Terminal: the previous move completed a line
        if has_five_at_pos(board, last_move, color.opponent()) {
            return -(WIN_SCORE - i32::from(ply));
        }
        if board.is_full() {
            return 0;
        }
        if depth == 0 {
            return evaluate(board, color, self.table);
        }

        let moves = self.ordered_moves(board, color, self.branch_width);
        let Some(first) = moves.first() else {
            return 0;
        };
        // Win-in-one needs no placement: the child would see the five at once
        if first.class == MoveClass::Win {
            return WIN_SCORE - i32::from(ply) - 1;
        }

        let mut best_score = -INF;
        for (i, mv) in moves.iter().enumerate() {
            let Some(mut child) = board.apply(mv.pos, color) else {
                continue;
            };
            let score = -self.alpha_beta(
                &mut child,
                color.opponent(),
                depth - 1,
                ply + 1,
                -beta,
                -alpha,
                mv.pos,
            );
            drop(child);

            best_score = best_score.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                self.stats.beta_cutoffs += 1;
                if i == 0 {
                    self.stats.first_move_cutoffs += 1;
                }
                break;
            }
        }

        if best_score == -INF {
            0
        } else {
            best_score
        }
    }

    /// Full-window search of one root move. Each root subtree is
    /// independent, so the score is exact and order-insensitive.
    fn search_root_move(&mut self, board: &mut Board, color: Stone, pos: Pos, depth: u8) -> Option<i32> {
        let mut child = board.apply(pos, color)?;
        let score = -self.alpha_beta(
            &mut child,
            color.opponent(),
            depth.saturating_sub(1),
            1,
            -INF,
            INF,
            pos,
        );
        Some(score)
    }
}

// =============================================================================
// Searcher: public entry point
// =============================================================================

/// Alpha-beta searcher configured from an [`EngineConfig`].
pub struct Searcher {
    table: ScoreTable,
    radius: u8,
    root_width: usize,
    branch_width: usize,
    time_limit: Option<std::time::Duration>,
    pool: Option<rayon::ThreadPool>,
}

impl Searcher {
    /// Create a searcher. With `threads > 1` root moves are searched on a
    /// dedicated rayon pool; if the pool cannot be built the search runs
    /// sequentially.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        let pool = if config.threads > 1 {
            match rayon::ThreadPoolBuilder::new()
                .num_threads(config.threads)
                .thread_name(|i| format!("gomoku15-search-{i}"))
                .build()
            {
                Ok(pool) => Some(pool),
                Err(err) => {
                    warn!(%err, threads = config.threads, "falling back to sequential search");
                    None
                }
            }
        } else {
            None
        };

        Self {
            table: config.scores,
            radius: config.radius,
            root_width: config.root_width,
            branch_width: config.branch_width,
            time_limit: config.time_limit(),
            pool,
        }
    }

    /// Number of root workers
    pub fn threads(&self) -> usize {
        self.pool.as_ref().map_or(1, rayon::ThreadPool::current_num_threads)
    }

    /// Search for `color`'s best move with a ply budget of `depth`.
    ///
    /// The board is borrowed mutably for tentative placements and is
    /// returned in exactly its original state.
    pub fn search(&self, board: &mut Board, color: Stone, depth: u8) -> SearchResult {
        let start = Instant::now();
        let deadline = self.time_limit.map(|limit| start + limit);

        if board.is_board_empty() {
            return SearchResult::single(Pos::CENTER, 0, depth);
        }
        if board.status().is_terminal() || color == Stone::Empty {
            return SearchResult::empty(depth);
        }

        let candidates = generate_candidates(board, self.radius);
        let mut moves = order_moves(board, &candidates, color, &self.table);

        // Immediate wins are never left to the search
        if let Some(win) = moves.first().filter(|m| m.class == MoveClass::Win) {
            debug!(pos = %win.pos, "immediate win");
            let mut result = SearchResult::single(win.pos, WIN_SCORE, depth);
            result.immediate_win = true;
            result.nodes = 1;
            return result;
        }

        let forced_block = retain_forced(&mut moves);
        if forced_block {
            debug!(blocks = moves.len(), "opponent threatens five, root narrowed to blocks");
        }
        moves.truncate(self.root_width);

        let (completed, nodes, stats) = match &self.pool {
            Some(pool) => self.search_root_parallel(pool, board, color, depth, &moves, deadline),
            None => self.search_root_sequential(board, color, depth, &moves, deadline),
        };

        let timed_out = completed.len() < moves.len();
        if timed_out {
            warn!(
                completed = completed.len(),
                total = moves.len(),
                "time limit reached, using completed root moves"
            );
        }

        let mut ranked = completed;
        // Stable: equal scores keep ordering rank
        ranked.sort_by_key(|m| std::cmp::Reverse(m.score));

        let (best_move, score) = ranked
            .first()
            .map_or((None, 0), |m| (Some(m.pos), m.score));

        debug!(
            best = ?best_move,
            score,
            depth,
            nodes,
            elapsed_ms = start.elapsed().as_millis() as u64,
            first_move_rate = stats.first_move_rate(),
            "search finished"
        );

        SearchResult {
            best_move,
            score,
            depth,
            nodes,
            ranked,
            immediate_win: false,
            forced_block,
            timed_out,
            stats,
        }
    }

    fn search_root_sequential(
        &self,
        board: &mut Board,
        color: Stone,
        depth: u8,
        moves: &[ScoredMove],
        deadline: Option<Instant>,
    ) -> (Vec<RootMove>, u64, SearchStats) {
        let mut ctx = SearchContext::new(&self.table, self.radius, self.branch_width);
        let mut completed = Vec::with_capacity(moves.len());
        for (i, mv) in moves.iter().enumerate() {
            // At least one root move always completes
            if i > 0 && deadline.is_some_and(|d| Instant::now() >= d) {
                break;
            }
            if let Some(score) = ctx.search_root_move(board, color, mv.pos, depth) {
                trace!(pos = %mv.pos, score, "root move searched");
                completed.push(RootMove { pos: mv.pos, score });
            }
        }
        (completed, ctx.nodes, ctx.stats)
    }

    fn search_root_parallel(
        &self,
        pool: &rayon::ThreadPool,
        board: &Board,
        color: Stone,
        depth: u8,
        moves: &[ScoredMove],
        deadline: Option<Instant>,
    ) -> (Vec<RootMove>, u64, SearchStats) {
        let outcomes: Vec<Option<(RootMove, u64, SearchStats)>> = pool.install(|| {
            moves
                .par_iter()
                .enumerate()
                .map(|(i, mv)| {
                    if i > 0 && deadline.is_some_and(|d| Instant::now() >= d) {
                        return None;
                    }
                    // Private copy per worker; the shared board is never mutated
                    let mut local = board.clone();
                    let mut ctx = SearchContext::new(&self.table, self.radius, self.branch_width);
                    let score = ctx.search_root_move(&mut local, color, mv.pos, depth)?;
                    trace!(pos = %mv.pos, score, "root move searched");
                    Some((RootMove { pos: mv.pos, score }, ctx.nodes, ctx.stats))
                })
                .collect()
        });

        // collect() keeps input order, so ties rank exactly as sequentially
        let mut completed = Vec::with_capacity(outcomes.len());
        let mut nodes = 0;
        let mut stats = SearchStats::default();
        for (root, n, s) in outcomes.into_iter().flatten() {
            completed.push(root);
            nodes += n;
            stats.merge(&s);
        }
        (completed, nodes, stats)
    }
}

impl std::fmt::Debug for Searcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Searcher")
            .field("radius", &self.radius)
            .field("root_width", &self.root_width)
            .field("branch_width", &self.branch_width)
            .field("time_limit", &self.time_limit)
            .field("threads", &self.threads())
            .finish()
    }
}
