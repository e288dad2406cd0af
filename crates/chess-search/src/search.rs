//! Depth-bounded minimax with alpha-beta pruning.
//!
//! Every root move is scored with a full window, so root moves are
//! independent of each other and may be scored on worker threads. The
//! reduction keeps the highest score at the lowest root index, which is the
//! move a serial scan would have kept.

use crate::evaluation::evaluate;
use chess_core::{Color, Move};
use chess_engine::rules::RuleSet;
use chess_engine::{GameState, GameStatus, StandardChess};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// Bound used in place of infinity for the alpha-beta window.
pub const INFINITY: i32 = i32::MAX;

/// Cooperative cancellation for a running search.
#[derive(Debug, Clone, Default)]
pub struct SearchLimits {
    /// Abort once this instant has passed.
    pub deadline: Option<Instant>,
    /// Abort once this flag is raised by another thread.
    pub stop: Option<Arc<AtomicBool>>,
}

impl SearchLimits {
    /// No deadline and no stop flag.
    pub fn none() -> Self {
        Self::default()
    }

    /// Aborts `budget` from now.
    pub fn with_time(budget: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + budget),
            stop: None,
        }
    }

    pub fn with_stop(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = Some(stop);
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    fn exceeded(&self) -> bool {
        if self.stop.as_ref().is_some_and(|s| s.load(Ordering::Relaxed)) {
            return true;
        }
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

/// Result of a root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// The selected move.
    pub mv: Move,
    /// Its score from the searching side's point of view.
    pub score: i32,
    /// Nominal depth in plies.
    pub depth: u8,
    /// Nodes visited across all root subtrees.
    pub nodes: u64,
    /// True if the limits cut the search short.
    pub aborted: bool,
}

/// Search state
#[derive(Debug)]
pub struct Searcher<R = StandardChess> {
    rules: R,
    limits: SearchLimits,
    parallel: bool,
    nodes: u64,
    start_time: Instant,
    stopped: bool,
}

impl Searcher<StandardChess> {
    /// Serial searcher over the standard rules.
    pub fn new(limits: SearchLimits) -> Self {
        Self::with_rules(StandardChess, limits)
    }
}

impl<R> Searcher<R>
where
    R: RuleSet + Clone + Send + Sync,
{
    pub fn with_rules(rules: R, limits: SearchLimits) -> Self {
        Searcher {
            rules,
            limits,
            parallel: false,
            nodes: 0,
            start_time: Instant::now(),
            stopped: false,
        }
    }

    /// Scores root moves on the rayon pool when `parallel` is set.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Nodes visited so far.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// True once the limits have stopped this searcher.
    pub fn stopped(&self) -> bool {
        self.stopped
    }

    fn check_limits(&mut self) {
        if !self.stopped && self.limits.exceeded() {
            self.stopped = true;
        }
    }

    /// Minimax value of `state` for `perspective`.
    ///
    /// Recursion ends at depth zero or as soon as the status leaves
    /// [`GameStatus::Active`]. Returns 0 once stopped; callers must discard
    /// the value in that case.
    pub fn minimax(
        &mut self,
        state: &GameState,
        depth: u8,
        maximizing: bool,
        perspective: Color,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;
        self.check_limits();
        if self.stopped {
            return 0;
        }

        if depth == 0 || state.status() != GameStatus::Active {
            return evaluate(state, perspective);
        }

        let moves = self.rules.all_legal_moves(state, state.current_player());

        if maximizing {
            let mut best = -INFINITY;
            for mv in moves {
                let next = self.rules.apply_move(state, mv);
                let score = self.minimax(&next, depth - 1, false, perspective, alpha, beta);
                if self.stopped {
                    return 0;
                }
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = INFINITY;
            for mv in moves {
                let next = self.rules.apply_move(state, mv);
                let score = self.minimax(&next, depth - 1, true, perspective, alpha, beta);
                if self.stopped {
                    return 0;
                }
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }

    /// Scores one root move, or `None` if the search was stopped inside it.
    fn score_root_move(
        &mut self,
        state: &GameState,
        mv: Move,
        color: Color,
        depth: u8,
    ) -> Option<i32> {
        let next = self.rules.apply_move(state, mv);
        let child_depth = depth.saturating_sub(1);
        let score = self.minimax(&next, child_depth, false, color, -INFINITY, INFINITY);
        if self.stopped {
            None
        } else {
            trace!(mv = %mv, score, "root move scored");
            Some(score)
        }
    }

    fn score_serial(
        &mut self,
        state: &GameState,
        moves: &[Move],
        color: Color,
        depth: u8,
    ) -> Vec<Option<i32>> {
        let mut scores = Vec::with_capacity(moves.len());
        for mv in moves {
            if self.stopped {
                scores.push(None);
                continue;
            }
            scores.push(self.score_root_move(state, *mv, color, depth));
        }
        scores
    }

    fn score_parallel(
        &mut self,
        state: &GameState,
        moves: &[Move],
        color: Color,
        depth: u8,
    ) -> Vec<Option<i32>> {
        let rules = &self.rules;
        let limits = &self.limits;
        let start_time = self.start_time;

        let results: Vec<(Option<i32>, u64)> = moves
            .par_iter()
            .map(|mv| {
                let mut worker = Searcher {
                    rules: rules.clone(),
                    limits: limits.clone(),
                    parallel: false,
                    nodes: 0,
                    start_time,
                    stopped: false,
                };
                let score = worker.score_root_move(state, *mv, color, depth);
                (score, worker.nodes)
            })
            .collect();

        self.nodes += results.iter().map(|(_, n)| n).sum::<u64>();
        if results.iter().any(|(score, _)| score.is_none()) {
            self.stopped = true;
        }
        results.into_iter().map(|(score, _)| score).collect()
    }

    /// Picks the best move for `color` searching `depth` plies.
    ///
    /// Returns `None` only when `color` has no legal move. If the limits stop
    /// the search, moves whose subtree was not fully scored are ignored; when
    /// none completed, the first legal move is returned.
    pub fn best_move(
        &mut self,
        state: &GameState,
        color: Color,
        depth: u8,
    ) -> Option<SearchOutcome> {
        let moves = self.rules.all_legal_moves(state, color);
        let first = *moves.first()?;

        let scores = if self.parallel {
            self.score_parallel(state, &moves, color, depth)
        } else {
            self.score_serial(state, &moves, color, depth)
        };

        // Strictly greater keeps the first of equal scores.
        let mut best: Option<(Move, i32)> = None;
        for (mv, score) in moves.iter().zip(&scores) {
            if let Some(score) = *score {
                if best.map_or(true, |(_, s)| score > s) {
                    best = Some((*mv, score));
                }
            }
        }

        let aborted = self.stopped;
        let (mv, score) = match best {
            Some(found) => found,
            None => {
                let fallback = self.rules.apply_move(state, first);
                (first, evaluate(&fallback, color))
            }
        };

        if aborted {
            let completed = scores.iter().filter(|s| s.is_some()).count();
            warn!(depth, completed, total = moves.len(), "search aborted by limits");
        }
        debug!(
            depth,
            nodes = self.nodes,
            score,
            mv = %mv,
            elapsed_ms = self.start_time.elapsed().as_millis() as u64,
            "search complete"
        );

        Some(SearchOutcome {
            mv,
            score,
            depth,
            nodes: self.nodes,
            aborted,
        })
    }
}

/// Minimax over the standard rules with no limits.
pub fn minimax(
    state: &GameState,
    depth: u8,
    maximizing: bool,
    perspective: Color,
    alpha: i32,
    beta: i32,
) -> i32 {
    Searcher::new(SearchLimits::none()).minimax(state, depth, maximizing, perspective, alpha, beta)
}

/// Best move for `color` at `depth` plies over the standard rules.
pub fn best_move(state: &GameState, color: Color, depth: u8) -> Option<Move> {
    Searcher::new(SearchLimits::none())
        .best_move(state, color, depth)
        .map(|outcome| outcome.mv)
}
