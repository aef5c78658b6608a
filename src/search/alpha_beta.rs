//! Negamax principal-variation search with a transposition table, late move
//! reductions and a noisy-position extension past the horizon.

use tracing::trace;

use crate::game_state::board::Board;
use crate::game_state::draughts_types::{Side, INF, MATE, MAX_PLY};
use crate::move_generation::legal_move_apply::{apply_move, is_promotion_move};
use crate::move_generation::legal_move_generator::generate_moves;
use crate::moves::draughts_move::MoveKey;
use crate::search::board_scoring::BoardScorer;
use crate::search::iterative_deepening::SearchEngine;
use crate::search::move_ordering::pick_next_move;
use crate::search::transposition_table::{TTEntry, TTFlag};
use crate::search::zobrist::compute_hash;

/// The clock is sampled once every `CLOCK_CHECK_MASK + 1` nodes.
const CLOCK_CHECK_MASK: u64 = 2047;
/// Past this many plies below the horizon, noisy nodes are scored statically.
const QUIESCENCE_FLOOR: i32 = -12;
const LMR_MIN_DEPTH: i32 = 3;
const LMR_MIN_MOVE_INDEX: usize = 4;
const MATE_TT_THRESHOLD: i32 = MATE - 1000;

impl<S: BoardScorer> SearchEngine<S> {
    /// Score `board` for `side` to move. Returns `None` once the search has
    /// been stopped; callers unwind without using any partial result.
    pub(crate) fn alpha_beta(
        &mut self,
        board: &Board,
        depth: i32,
        mut alpha: i32,
        beta: i32,
        side: Side,
        ply: usize,
    ) -> Option<i32> {
        if self.ctx.stopped || self.node_budget_spent() {
            self.ctx.stopped = true;
            return None;
        }
        self.ctx.nodes += 1;
        if self.ctx.nodes & CLOCK_CHECK_MASK == 0 && self.should_abort() {
            trace!(nodes = self.ctx.nodes, "search stopped");
            self.ctx.stopped = true;
            return None;
        }

        let mut moves = generate_moves(board, side);
        if moves.is_empty() {
            return Some(-MATE + ply as i32);
        }

        let capture_forced = moves[0].is_capture();

        if depth <= 0 {
            let noisy = capture_forced
                || moves
                    .iter()
                    .any(|mv| is_promotion_move(mv, board.piece_at(mv.from())));
            if !noisy || depth < QUIESCENCE_FLOOR {
                return Some(self.scorer.score(board, side));
            }
        }

        let hash = compute_hash(board, side);
        let mut tt_move = MoveKey::NONE;
        if let Some(entry) = self.tt.probe(hash) {
            tt_move = entry.best_move;
            if ply > 0 && entry.depth >= depth {
                let score = tt_score_from_storage(entry.score, ply);
                match entry.flag {
                    TTFlag::Exact => return Some(score),
                    TTFlag::Alpha if score <= alpha => return Some(alpha),
                    TTFlag::Beta if score >= beta => return Some(beta),
                    _ => {}
                }
            }
        }

        let opponent = side.opposite();
        let mut best_score = -INF;
        let mut best_move = moves[0].key();
        let mut flag = TTFlag::Alpha;

        for i in 0..moves.len() {
            let heuristics = &self.heuristics;
            pick_next_move(&mut moves, i, |mv| {
                heuristics.order_score(board, mv, tt_move, ply, side)
            });
            let mv = moves[i];

            let promotion = is_promotion_move(&mv, board.piece_at(mv.from()));
            let extension = i32::from(promotion && ply < MAX_PLY);

            let mut child = *board;
            apply_move(&mut child, &mv);

            let score = if i == 0 {
                -self.alpha_beta(&child, depth - 1 + extension, -beta, -alpha, opponent, ply + 1)?
            } else {
                let reduction =
                    late_move_reduction(depth, capture_forced, promotion, mv.len(), i);

                let scout = -self.alpha_beta(
                    &child,
                    depth - 1 - reduction + extension,
                    -alpha - 1,
                    -alpha,
                    opponent,
                    ply + 1,
                )?;
                if scout > alpha && scout < beta {
                    -self.alpha_beta(&child, depth - 1 + extension, -beta, -alpha, opponent, ply + 1)?
                } else {
                    scout
                }
            };

            if score > best_score {
                best_score = score;
                best_move = mv.key();
                if score > alpha {
                    alpha = score;
                    flag = TTFlag::Exact;
                    if alpha >= beta {
                        flag = TTFlag::Beta;
                        if !capture_forced && mv.len() == 1 {
                            self.heuristics.record_cutoff(ply, &mv, side, depth);
                        }
                        break;
                    }
                }
            }
        }

        self.tt.store(TTEntry {
            key: hash,
            score: tt_score_for_storage(best_score, ply),
            depth,
            flag,
            best_move,
        });
        Some(best_score)
    }

    #[inline]
    fn node_budget_spent(&self) -> bool {
        self.config
            .max_nodes
            .is_some_and(|cap| self.ctx.nodes >= cap)
    }
}

/// Plies to cut from the null-window search of the move at `index`. Only
/// late quiet single steps at depth 3 or more are reduced.
#[inline]
fn late_move_reduction(
    depth: i32,
    capture_forced: bool,
    promotion: bool,
    steps: usize,
    index: usize,
) -> i32 {
    i32::from(
        depth >= LMR_MIN_DEPTH
            && !capture_forced
            && !promotion
            && steps == 1
            && index >= LMR_MIN_MOVE_INDEX,
    )
}

/// Mate scores are stored relative to the node so they stay valid when the
/// same position is reached at a different ply.
#[inline]
pub(crate) fn tt_score_for_storage(score: i32, ply: usize) -> i32 {
    let ply = ply as i32;
    if score >= MATE_TT_THRESHOLD {
        score.saturating_add(ply)
    } else if score <= -MATE_TT_THRESHOLD {
        score.saturating_sub(ply)
    } else {
        score
    }
}

#[inline]
pub(crate) fn tt_score_from_storage(score: i32, ply: usize) -> i32 {
    let ply = ply as i32;
    if score >= MATE_TT_THRESHOLD {
        score.saturating_sub(ply)
    } else if score <= -MATE_TT_THRESHOLD {
        score.saturating_add(ply)
    } else {
        score
    }
}
