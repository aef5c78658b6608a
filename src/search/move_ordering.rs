//! Move ordering heuristics: TT move, big captures, promotions, killers and
//! a per-side history table.

use crate::game_state::board::Board;
use crate::game_state::draughts_types::{Side, BOARD_SQUARES, MAX_PLY};
use crate::move_generation::legal_move_apply::is_promotion_move;
use crate::moves::draughts_move::{DraughtsMove, MoveKey, MoveList};

pub const TT_MOVE_SCORE: i32 = 2_000_000;
pub const MULTI_CAPTURE_SCORE: i32 = 1_000_000;
pub const CAPTURE_STEP_BONUS: i32 = 1000;
pub const PROMOTION_SCORE: i32 = 950_000;
pub const KILLER_PRIMARY_SCORE: i32 = 900_000;
pub const KILLER_SECONDARY_SCORE: i32 = 800_000;
/// History entries saturate below the killer scores.
pub const HISTORY_CAP: i32 = 700_000;

type HistoryTable = [[[i32; BOARD_SQUARES]; BOARD_SQUARES]; 2];

/// Killer and history tables carried between searches.
#[derive(Debug, Clone)]
pub struct SearchHeuristics {
    killers: [[MoveKey; 2]; MAX_PLY],
    history: Box<HistoryTable>,
}

impl Default for SearchHeuristics {
    fn default() -> Self {
        Self {
            killers: [[MoveKey::NONE; 2]; MAX_PLY],
            history: Box::new([[[0; BOARD_SQUARES]; BOARD_SQUARES]; 2]),
        }
    }
}

impl SearchHeuristics {
    pub fn clear(&mut self) {
        self.killers.fill([MoveKey::NONE; 2]);
        for side in self.history.iter_mut() {
            for from in side.iter_mut() {
                from.fill(0);
            }
        }
    }

    #[inline]
    pub fn killers_at(&self, ply: usize) -> [MoveKey; 2] {
        self.killers
            .get(ply)
            .copied()
            .unwrap_or([MoveKey::NONE; 2])
    }

    #[inline]
    pub fn history_score(&self, side: Side, from: usize, to: usize) -> i32 {
        self.history[side.index()][from][to]
    }

    /// Ordering score for `mv` at `ply`. Higher is searched first.
    pub fn order_score(
        &self,
        board: &Board,
        mv: &DraughtsMove,
        tt_move: MoveKey,
        ply: usize,
        side: Side,
    ) -> i32 {
        let key = mv.key();
        if !tt_move.is_none() && key == tt_move {
            return TT_MOVE_SCORE;
        }
        if mv.is_capture() && mv.row_span() > 2 {
            return MULTI_CAPTURE_SCORE + CAPTURE_STEP_BONUS * mv.len() as i32;
        }
        if is_promotion_move(mv, board.piece_at(mv.from())) {
            return PROMOTION_SCORE;
        }

        let [primary, secondary] = self.killers_at(ply);
        if !primary.is_none() && key == primary {
            return KILLER_PRIMARY_SCORE;
        }
        if !secondary.is_none() && key == secondary {
            return KILLER_SECONDARY_SCORE;
        }
        self.history_score(side, mv.from(), mv.to())
    }

    /// Remember a quiet move that produced a beta cutoff.
    pub fn record_cutoff(&mut self, ply: usize, mv: &DraughtsMove, side: Side, depth: i32) {
        if let Some(slot) = self.killers.get_mut(ply) {
            let key = mv.key();
            if slot[0] != key {
                slot[1] = slot[0];
                slot[0] = key;
            }
        }

        let bonus = depth.max(0).saturating_mul(depth.max(0));
        let entry = &mut self.history[side.index()][mv.from()][mv.to()];
        *entry = entry.saturating_add(bonus).min(HISTORY_CAP);
    }
}

/// Swap the best-scoring move in `moves[start..]` into `start`.
pub fn pick_next_move<F>(moves: &mut MoveList, start: usize, mut score: F)
where
    F: FnMut(&DraughtsMove) -> i32,
{
    let tail = moves.as_mut_slice();
    if start >= tail.len() {
        return;
    }

    let mut best_idx = start;
    let mut best_score = i32::MIN;
    for (i, mv) in tail.iter().enumerate().skip(start) {
        let s = score(mv);
        if s > best_score {
            best_score = s;
            best_idx = i;
        }
    }
    tail.swap(start, best_idx);
}
