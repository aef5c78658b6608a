//! C ABI entry point for host programs.
//!
//! `get_best_move` reads a flat 64-square board of piece codes and fills a
//! caller-owned `MoveResult`. One process-wide engine keeps its tables alive
//! between calls and writes its diagnostic log to the working directory.

use std::sync::OnceLock;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::warn;

use crate::errors::{EngineError, EngineResult};
use crate::game_state::board::Board;
use crate::game_state::draughts_types::{col_of, row_of, Side, BOARD_SQUARES, MATE, MAX_CHAIN};
use crate::moves::draughts_move::{DraughtsMove, Step};
use crate::search::board_scoring::BoardScorer;
use crate::search::iterative_deepening::{SearchConfig, SearchEngine, SearchResult};

/// One step in host coordinates.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FfiStep {
    pub r1: i32,
    pub c1: i32,
    pub r2: i32,
    pub c2: i32,
}

impl From<Step> for FfiStep {
    fn from(step: Step) -> Self {
        Self {
            r1: row_of(step.from_square()),
            c1: col_of(step.from_square()),
            r2: row_of(step.to_square()),
            c2: col_of(step.to_square()),
        }
    }
}

/// Search answer in the layout the host expects: twelve steps, then
/// `count`, `score`, `depth`, `nodes`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveResult {
    pub steps: [FfiStep; MAX_CHAIN],
    pub count: i32,
    pub score: i32,
    pub depth: i32,
    pub nodes: i32,
}

impl MoveResult {
    /// Answer for a side with no legal moves.
    pub fn no_move() -> Self {
        Self {
            score: -MATE,
            ..Self::default()
        }
    }

    fn with_move(mv: &DraughtsMove) -> Self {
        let mut out = Self {
            count: mv.len() as i32,
            ..Self::default()
        };
        for (slot, &step) in out.steps.iter_mut().zip(mv.steps()) {
            *slot = FfiStep::from(step);
        }
        out
    }
}

impl From<&SearchResult> for MoveResult {
    fn from(result: &SearchResult) -> Self {
        let Some(mv) = &result.best_move else {
            return Self::no_move();
        };
        Self {
            score: result.score,
            depth: result.depth,
            nodes: i32::try_from(result.nodes).unwrap_or(i32::MAX),
            ..Self::with_move(mv)
        }
    }
}

/// Decode host inputs and run one search on `engine`.
pub fn search_codes<S: BoardScorer>(
    engine: &mut SearchEngine<S>,
    codes: &[i32],
    side_code: i32,
    limit_sec: f64,
    max_depth: i32,
) -> EngineResult<MoveResult> {
    let board = Board::from_codes(codes)?;
    let side = Side::from_code(side_code);
    let result = engine.get_best_move(&board, side, time_limit_from_secs(limit_sec), max_depth);
    Ok(MoveResult::from(&result))
}

/// Seconds to a search budget. Values too large for `Duration` (including
/// infinity) mean no time bound; negative and NaN values mean no time at all.
pub fn time_limit_from_secs(limit_sec: f64) -> Duration {
    Duration::try_from_secs_f64(limit_sec).unwrap_or(if limit_sec > 0.0 {
        Duration::MAX
    } else {
        Duration::ZERO
    })
}

fn global_engine() -> &'static Mutex<SearchEngine> {
    static ENGINE: OnceLock<Mutex<SearchEngine>> = OnceLock::new();
    ENGINE.get_or_init(|| {
        Mutex::new(SearchEngine::new(SearchConfig {
            log_dir: Some(".".into()),
            ..SearchConfig::default()
        }))
    })
}

/// Choose a move for `side` on the 64-square board at `board_in` and write
/// it to `result_out`.
///
/// Unknown piece codes produce the no-move answer instead of a search.
///
/// # Safety
///
/// `board_in` must point to 64 readable `i32` values and `result_out` to a
/// writable `MoveResult`. Null pointers are rejected without writing.
#[no_mangle]
pub unsafe extern "C" fn get_best_move(
    board_in: *const i32,
    side: i32,
    limit_sec: f64,
    max_depth: i32,
    result_out: *mut MoveResult,
) {
    if result_out.is_null() {
        warn!(error = %EngineError::NullPointer("result_out"), "rejected search request");
        return;
    }
    if board_in.is_null() {
        warn!(error = %EngineError::NullPointer("board_in"), "rejected search request");
        // SAFETY: checked non-null above; the caller guarantees it is writable.
        unsafe { result_out.write(MoveResult::no_move()) };
        return;
    }

    // SAFETY: the caller guarantees `board_in` points to 64 readable values.
    let codes = unsafe { std::slice::from_raw_parts(board_in, BOARD_SQUARES) };
    let mut engine = global_engine().lock();
    let answer = match search_codes(&mut engine, codes, side, limit_sec, max_depth) {
        Ok(answer) => answer,
        Err(err) => {
            warn!(error = %err, "rejected search request");
            MoveResult::no_move()
        }
    };
    // SAFETY: checked non-null above; the caller guarantees it is writable.
    unsafe { result_out.write(answer) };
}
