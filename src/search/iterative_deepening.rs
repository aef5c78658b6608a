//! Iterative deepening driver.
//!
//! `SearchEngine` owns every piece of search state: the transposition table,
//! killer and history tables, the scorer and the optional diagnostic log.
//! State persists between `get_best_move` calls unless
//! `SearchConfig::clear_between_searches` is set or `new_game` is called.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, trace, warn};

use crate::game_state::board::Board;
use crate::game_state::draughts_types::{Side, INF, MATE};
use crate::move_generation::legal_move_apply::{apply_move, is_promotion_move};
use crate::move_generation::legal_move_generator::generate_moves;
use crate::moves::draughts_move::{DraughtsMove, MoveList};
use crate::search::board_scoring::{BoardScorer, HeuristicScorer};
use crate::search::move_ordering::{pick_next_move, SearchHeuristics};
use crate::search::transposition_table::{TTStats, TranspositionTable};
use crate::search::zobrist;
use crate::utils::diagnostic_log::DiagnosticLog;
use crate::utils::render_board::render_board;

/// Scores above `MATE - MATE_FOUND_MARGIN` end deepening early.
const MATE_FOUND_MARGIN: i32 = 5000;

#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Transposition table holds `2^tt_size_bits` entries.
    pub tt_size_bits: u32,
    /// Reset the TT, killers and history at the start of every search.
    pub clear_between_searches: bool,
    /// Directory for the diagnostic log file. `None` disables the file sink.
    pub log_dir: Option<PathBuf>,
    pub max_nodes: Option<u64>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            tt_size_bits: TranspositionTable::DEFAULT_SIZE_BITS,
            clear_between_searches: false,
            log_dir: None,
            max_nodes: None,
            stop_flag: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchResult {
    /// `None` only when the side to move has no legal moves.
    pub best_move: Option<DraughtsMove>,
    pub score: i32,
    /// Deepest fully completed iteration.
    pub depth: i32,
    pub nodes: u64,
    pub elapsed_ms: u64,
    pub tt_stats: TTStats,
}

/// Per-call clock and node accounting.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SearchContext {
    pub(crate) started_at: Instant,
    pub(crate) time_limit: Duration,
    pub(crate) nodes: u64,
    pub(crate) stopped: bool,
}

impl SearchContext {
    fn start(time_limit: Duration) -> Self {
        Self {
            started_at: Instant::now(),
            time_limit,
            nodes: 0,
            stopped: false,
        }
    }
}

impl Default for SearchContext {
    fn default() -> Self {
        Self::start(Duration::MAX)
    }
}

pub struct SearchEngine<S: BoardScorer = HeuristicScorer> {
    pub(crate) tt: TranspositionTable,
    pub(crate) heuristics: SearchHeuristics,
    pub(crate) scorer: S,
    pub(crate) config: SearchConfig,
    pub(crate) ctx: SearchContext,
    log: Option<DiagnosticLog>,
}

impl SearchEngine<HeuristicScorer> {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_scorer(config, HeuristicScorer)
    }
}

impl Default for SearchEngine<HeuristicScorer> {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl<S: BoardScorer> SearchEngine<S> {
    pub fn with_scorer(config: SearchConfig, scorer: S) -> Self {
        zobrist::init();
        let log = config.log_dir.as_ref().map(DiagnosticLog::in_directory);
        Self {
            tt: TranspositionTable::with_size_bits(config.tt_size_bits),
            heuristics: SearchHeuristics::default(),
            scorer,
            config,
            ctx: SearchContext::default(),
            log,
        }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[inline]
    pub fn tt_stats(&self) -> TTStats {
        self.tt.stats()
    }

    pub fn log_path(&self) -> Option<&std::path::Path> {
        self.log.as_ref().map(DiagnosticLog::path)
    }

    /// Forget everything learned from earlier searches.
    pub fn new_game(&mut self) {
        self.tt.clear();
        self.heuristics.clear();
    }

    /// Pick a move for `side` within `time_limit`, deepening up to
    /// `max_depth` plies.
    pub fn get_best_move(
        &mut self,
        board: &Board,
        side: Side,
        time_limit: Duration,
        max_depth: i32,
    ) -> SearchResult {
        self.ctx = SearchContext::start(time_limit);
        self.log_line(&format!("\n{}", render_board(board)));

        let mut root_moves = generate_moves(board, side);
        match root_moves.len() {
            0 => {
                debug!(?side, "no legal moves");
                return self.finish(None, -MATE, 0);
            }
            1 => {
                trace!(?side, mv = %root_moves[0], "forced move");
                self.log_line("FORCED MOVE: Only 1 legal move.");
                return self.finish(Some(root_moves[0]), 0, 1);
            }
            _ => {}
        }

        if self.config.clear_between_searches {
            self.new_game();
        }

        let mut best_move = root_moves[0];
        let mut best_score = -INF;
        let mut reached_depth = 0;

        for depth in 1..=max_depth {
            if self.should_abort() {
                break;
            }

            let previous_best = best_move.key();
            let heuristics = &self.heuristics;
            pick_next_move(&mut root_moves, 0, |mv| {
                heuristics.order_score(board, mv, previous_best, 0, side)
            });

            let Some((mv, score)) = self.search_root(board, side, &root_moves, depth) else {
                break;
            };

            best_move = mv;
            best_score = score;
            reached_depth = depth;

            debug!(depth, score, nodes = self.ctx.nodes, mv = %best_move, "iteration complete");
            self.log_line(&format!(
                "DEPTH {depth:2} | Score: {best_score:6} | Move: {best_move}"
            ));

            if best_score > MATE - MATE_FOUND_MARGIN {
                break;
            }
        }

        self.log_line(&format!(
            "FINAL BEST MOVE (Player {}, Score {best_score}, Depth {reached_depth}): {best_move}",
            side.code()
        ));
        info!(
            ?side,
            score = best_score,
            depth = reached_depth,
            nodes = self.ctx.nodes,
            mv = %best_move,
            "search finished"
        );

        self.finish(Some(best_move), best_score, reached_depth)
    }

    /// One full-width root iteration at `depth`. `None` when the search was
    /// stopped before every root move was scored.
    fn search_root(
        &mut self,
        board: &Board,
        side: Side,
        root_moves: &MoveList,
        depth: i32,
    ) -> Option<(DraughtsMove, i32)> {
        let opponent = side.opposite();
        let beta = INF;
        let mut alpha = -INF;
        let mut best_move = root_moves[0];
        let mut best_score = -INF;

        for (i, mv) in root_moves.iter().enumerate() {
            let extension = i32::from(is_promotion_move(mv, board.piece_at(mv.from())));
            let child_depth = depth - 1 + extension;

            let mut child = *board;
            apply_move(&mut child, mv);

            let score = if i == 0 {
                -self.alpha_beta(&child, child_depth, -beta, -alpha, opponent, 1)?
            } else {
                let scout = -self.alpha_beta(&child, child_depth, -alpha - 1, -alpha, opponent, 1)?;
                if scout > alpha && scout < beta {
                    -self.alpha_beta(&child, child_depth, -beta, -alpha, opponent, 1)?
                } else {
                    scout
                }
            };

            if score > best_score {
                best_score = score;
                best_move = *mv;
                alpha = alpha.max(score);
            }
        }

        Some((best_move, best_score))
    }

    /// True once the clock, node budget or external stop flag says to halt.
    pub(crate) fn should_abort(&self) -> bool {
        if self.ctx.started_at.elapsed() >= self.ctx.time_limit {
            return true;
        }
        if let Some(cap) = self.config.max_nodes {
            if self.ctx.nodes >= cap {
                return true;
            }
        }
        if let Some(flag) = &self.config.stop_flag {
            if flag.load(Ordering::Relaxed) {
                return true;
            }
        }
        false
    }

    fn finish(&self, best_move: Option<DraughtsMove>, score: i32, depth: i32) -> SearchResult {
        SearchResult {
            best_move,
            score,
            depth,
            nodes: self.ctx.nodes,
            elapsed_ms: self.ctx.started_at.elapsed().as_millis() as u64,
            tt_stats: self.tt.stats(),
        }
    }

    fn log_line(&self, line: &str) {
        let Some(log) = &self.log else {
            return;
        };
        if let Err(err) = log.write_line(line) {
            warn!(path = %log.path().display(), %err, "diagnostic log write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SearchConfig, SearchEngine};
    use crate::game_state::board::Board;
    use crate::game_state::draughts_types::{row_of, square_at, Piece, Side, INF, MATE};
    use crate::moves::draughts_move::DraughtsMove;
    use crate::search::board_scoring::MaterialScorer;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    fn small_config() -> SearchConfig {
        SearchConfig {
            tt_size_bits: 16,
            ..SearchConfig::default()
        }
    }

    fn long() -> Duration {
        Duration::from_secs(30)
    }

    #[test]
    fn forced_single_move_short_circuits() {
        let mut board = Board::empty();
        board.set_rc(5, 0, Piece::WhiteMan);
        let mut engine = SearchEngine::new(small_config());

        let result = engine.get_best_move(&board, Side::White, long(), 8);
        assert_eq!(
            result.best_move,
            Some(DraughtsMove::quiet(square_at(5, 0), square_at(4, 1)))
        );
        assert_eq!(result.depth, 1);
        assert_eq!(result.score, 0);
        assert_eq!(result.nodes, 0);
    }

    #[test]
    fn no_legal_moves_returns_loss_sentinel() {
        let mut board = Board::empty();
        board.set_rc(3, 4, Piece::BlackMan);
        let mut engine = SearchEngine::new(small_config());

        let result = engine.get_best_move(&board, Side::White, long(), 4);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, -MATE);
        assert_eq!(result.depth, 0);
    }

    #[test]
    fn capture_that_ends_the_game_scores_as_mate() {
        let mut board = Board::empty();
        board.set_rc(4, 3, Piece::WhiteMan);
        board.set_rc(4, 1, Piece::WhiteMan);
        board.set_rc(3, 2, Piece::BlackMan);
        let mut engine = SearchEngine::new(small_config());

        let result = engine.get_best_move(&board, Side::White, long(), 6);
        let mv = result.best_move.expect("white has captures");
        assert!(mv.is_capture());
        assert_eq!(result.score, MATE - 1);
        assert_eq!(result.depth, 1);
    }

    #[test]
    fn man_on_second_row_crowns() {
        let mut board = Board::empty();
        board.set_rc(1, 4, Piece::WhiteMan);
        board.set_rc(5, 0, Piece::BlackMan);
        let mut engine = SearchEngine::new(small_config());

        let result = engine.get_best_move(&board, Side::White, long(), 2);
        let mv = result.best_move.expect("white can move");
        assert_eq!(row_of(mv.to()), 0);
        assert!(result.score > 0);
        assert_eq!(result.depth, 2);
    }

    #[test]
    fn opening_search_completes_requested_depth() {
        let mut engine = SearchEngine::new(small_config());
        let result = engine.get_best_move(&Board::initial(), Side::White, long(), 4);
        assert_eq!(result.depth, 4);
        assert!(result.best_move.is_some());
        assert!(result.nodes > 0);
        assert!(result.tt_stats.stores > 0);
    }

    #[test]
    fn time_limit_bounds_the_search() {
        let mut engine = SearchEngine::new(small_config());
        let started = Instant::now();
        let result = engine.get_best_move(
            &Board::initial(),
            Side::Black,
            Duration::from_millis(50),
            64,
        );
        assert!(started.elapsed() < Duration::from_secs(2));
        assert!(result.best_move.is_some());
        assert!(result.depth < 64);
    }

    #[test]
    fn zero_budget_falls_back_to_first_root_move() {
        let mut engine = SearchEngine::new(small_config());
        let result = engine.get_best_move(&Board::initial(), Side::White, Duration::ZERO, 6);
        assert!(result.best_move.is_some());
        assert_eq!(result.depth, 0);
        assert_eq!(result.score, -INF);
    }

    #[test]
    fn raised_stop_flag_prevents_any_iteration() {
        let flag = Arc::new(AtomicBool::new(true));
        let mut engine = SearchEngine::new(SearchConfig {
            stop_flag: Some(Arc::clone(&flag)),
            ..small_config()
        });
        let result = engine.get_best_move(&Board::initial(), Side::White, long(), 6);
        assert_eq!(result.depth, 0);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn node_budget_is_respected() {
        let mut engine = SearchEngine::new(SearchConfig {
            max_nodes: Some(500),
            ..small_config()
        });
        let result = engine.get_best_move(&Board::initial(), Side::White, long(), 20);
        assert!(result.nodes <= 500, "nodes exceeded cap: {}", result.nodes);
        assert!(result.depth < 20);
    }

    #[test]
    fn material_scorer_plugs_in() {
        let mut board = Board::empty();
        board.set_rc(5, 2, Piece::WhiteMan);
        board.set_rc(5, 6, Piece::WhiteMan);
        board.set_rc(2, 1, Piece::BlackMan);
        let mut engine = SearchEngine::with_scorer(small_config(), MaterialScorer);

        let result = engine.get_best_move(&board, Side::White, long(), 3);
        assert!(result.best_move.is_some());
        assert_eq!(result.depth, 3);
    }

    #[test]
    fn log_file_records_iterations() {
        let dir = std::env::temp_dir().join(format!("waylon_search_log_{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("scratch dir");
        let mut engine = SearchEngine::new(SearchConfig {
            log_dir: Some(dir.clone()),
            ..small_config()
        });

        engine.get_best_move(&Board::initial(), Side::White, long(), 2);
        let path = engine.log_path().expect("log enabled").to_path_buf();
        let text = std::fs::read_to_string(&path).expect("log written");
        assert!(text.contains("   +-----------------+"));
        assert!(text.contains("DEPTH  1 | Score:"));
        assert!(text.contains("DEPTH  2 | Score:"));
        assert!(text.contains("FINAL BEST MOVE (Player 2, Score"));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn new_game_resets_learned_state() {
        let mut engine = SearchEngine::new(small_config());
        engine.get_best_move(&Board::initial(), Side::White, long(), 3);
        assert!(engine.tt_stats().stores > 0);
        engine.new_game();
        assert_eq!(engine.tt_stats().stores, 0);
    }

    #[test]
    fn config_is_kept_as_given() {
        let engine = SearchEngine::new(SearchConfig {
            max_nodes: Some(1234),
            clear_between_searches: true,
            ..small_config()
        });
        assert_eq!(engine.config().tt_size_bits, 16);
        assert_eq!(engine.config().max_nodes, Some(1234));
        assert!(engine.config().clear_between_searches);
        assert!(engine.config().log_dir.is_none());
    }
}
