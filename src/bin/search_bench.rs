//! Fixed-suite search runner.
//!
//! Usage:
//! `cargo run --release --bin search_bench`
//! `cargo run --release --bin search_bench -- --depth 10 --time 2.5`
//!
//! Set `RUST_LOG=debug` to see per-iteration progress.

use std::time::Duration;

use tracing_subscriber::EnvFilter;

use waylon_draughts::errors::EngineResult;
use waylon_draughts::ffi::time_limit_from_secs;
use waylon_draughts::game_state::board::Board;
use waylon_draughts::game_state::draughts_types::Side;
use waylon_draughts::search::iterative_deepening::{SearchConfig, SearchEngine};
use waylon_draughts::utils::board_text::parse_board_text;
use waylon_draughts::utils::render_board::render_board;

fn parse_arg<T: std::str::FromStr>(flag: &str, default: T) -> T {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            if let Ok(v) = args[i + 1].parse::<T>() {
                return v;
            }
        }
    }
    default
}

fn run_case(
    engine: &mut SearchEngine,
    name: &str,
    board: &Board,
    side: Side,
    time_limit: Duration,
    depth: i32,
) {
    println!("{name} ({side:?} to move)\n{}", render_board(board));
    let result = engine.get_best_move(board, side, time_limit, depth);
    let best = result
        .best_move
        .map(|mv| mv.to_string())
        .unwrap_or_else(|| "none".to_owned());
    let nps = if result.elapsed_ms == 0 {
        0
    } else {
        result.nodes.saturating_mul(1000) / result.elapsed_ms
    };
    println!(
        "{name}: depth={} nodes={} elapsed_ms={} nps={} score={} tt_hits={}/{} best_move={best}\n",
        result.depth,
        result.nodes,
        result.elapsed_ms,
        nps,
        result.score,
        result.tt_stats.hits,
        result.tt_stats.probes,
    );
}

fn main() -> EngineResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let depth = parse_arg("--depth", 8i32).max(1);
    let seconds = parse_arg("--time", 5.0f64);
    let time_limit = time_limit_from_secs(seconds);

    let suite = [
        ("opening", Board::initial(), Side::White),
        (
            "runaway",
            parse_board_text(
                "........\n....w...\n........\n........\n........\nb.......\n........\n........",
            )?,
            Side::White,
        ),
        (
            "flying_king",
            parse_board_text(
                "........\n........\n........\n........\n...b....\n........\n........\nW.......",
            )?,
            Side::White,
        ),
    ];

    let mut engine = SearchEngine::new(SearchConfig {
        tt_size_bits: 20,
        clear_between_searches: true,
        ..SearchConfig::default()
    });

    println!(
        "search bench: depth={depth} time={seconds}s tt_bits={}",
        engine.config().tt_size_bits
    );
    for (name, board, side) in suite {
        run_case(&mut engine, name, &board, side, time_limit, depth);
    }
    Ok(())
}
