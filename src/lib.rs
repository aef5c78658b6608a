//! Crate root module declarations for the Waylon draughts engine.
//!
//! Exposes the board model, move generation, search kernel, utilities and the
//! foreign-callable entry point so binaries, benches and host programs can
//! import stable module paths.

pub mod game_state {
    pub mod board;
    pub mod draughts_types;
}

pub mod moves {
    pub mod draughts_move;
}

pub mod move_generation {
    pub mod capture_generator;
    pub mod legal_move_apply;
    pub mod legal_move_generator;
    pub mod perft;
}

pub mod search {
    pub mod alpha_beta;
    pub mod board_scoring;
    pub mod iterative_deepening;
    pub mod move_ordering;
    pub mod transposition_table;
    pub mod zobrist;
}

pub mod utils {
    pub mod board_text;
    pub mod diagnostic_log;
    pub mod render_board;
}

pub mod errors;
pub mod ffi;
