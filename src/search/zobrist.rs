//! Zobrist hashing for position identity in the transposition table.
//!
//! The keys are drawn from a fixed seed so hashes are deterministic across
//! runs and processes, which keeps the table valid between calls.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::game_state::board::Board;
use crate::game_state::draughts_types::{Piece, Side, Square, BOARD_SQUARES};

const ZOBRIST_SEED: u64 = 12345;

#[derive(Debug)]
struct ZobristTables {
    /// `[square][piece code - 1]` for the four real piece codes.
    piece_square: [[u64; 4]; BOARD_SQUARES],
    black_to_move: u64,
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

    let mut piece_square = [[0u64; 4]; BOARD_SQUARES];
    for square in &mut piece_square {
        for key in square {
            *key = rng.next_u64();
        }
    }

    ZobristTables {
        piece_square,
        black_to_move: rng.next_u64(),
    }
}

/// Build the tables ahead of the first search.
pub fn init() {
    let _ = tables();
}

/// Key for `piece` standing on `square`; zero for empty and ghost squares.
#[inline]
pub fn piece_square_key(square: Square, piece: Piece) -> u64 {
    if !piece.is_piece() {
        return 0;
    }
    tables().piece_square[square][piece.code() as usize - 1]
}

/// Side-to-move toggle, xored in when black is to move.
#[inline]
pub fn side_to_move_key() -> u64 {
    tables().black_to_move
}

/// Fingerprint of the board and side to move.
pub fn compute_hash(board: &Board, side: Side) -> u64 {
    let mut key = 0u64;
    for (square, &piece) in board.squares().iter().enumerate() {
        key ^= piece_square_key(square, piece);
    }
    if side == Side::Black {
        key ^= side_to_move_key();
    }
    key
}
