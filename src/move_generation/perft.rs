//! Leaf-node counting over the legal move tree, used to validate the move
//! generator and to benchmark it.

use crate::game_state::board::Board;
use crate::game_state::draughts_types::Side;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::generate_moves;
use crate::moves::draughts_move::DraughtsMove;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub promotions: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.promotions += rhs.promotions;
    }
}

pub fn perft(board: &Board, side: Side, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for mv in &generate_moves(board, side) {
        total.merge(perft_recurse(board, side, mv, depth));
    }
    total
}

fn perft_recurse(board: &Board, side: Side, mv: &DraughtsMove, depth: u8) -> PerftCounts {
    let mut next = *board;
    let crowned_before = next.count_kings(side);
    apply_move(&mut next, mv);

    if depth == 1 {
        return PerftCounts {
            nodes: 1,
            captures: u64::from(mv.is_capture()),
            promotions: u64::from(next.count_kings(side) > crowned_before),
        };
    }

    let mut counts = PerftCounts::default();
    let reply = side.opposite();
    for child in &generate_moves(&next, reply) {
        counts.merge(perft_recurse(&next, reply, child, depth - 1));
    }
    counts
}
