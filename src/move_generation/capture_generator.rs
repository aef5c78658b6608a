//! Recursive capture-chain enumeration.
//!
//! Chains are built with make/undo on a single scratch board. A jumped piece
//! is replaced by a `Ghost` while the chain continues so it cannot be taken
//! twice, and so flying kings cannot slide through it. Men are not crowned
//! mid-chain.
//!
//! Only chains of the greatest length seen so far are kept, which applies the
//! maximum-capture rule during enumeration.

use crate::game_state::board::Board;
use crate::game_state::draughts_types::*;
use crate::moves::draughts_move::{DraughtsMove, MoveList, Step};

/// Append every maximal-length capture chain available to `side`.
///
/// `out` must hold no quiet moves on entry.
pub fn generate_captures(board: &Board, side: Side, out: &mut MoveList) {
    let mut scratch = *board;
    let mut chain = DraughtsMove::EMPTY_CAPTURE;

    for square in 0..BOARD_SQUARES {
        let piece = scratch.piece_at(square);
        if piece.belongs_to(side) {
            extend_chain(&mut scratch, square, piece, &mut chain, out);
        }
    }
}

fn extend_chain(
    board: &mut Board,
    square: Square,
    piece: Piece,
    chain: &mut DraughtsMove,
    out: &mut MoveList,
) {
    if chain.len() >= MAX_CHAIN {
        record_chain(chain, out);
        return;
    }

    let Some(side) = piece.side() else {
        return;
    };
    let (row, col) = (row_of(square), col_of(square));
    let mut continued = false;

    for (dr, dc) in DIRECTIONS {
        if piece.is_king() {
            let mut dist = 1;
            loop {
                let (vr, vc) = (row + dist * dr, col + dist * dc);
                if !is_valid(vr, vc) {
                    break;
                }
                let victim = board.piece_at_rc(vr, vc);
                if victim == Piece::Empty {
                    dist += 1;
                    continue;
                }
                if victim.is_enemy_of(side) {
                    let mut land = 1;
                    loop {
                        let (lr, lc) = (vr + land * dr, vc + land * dc);
                        if !is_valid(lr, lc) || !board.is_empty_at(lr, lc) {
                            break;
                        }
                        jump(
                            board,
                            square,
                            square_at(vr, vc),
                            square_at(lr, lc),
                            piece,
                            chain,
                            out,
                        );
                        continued = true;
                        land += 1;
                    }
                }
                break;
            }
        } else {
            let (lr, lc) = (row + 2 * dr, col + 2 * dc);
            if !is_valid(lr, lc) {
                continue;
            }
            let (vr, vc) = (row + dr, col + dc);
            if board.piece_at_rc(vr, vc).is_enemy_of(side) && board.is_empty_at(lr, lc) {
                jump(
                    board,
                    square,
                    square_at(vr, vc),
                    square_at(lr, lc),
                    piece,
                    chain,
                    out,
                );
                continued = true;
            }
        }
    }

    if !continued && !chain.is_empty() {
        record_chain(chain, out);
    }
}

fn jump(
    board: &mut Board,
    from: Square,
    over: Square,
    to: Square,
    piece: Piece,
    chain: &mut DraughtsMove,
    out: &mut MoveList,
) {
    let victim = board.piece_at(over);
    board.set(from, Piece::Empty);
    board.set(over, Piece::Ghost);
    board.set(to, piece);
    chain.push_step(Step::new(from, to));

    extend_chain(board, to, piece, chain, out);

    chain.pop_step();
    board.set(to, Piece::Empty);
    board.set(over, victim);
    board.set(from, piece);
}

fn record_chain(chain: &DraughtsMove, out: &mut MoveList) {
    let longest = out.first().map_or(0, DraughtsMove::len);
    if chain.len() > longest {
        out.clear();
        out.push(*chain);
    } else if chain.len() == longest {
        out.push(*chain);
    }
}
