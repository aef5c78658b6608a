//! Pluggable board evaluation.
//!
//! Search delegates static scoring to `BoardScorer` so heuristics can be
//! swapped without touching the search code. Scores are from the perspective
//! of the side to move.

use crate::game_state::board::Board;
use crate::game_state::draughts_types::*;

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of the side to move.
    fn score(&self, board: &Board, side_to_move: Side) -> i32;
}

pub const MAN_VALUE: i32 = 1000;
pub const KING_VALUE: i32 = 8000;

const RUNAWAY_BONUS: i32 = 600;
const MOBILITY_WEIGHT: i32 = 6;
const KING_MOBILITY: i32 = 5;
const PROMOTION_THREAT: i32 = 1000;
const TRADE_BONUS: i32 = 2500;

/// Man advancement bonus from white's point of view (row 0 is the crowning
/// row, so it is never scored). Black reads the table mirrored by row.
#[rustfmt::skip]
const MAN_PST: [i32; BOARD_SQUARES] = [
       0,    0,    0,    0,    0,    0,    0,    0,
    1500, 1500, 1500, 1500, 1500, 1500, 1500, 1500,
     800,  800,  800,  800,  800,  800,  800,  800,
     200,  200,  250,  250,  250,  250,  200,  200,
     100,  100,  150,  150,  150,  150,  100,  100,
      50,   50,   80,   80,   80,   80,   50,   50,
      20,   20,   20,   20,   20,   20,   20,   20,
      10,   10,   10,   10,   10,   10,   10,   10,
];

/// Full heuristic: material, advancement, runaway men, mobility, promotion
/// threats and a trade incentive for the side ahead.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScorer;

#[derive(Debug, Default)]
struct SideTally {
    score: i32,
    pieces: i32,
    mobility: i32,
}

impl HeuristicScorer {
    /// Advancement bonus for a man of `side` on `square`.
    #[inline]
    pub fn man_square_bonus(side: Side, square: Square) -> i32 {
        match side {
            Side::White => MAN_PST[square],
            Side::Black => MAN_PST[square_at(7 - row_of(square), col_of(square))],
        }
    }

    fn tally_pieces(board: &Board) -> [SideTally; 2] {
        let mut tallies = [SideTally::default(), SideTally::default()];

        for (square, &piece) in board.squares().iter().enumerate() {
            let Some(side) = piece.side() else {
                continue;
            };
            let tally = &mut tallies[side.index()];
            tally.pieces += 1;

            if piece.is_king() {
                tally.score += KING_VALUE;
                tally.mobility += KING_MOBILITY;
                continue;
            }

            let (row, col) = (row_of(square), col_of(square));
            tally.score += MAN_VALUE + Self::man_square_bonus(side, square);

            let runaway = match side {
                Side::White => row <= 2,
                Side::Black => row >= 5,
            };
            if runaway {
                tally.score += RUNAWAY_BONUS;
            }

            let nr = row + side.forward();
            for nc in [col - 1, col + 1] {
                if is_valid(nr, nc) && board.is_empty_at(nr, nc) {
                    tally.mobility += 1;
                }
            }
        }

        tallies
    }

    /// Penalty charged to `defender` for every enemy man one step from
    /// crowning with an open landing square.
    fn promotion_threats(board: &Board, defender: Side) -> i32 {
        let attacker = defender.opposite();
        let threat_row = attacker.promotion_row() - attacker.forward();
        let landing_row = attacker.promotion_row();

        let mut penalty = 0;
        for col in 0..BOARD_SIZE {
            if board.piece_at_rc(threat_row, col) != attacker.man() {
                continue;
            }
            let covered = [col - 1, col + 1]
                .into_iter()
                .any(|c| is_valid(landing_row, c) && !board.is_empty_at(landing_row, c));
            if !covered {
                penalty += PROMOTION_THREAT;
            }
        }
        penalty
    }
}

impl BoardScorer for HeuristicScorer {
    fn score(&self, board: &Board, side_to_move: Side) -> i32 {
        let [mut white, mut black] = Self::tally_pieces(board);

        white.score -= Self::promotion_threats(board, Side::White);
        black.score -= Self::promotion_threats(board, Side::Black);

        white.score += white.mobility * MOBILITY_WEIGHT;
        black.score += black.mobility * MOBILITY_WEIGHT;

        if white.pieces > black.pieces {
            white.score += TRADE_BONUS / (black.pieces + 1);
        }
        if black.pieces > white.pieces {
            black.score += TRADE_BONUS / (white.pieces + 1);
        }

        let white_minus_black = white.score - black.score;
        match side_to_move {
            Side::White => white_minus_black,
            Side::Black => -white_minus_black,
        }
    }
}

/// Plain material count, useful for predictable search tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl BoardScorer for MaterialScorer {
    fn score(&self, board: &Board, side_to_move: Side) -> i32 {
        let white_minus_black: i32 = board
            .squares()
            .iter()
            .map(|piece| {
                let value = if piece.is_king() { KING_VALUE } else { MAN_VALUE };
                match piece.side() {
                    Some(Side::White) => value,
                    Some(Side::Black) => -value,
                    None => 0,
                }
            })
            .sum();
        match side_to_move {
            Side::White => white_minus_black,
            Side::Black => -white_minus_black,
        }
    }
}
