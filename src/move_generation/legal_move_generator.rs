//! Legal move generation under the forced maximum-capture rule.
//!
//! Captures are compulsory and only the longest chains are legal. Without a
//! capture, men step one square diagonally forward and kings slide any
//! distance along the four diagonals. Squares are scanned in index order,
//! directions in fixed order, king slide distances ascending.

use crate::game_state::board::Board;
use crate::game_state::draughts_types::*;
use crate::move_generation::capture_generator::generate_captures;
use crate::moves::draughts_move::{DraughtsMove, MoveList};

/// Generate every legal move for `side`.
pub fn generate_moves(board: &Board, side: Side) -> MoveList {
    let mut moves = MoveList::new();
    generate_moves_into(board, side, &mut moves);
    moves
}

/// Fill `moves` with every legal move for `side`, replacing its contents.
pub fn generate_moves_into(board: &Board, side: Side, moves: &mut MoveList) {
    moves.clear();
    generate_captures(board, side, moves);
    if !moves.is_empty() {
        return;
    }
    generate_quiet_moves(board, side, moves);
}

fn generate_quiet_moves(board: &Board, side: Side, moves: &mut MoveList) {
    for square in 0..BOARD_SQUARES {
        let piece = board.piece_at(square);
        if !piece.belongs_to(side) {
            continue;
        }
        let (row, col) = (row_of(square), col_of(square));

        if piece.is_king() {
            for (dr, dc) in DIRECTIONS {
                let mut dist = 1;
                loop {
                    let (nr, nc) = (row + dist * dr, col + dist * dc);
                    if !is_valid(nr, nc) || !board.is_empty_at(nr, nc) {
                        break;
                    }
                    moves.push(DraughtsMove::quiet(square, square_at(nr, nc)));
                    dist += 1;
                }
            }
        } else {
            let nr = row + side.forward();
            for dc in [-1, 1] {
                let nc = col + dc;
                if is_valid(nr, nc) && board.is_empty_at(nr, nc) {
                    moves.push(DraughtsMove::quiet(square, square_at(nr, nc)));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::generate_moves;
    use crate::game_state::board::Board;
    use crate::game_state::draughts_types::{square_at, Piece, Side};
    use crate::move_generation::legal_move_apply::apply_move;
    use crate::moves::draughts_move::DraughtsMove;
    use crate::utils::board_text::parse_board_text;
    use proptest::prelude::*;

    fn board_with(pieces: &[(i32, i32, Piece)]) -> Board {
        let mut board = Board::empty();
        for &(row, col, piece) in pieces {
            board.set_rc(row, col, piece);
        }
        board
    }

    fn rendered(moves: &[DraughtsMove]) -> Vec<String> {
        moves.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn lone_edge_man_has_one_step() {
        let board = board_with(&[(5, 0, Piece::WhiteMan)]);
        let moves = generate_moves(&board, Side::White);
        assert_eq!(rendered(moves.as_slice()), vec!["(5,0-4,1)"]);
    }

    #[test]
    fn mandatory_capture_overrides_quiet_moves() {
        let board = board_with(&[(4, 3, Piece::WhiteMan), (3, 2, Piece::BlackMan)]);
        let moves = generate_moves(&board, Side::White);
        assert_eq!(rendered(moves.as_slice()), vec!["(4,3-2,1)"]);
        assert!(moves[0].is_capture());
    }

    #[test]
    fn longest_chain_is_the_only_legal_move() {
        let board = board_with(&[
            (4, 3, Piece::WhiteMan),
            (3, 2, Piece::BlackMan),
            (1, 2, Piece::BlackMan),
        ]);
        let moves = generate_moves(&board, Side::White);
        assert_eq!(rendered(moves.as_slice()), vec!["(4,3-2,1)->(2,1-0,3)"]);
    }

    #[test]
    fn flying_king_may_land_on_any_square_past_the_victim() {
        let board = board_with(&[(7, 0, Piece::WhiteKing), (4, 3, Piece::BlackMan)]);
        let moves = generate_moves(&board, Side::White);
        assert_eq!(
            rendered(moves.as_slice()),
            vec!["(7,0-3,4)", "(7,0-2,5)", "(7,0-1,6)", "(7,0-0,7)"]
        );
    }

    #[test]
    fn flying_king_chains_through_successive_victims() {
        let board = parse_board_text(
            "........
             ........
             .....b..
             ........
             ...b....
             ........
             ........
             W.......",
        )
        .expect("board should parse");
        let moves = generate_moves(&board, Side::White);
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|m| m.len() == 2));
        assert!(moves
            .iter()
            .any(|m| m.to_string() == "(7,0-3,4)->(3,4-1,6)"));
    }

    #[test]
    fn king_slides_in_every_direction() {
        let board = board_with(&[(3, 3, Piece::BlackKing)]);
        let moves = generate_moves(&board, Side::Black);
        // 3 + 3 + 3 + 4 empty squares on the two diagonals through (3,3).
        assert_eq!(moves.len(), 13);
        assert_eq!(moves[0].to(), square_at(2, 2));
        assert!(moves.iter().all(|m| !m.is_capture()));
    }

    #[test]
    fn black_men_move_down_the_board() {
        let board = board_with(&[(2, 3, Piece::BlackMan)]);
        let moves = generate_moves(&board, Side::Black);
        assert_eq!(rendered(moves.as_slice()), vec!["(2,3-3,2)", "(2,3-3,4)"]);
    }

    #[test]
    fn opening_position_has_seven_moves_each() {
        let board = Board::initial();
        assert_eq!(generate_moves(&board, Side::White).len(), 7);
        assert_eq!(generate_moves(&board, Side::Black).len(), 7);
    }

    #[test]
    fn blocked_side_has_no_moves() {
        let board = board_with(&[
            (1, 0, Piece::WhiteMan),
            (0, 1, Piece::BlackMan),
        ]);
        assert!(generate_moves(&board, Side::White).is_empty());
    }

    fn arbitrary_board() -> impl Strategy<Value = Board> {
        let square = prop_oneof![
            6 => Just(Piece::Empty),
            2 => Just(Piece::BlackMan),
            2 => Just(Piece::WhiteMan),
            1 => Just(Piece::BlackKing),
            1 => Just(Piece::WhiteKing),
        ];
        prop::collection::vec(square, 64).prop_map(|pieces| {
            let mut board = Board::empty();
            for (sq, piece) in pieces.into_iter().enumerate() {
                board.set(sq, piece);
            }
            board
        })
    }

    fn arbitrary_side() -> impl Strategy<Value = Side> {
        prop_oneof![Just(Side::White), Just(Side::Black)]
    }

    proptest! {
        #[test]
        fn captures_share_one_maximal_length(board in arbitrary_board(), side in arbitrary_side()) {
            let moves = generate_moves(&board, side);
            if let Some(first) = moves.first() {
                if first.is_capture() {
                    prop_assert!(moves.iter().all(|m| m.is_capture() && m.len() == first.len()));
                } else {
                    prop_assert!(moves.iter().all(|m| !m.is_capture() && m.len() == 1));
                }
            }
        }

        #[test]
        fn applying_a_move_removes_exactly_the_captured_pieces(
            board in arbitrary_board(),
            side in arbitrary_side(),
        ) {
            let moves = generate_moves(&board, side);
            for mv in &moves {
                let mut next = board;
                let removed = apply_move(&mut next, mv);
                let expected = if mv.is_capture() { mv.len() } else { 0 };
                prop_assert_eq!(removed, expected);
                prop_assert_eq!(next.count_pieces(side), board.count_pieces(side));
                prop_assert_eq!(
                    next.count_pieces(side.opposite()),
                    board.count_pieces(side.opposite()) - expected
                );
                let crowned = next.count_kings(side) > board.count_kings(side);
                if crowned {
                    prop_assert_eq!(
                        crate::game_state::draughts_types::row_of(mv.to()),
                        side.promotion_row()
                    );
                }
            }
        }
    }
}
