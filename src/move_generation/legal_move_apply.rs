//! Move application on a scratch board.

use crate::game_state::board::Board;
use crate::game_state::draughts_types::*;
use crate::moves::draughts_move::DraughtsMove;

/// Play `mv` on `board` and return the number of pieces removed.
///
/// A step is treated as a capture when it spans two or more rows or belongs
/// to a multi-step chain; the first occupied square strictly between its
/// endpoints is cleared. Men landing on their promotion row are crowned.
pub fn apply_move(board: &mut Board, mv: &DraughtsMove) -> usize {
    if mv.is_empty() {
        return 0;
    }

    let origin = mv.from();
    let piece = board.piece_at(origin);
    board.set(origin, Piece::Empty);

    let chained = mv.len() > 1;
    let mut removed = 0;
    for step in mv.steps() {
        if (step.row_distance() >= 2 || chained)
            && clear_jumped_piece(board, step.from_square(), step.to_square())
        {
            removed += 1;
        }
    }

    let dest = mv.to();
    board.set(dest, piece.crowned_on(row_of(dest)));
    removed
}

fn clear_jumped_piece(board: &mut Board, from: Square, to: Square) -> bool {
    let (er, ec) = (row_of(to), col_of(to));
    let dr = (er - row_of(from)).signum();
    let dc = (ec - col_of(from)).signum();
    let (mut r, mut c) = (row_of(from) + dr, col_of(from) + dc);

    while r != er && is_valid(r, c) {
        if !board.is_empty_at(r, c) {
            board.set_rc(r, c, Piece::Empty);
            return true;
        }
        r += dr;
        c += dc;
    }
    false
}

/// True when `mv` is a single step that crowns the man `piece`.
#[inline]
pub fn is_promotion_move(mv: &DraughtsMove, piece: Piece) -> bool {
    if mv.len() != 1 {
        return false;
    }
    match piece.side() {
        Some(side) if piece.is_man() => row_of(mv.to()) == side.promotion_row(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_move, is_promotion_move};
    use crate::game_state::board::Board;
    use crate::game_state::draughts_types::{square_at, Piece};
    use crate::moves::draughts_move::{DraughtsMove, Step};

    #[test]
    fn quiet_step_moves_the_piece() {
        let mut board = Board::empty();
        board.set_rc(5, 0, Piece::WhiteMan);
        let removed = apply_move(&mut board, &DraughtsMove::quiet(square_at(5, 0), square_at(4, 1)));
        assert_eq!(removed, 0);
        assert_eq!(board.piece_at_rc(5, 0), Piece::Empty);
        assert_eq!(board.piece_at_rc(4, 1), Piece::WhiteMan);
    }

    #[test]
    fn double_jump_clears_both_victims_and_crowns() {
        let mut board = Board::empty();
        board.set_rc(4, 3, Piece::WhiteMan);
        board.set_rc(3, 2, Piece::BlackMan);
        board.set_rc(1, 2, Piece::BlackMan);
        let mv = DraughtsMove::capture(&[
            Step::new(square_at(4, 3), square_at(2, 1)),
            Step::new(square_at(2, 1), square_at(0, 3)),
        ]);

        assert_eq!(apply_move(&mut board, &mv), 2);
        assert_eq!(board.piece_at_rc(3, 2), Piece::Empty);
        assert_eq!(board.piece_at_rc(1, 2), Piece::Empty);
        assert_eq!(board.piece_at_rc(0, 3), Piece::WhiteKing);
        assert_eq!(board.piece_at_rc(4, 3), Piece::Empty);
    }

    #[test]
    fn flying_capture_removes_distant_victim() {
        let mut board = Board::empty();
        board.set_rc(7, 0, Piece::WhiteKing);
        board.set_rc(4, 3, Piece::BlackMan);
        let mv = DraughtsMove::capture(&[Step::new(square_at(7, 0), square_at(1, 6))]);
        assert_eq!(apply_move(&mut board, &mv), 1);
        assert_eq!(board.piece_at_rc(4, 3), Piece::Empty);
        assert_eq!(board.piece_at_rc(1, 6), Piece::WhiteKing);
    }

    #[test]
    fn long_quiet_king_slide_removes_nothing() {
        let mut board = Board::empty();
        board.set_rc(0, 1, Piece::BlackKing);
        let mv = DraughtsMove::quiet(square_at(0, 1), square_at(6, 7));
        assert_eq!(apply_move(&mut board, &mv), 0);
        assert_eq!(board.piece_at_rc(6, 7), Piece::BlackKing);
    }

    #[test]
    fn black_man_crowns_on_row_seven() {
        let mut board = Board::empty();
        board.set_rc(6, 1, Piece::BlackMan);
        let mv = DraughtsMove::quiet(square_at(6, 1), square_at(7, 0));
        assert!(is_promotion_move(&mv, Piece::BlackMan));
        assert!(!is_promotion_move(&mv, Piece::BlackKing));
        apply_move(&mut board, &mv);
        assert_eq!(board.piece_at_rc(7, 0), Piece::BlackKing);
    }
}
