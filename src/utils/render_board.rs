//! Plain-text board renderer used by the diagnostic log and the bench binary.

use crate::game_state::board::Board;
use crate::game_state::draughts_types::{Piece, BOARD_SIZE};

const BORDER: &str = "   +-----------------+";
const COLUMN_LABELS: &str = "     0 1 2 3 4 5 6 7";

/// Render the board with row labels on the left and column labels below.
///
/// Row 0 is printed first. Men are `b`/`w`, kings `B`/`W`, empty squares `.`.
pub fn render_board(board: &Board) -> String {
    let mut out = String::with_capacity(256);

    out.push_str(BORDER);
    out.push('\n');

    for row in 0..BOARD_SIZE {
        out.push(' ');
        out.push(char::from(b'0' + row as u8));
        out.push_str(" | ");
        for col in 0..BOARD_SIZE {
            out.push(piece_symbol(board.piece_at_rc(row, col)));
            out.push(' ');
        }
        out.push_str("|\n");
    }

    out.push_str(BORDER);
    out.push('\n');
    out.push_str(COLUMN_LABELS);
    out
}

#[inline]
pub fn piece_symbol(piece: Piece) -> char {
    match piece {
        Piece::BlackMan => 'b',
        Piece::WhiteMan => 'w',
        Piece::BlackKing => 'B',
        Piece::WhiteKing => 'W',
        Piece::Empty | Piece::Ghost => '.',
    }
}

#[cfg(test)]
mod tests {
    use super::render_board;
    use crate::game_state::board::Board;
    use crate::game_state::draughts_types::Piece;

    #[test]
    fn renders_opening_position() {
        let text = render_board(&Board::initial());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "   +-----------------+");
        assert_eq!(lines[1], " 0 | . b . b . b . b |");
        assert_eq!(lines[4], " 3 | . . . . . . . . |");
        assert_eq!(lines[8], " 7 | w . w . w . w . |");
        assert_eq!(lines[10], "     0 1 2 3 4 5 6 7");
    }

    #[test]
    fn kings_use_capital_letters() {
        let mut board = Board::empty();
        board.set_rc(0, 1, Piece::WhiteKing);
        board.set_rc(7, 6, Piece::BlackKing);
        let text = render_board(&board);
        assert!(text.contains(" 0 | . W . . . . . . |"));
        assert!(text.contains(" 7 | . . . . . . B . |"));
    }
}
