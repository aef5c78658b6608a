//! Board-from-text parser.
//!
//! Accepts either eight rows of `.`/`b`/`w`/`B`/`W` or the framed layout
//! produced by `render_board`, so boards copied out of a diagnostic log can be
//! fed straight back into the engine. Row labels, borders and column labels
//! are skipped.

use crate::errors::{EngineError, EngineResult};
use crate::game_state::board::Board;
use crate::game_state::draughts_types::{Piece, BOARD_SIZE};

pub fn parse_board_text(text: &str) -> EngineResult<Board> {
    let mut board = Board::empty();
    let mut row = 0i32;

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let cells = parse_row(line, line_no)?;
        if cells.is_empty() {
            continue;
        }

        if row >= BOARD_SIZE {
            return Err(EngineError::InvalidBoardText {
                line: line_no,
                reason: "more than 8 board rows".to_owned(),
            });
        }
        if cells.len() != BOARD_SIZE as usize {
            return Err(EngineError::InvalidBoardText {
                line: line_no,
                reason: format!("expected 8 squares, found {}", cells.len()),
            });
        }

        for (col, piece) in cells.into_iter().enumerate() {
            board.set_rc(row, col as i32, piece);
        }
        row += 1;
    }

    if row != BOARD_SIZE {
        return Err(EngineError::InvalidBoardText {
            line: text.lines().count(),
            reason: format!("expected 8 board rows, found {row}"),
        });
    }

    Ok(board)
}

fn parse_row(line: &str, line_no: usize) -> EngineResult<Vec<Piece>> {
    let mut cells = Vec::with_capacity(BOARD_SIZE as usize);
    for ch in line.chars() {
        let piece = match ch {
            '.' => Piece::Empty,
            'b' => Piece::BlackMan,
            'w' => Piece::WhiteMan,
            'B' => Piece::BlackKing,
            'W' => Piece::WhiteKing,
            '|' | '+' | '-' => continue,
            c if c.is_whitespace() || c.is_ascii_digit() => continue,
            other => {
                return Err(EngineError::InvalidBoardText {
                    line: line_no,
                    reason: format!("unexpected character '{other}'"),
                })
            }
        };
        cells.push(piece);
    }
    Ok(cells)
}
