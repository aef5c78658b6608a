//! Board value type.
//!
//! `Board` is a fixed 64-square array of piece codes. It is `Copy`, so search
//! nodes work on cheap stack-resident scratch copies.

use crate::errors::{EngineError, EngineResult};
use crate::game_state::draughts_types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Piece; BOARD_SQUARES],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    #[inline]
    pub const fn empty() -> Self {
        Self {
            squares: [Piece::Empty; BOARD_SQUARES],
        }
    }

    /// Standard opening layout: black men on the dark squares of rows 0-2,
    /// white men on rows 5-7.
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for square in 0..BOARD_SQUARES {
            let (row, col) = (row_of(square), col_of(square));
            if (row + col) % 2 == 0 {
                continue;
            }
            if row <= 2 {
                board.set(square, Piece::BlackMan);
            } else if row >= 5 {
                board.set(square, Piece::WhiteMan);
            }
        }
        board
    }

    /// Decode a flat host board. Codes must be in `0..=4`.
    pub fn from_codes(codes: &[i32]) -> EngineResult<Self> {
        if codes.len() != BOARD_SQUARES {
            return Err(EngineError::InvalidBoardLength(codes.len()));
        }
        let mut board = Self::empty();
        for (square, &code) in codes.iter().enumerate() {
            let piece = Piece::from_code(code)
                .ok_or(EngineError::InvalidPieceCode { square, code })?;
            board.squares[square] = piece;
        }
        Ok(board)
    }

    pub fn to_codes(&self) -> [i32; BOARD_SQUARES] {
        self.squares.map(Piece::code)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Piece {
        self.squares[square]
    }

    #[inline]
    pub fn piece_at_rc(&self, row: i32, col: i32) -> Piece {
        self.squares[square_at(row, col)]
    }

    #[inline]
    pub fn set(&mut self, square: Square, piece: Piece) {
        self.squares[square] = piece;
    }

    #[inline]
    pub fn set_rc(&mut self, row: i32, col: i32, piece: Piece) {
        self.set(square_at(row, col), piece);
    }

    #[inline]
    pub fn is_empty_at(&self, row: i32, col: i32) -> bool {
        self.piece_at_rc(row, col) == Piece::Empty
    }

    #[inline]
    pub fn squares(&self) -> &[Piece; BOARD_SQUARES] {
        &self.squares
    }

    /// Number of men and kings belonging to `side`.
    pub fn count_pieces(&self, side: Side) -> usize {
        self.squares.iter().filter(|p| p.belongs_to(side)).count()
    }

    pub fn count_kings(&self, side: Side) -> usize {
        self.squares
            .iter()
            .filter(|p| p.belongs_to(side) && p.is_king())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::Board;
    use crate::errors::EngineError;
    use crate::game_state::draughts_types::{Piece, Side};

    #[test]
    fn initial_position_has_twelve_men_each() {
        let board = Board::initial();
        assert_eq!(board.count_pieces(Side::White), 12);
        assert_eq!(board.count_pieces(Side::Black), 12);
        assert_eq!(board.piece_at_rc(5, 0), Piece::WhiteMan);
        assert_eq!(board.piece_at_rc(2, 1), Piece::BlackMan);
        assert_eq!(board.piece_at_rc(3, 0), Piece::Empty);
    }

    #[test]
    fn codes_round_trip() {
        let board = Board::initial();
        let codes = board.to_codes();
        assert_eq!(Board::from_codes(&codes).expect("valid codes"), board);
    }

    #[test]
    fn unknown_code_is_rejected() {
        let mut codes = [0i32; 64];
        codes[9] = 7;
        match Board::from_codes(&codes) {
            Err(EngineError::InvalidPieceCode { square, code }) => {
                assert_eq!(square, 9);
                assert_eq!(code, 7);
            }
            other => panic!("expected invalid piece code, got {other:?}"),
        }
    }

    #[test]
    fn short_board_is_rejected() {
        assert!(matches!(
            Board::from_codes(&[0; 10]),
            Err(EngineError::InvalidBoardLength(10))
        ));
    }
}
