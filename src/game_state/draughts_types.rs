//! Core draughts types: piece codes, sides, and square geometry.
//!
//! Squares are indexed `0..64` row-major with row 0 at the top. White men
//! advance toward row 0, black men toward row 7. Piece codes match the flat
//! integer board exchanged with host programs.

/// Board square index (`0..64`).
pub type Square = usize;

pub const BOARD_SIZE: i32 = 8;
pub const BOARD_SQUARES: usize = 64;

/// Longest capture chain a single move may hold.
pub const MAX_CHAIN: usize = 12;
/// Capacity of a per-node move list.
pub const MAX_MOVES: usize = 128;
/// Search plies tracked by the killer table.
pub const MAX_PLY: usize = 64;

pub const INF: i32 = 1_000_000;
pub const MATE: i32 = 900_000;

/// Diagonal directions `(d_row, d_col)` in generation order.
pub const DIRECTIONS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Interpret a host piece code as a side. White man/king codes mean white,
    /// anything else is treated as black.
    #[inline]
    pub const fn from_code(code: i32) -> Self {
        match code {
            2 | 4 => Side::White,
            _ => Side::Black,
        }
    }

    /// Man code used to name this side on the host boundary.
    #[inline]
    pub const fn code(self) -> i32 {
        self.man().code()
    }

    /// Row delta of a forward step.
    #[inline]
    pub const fn forward(self) -> i32 {
        match self {
            Side::White => -1,
            Side::Black => 1,
        }
    }

    /// Row on which this side's men are crowned.
    #[inline]
    pub const fn promotion_row(self) -> i32 {
        match self {
            Side::White => 0,
            Side::Black => BOARD_SIZE - 1,
        }
    }

    #[inline]
    pub const fn man(self) -> Piece {
        match self {
            Side::White => Piece::WhiteMan,
            Side::Black => Piece::BlackMan,
        }
    }

    #[inline]
    pub const fn king(self) -> Piece {
        match self {
            Side::White => Piece::WhiteKing,
            Side::Black => Piece::BlackKing,
        }
    }
}

/// Square contents. The discriminants are the host piece codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Piece {
    #[default]
    Empty = 0,
    BlackMan = 1,
    WhiteMan = 2,
    BlackKing = 3,
    WhiteKing = 4,
    /// Marks a square already jumped during chain enumeration.
    Ghost = 7,
}

impl Piece {
    #[inline]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Decode a host piece code. Ghost markers are never accepted from outside.
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Piece::Empty),
            1 => Some(Piece::BlackMan),
            2 => Some(Piece::WhiteMan),
            3 => Some(Piece::BlackKing),
            4 => Some(Piece::WhiteKing),
            _ => None,
        }
    }

    #[inline]
    pub const fn side(self) -> Option<Side> {
        match self {
            Piece::WhiteMan | Piece::WhiteKing => Some(Side::White),
            Piece::BlackMan | Piece::BlackKing => Some(Side::Black),
            Piece::Empty | Piece::Ghost => None,
        }
    }

    #[inline]
    pub const fn is_king(self) -> bool {
        matches!(self, Piece::WhiteKing | Piece::BlackKing)
    }

    #[inline]
    pub const fn is_man(self) -> bool {
        matches!(self, Piece::WhiteMan | Piece::BlackMan)
    }

    /// True for a real piece (man or king), false for empty and ghost squares.
    #[inline]
    pub const fn is_piece(self) -> bool {
        self.side().is_some()
    }

    #[inline]
    pub fn belongs_to(self, side: Side) -> bool {
        self.side() == Some(side)
    }

    #[inline]
    pub fn is_enemy_of(self, side: Side) -> bool {
        self.side() == Some(side.opposite())
    }

    /// The piece after landing on `row`: men reaching their promotion row
    /// become kings.
    #[inline]
    pub fn crowned_on(self, row: i32) -> Self {
        match self {
            Piece::WhiteMan if row == Side::White.promotion_row() => Piece::WhiteKing,
            Piece::BlackMan if row == Side::Black.promotion_row() => Piece::BlackKing,
            other => other,
        }
    }
}

#[inline]
pub const fn row_of(square: Square) -> i32 {
    (square / 8) as i32
}

#[inline]
pub const fn col_of(square: Square) -> i32 {
    (square % 8) as i32
}

/// Square index of an on-board `(row, col)`; callers check `is_valid` first.
#[inline]
pub const fn square_at(row: i32, col: i32) -> Square {
    (row * BOARD_SIZE + col) as Square
}

#[inline]
pub const fn is_valid(row: i32, col: i32) -> bool {
    row >= 0 && row < BOARD_SIZE && col >= 0 && col < BOARD_SIZE
}
