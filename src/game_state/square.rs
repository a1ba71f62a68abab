//! Board square index (`0 == a1`, `7 == h1`, `63 == h8`).

use std::fmt;

use crate::chess_errors::{ChessError, ChessResult};

/// A square that is always on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    pub const COUNT: usize = 64;

    /// Checked construction from a raw index.
    #[inline]
    pub fn new(index: u8) -> ChessResult<Self> {
        if index < 64 {
            Ok(Self(index))
        } else {
            Err(ChessError::SquareOutOfRange(index))
        }
    }

    /// Construction for indices already known to be in range (bit scans,
    /// table walks).
    #[inline]
    pub(crate) const fn from_index(index: u8) -> Self {
        debug_assert!(index < 64);
        Self(index & 63)
    }

    #[inline]
    pub fn from_coords(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Self(rank * 8 + file))
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    /// Step by a file/rank delta, `None` when it falls off the board.
    #[inline]
    pub fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let file = self.file() as i8 + file_delta;
        let rank = self.rank() as i8 + rank_delta;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Self((rank * 8 + file) as u8))
        } else {
            None
        }
    }

    /// Same square seen from the other side of the board.
    #[inline]
    pub const fn mirrored(self) -> Self {
        Self(self.0 ^ 56)
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square)
    }
}

impl TryFrom<u8> for Square {
    type Error = ChessError;

    fn try_from(index: u8) -> ChessResult<Self> {
        Square::new(index)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = char::from(b'a' + self.file());
        let rank = char::from(b'1' + self.rank());
        write!(f, "{file}{rank}")
    }
}
