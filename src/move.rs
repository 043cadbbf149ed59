//! Board coordinates and the representation of a move.

use crate::constants::BOARD_SIZE;
use crate::error::EngineError;
use std::fmt;
use std::str::FromStr;

/// A square on the board. Row 0 is Black's home row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Creates a position. Coordinates off the board are a caller bug and panic.
    pub fn new(row: usize, col: usize) -> Self {
        assert!(
            row < BOARD_SIZE && col < BOARD_SIZE,
            "position ({row}, {col}) is off the board"
        );
        Position { row, col }
    }

    /// Checked constructor for coordinates coming from outside the engine.
    pub fn try_new(row: usize, col: usize) -> Result<Self, EngineError> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Ok(Position { row, col })
        } else {
            Err(EngineError::OutOfRangePosition { row, col })
        }
    }

    pub fn from_index(idx: usize) -> Self {
        Position::new(idx / BOARD_SIZE, idx % BOARD_SIZE)
    }

    pub fn index(self) -> usize {
        self.row * BOARD_SIZE + self.col
    }

    /// Pieces only ever stand on squares where `row + col` is odd.
    pub fn is_playable(self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    /// The square `(dr, dc)` away, if it is still on the board.
    pub fn offset(self, dr: isize, dc: isize) -> Option<Position> {
        let row = self.row as isize + dr;
        let col = self.col as isize + dc;
        let size = BOARD_SIZE as isize;
        if (0..size).contains(&row) && (0..size).contains(&col) {
            Some(Position { row: row as usize, col: col as usize })
        } else {
            None
        }
    }

    /// The square halfway between two positions two diagonal steps apart.
    pub fn midpoint(self, other: Position) -> Position {
        Position {
            row: (self.row + other.row) / 2,
            col: (self.col + other.col) / 2,
        }
    }
}

/// Squares are written column letter then row digit: `a1` is row 0, column 0.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col as u8) as char, self.row + 1)
    }
}

impl FromStr for Position {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.trim().as_bytes();
        if bytes.len() != 2 {
            return Err(EngineError::InvalidSquare(s.to_string()));
        }
        let col = bytes[0].to_ascii_lowercase().wrapping_sub(b'a') as usize;
        let row = bytes[1].wrapping_sub(b'1') as usize;
        Position::try_new(row, col).map_err(|_| EngineError::InvalidSquare(s.to_string()))
    }
}

/// A piece relocation, as reported back to the front-ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub fn new(from: Position, to: Position) -> Self {
        Move { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// The validator's verdict on a proposed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Invalid,
    SimpleMove,
    /// Jumps over the piece standing on the given square.
    CaptureMove(Position),
}

impl MoveOutcome {
    pub fn is_legal(self) -> bool {
        self != MoveOutcome::Invalid
    }

    pub fn captured(self) -> Option<Position> {
        match self {
            MoveOutcome::CaptureMove(pos) => Some(pos),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_notation() {
        let pos: Position = "c3".parse().unwrap();
        assert_eq!(pos, Position::new(2, 2));
        assert_eq!(pos.to_string(), "c3");
        assert_eq!("H8".parse::<Position>().unwrap(), Position::new(7, 7));
        assert!("i1".parse::<Position>().is_err());
        assert!("a9".parse::<Position>().is_err());
        assert!("a".parse::<Position>().is_err());
    }

    #[test]
    fn test_try_new_rejects_off_board() {
        assert!(Position::try_new(7, 7).is_ok());
        assert!(matches!(
            Position::try_new(8, 0),
            Err(EngineError::OutOfRangePosition { row: 8, col: 0 })
        ));
    }

    #[test]
    #[should_panic]
    fn test_new_panics_off_board() {
        Position::new(0, 8);
    }

    #[test]
    fn test_offset_and_midpoint() {
        let pos = Position::new(0, 1);
        assert_eq!(pos.offset(1, 1), Some(Position::new(1, 2)));
        assert_eq!(pos.offset(-1, 1), None);
        assert_eq!(pos.offset(1, -2), None);
        assert_eq!(Position::new(4, 3).midpoint(Position::new(6, 5)), Position::new(5, 4));
        assert!(pos.is_playable());
        assert!(!Position::new(0, 0).is_playable());
    }
}
