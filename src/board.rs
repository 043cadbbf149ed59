//! The board representation and the move executor.

use crate::constants::{Cell, Color, Piece, Rank, BOARD_SIZE, NUM_SQUARES};
use crate::error::{EngineError, EngineResult};
use crate::r#move::{MoveOutcome, Position};
use std::fmt;
use tracing::{debug, info};

/// Layout string of a fresh game, row 0 first.
pub const INITIAL_LAYOUT: &str = ".b.b.b.b/b.b.b.b./.b.b.b.b/8/8/w.w.w.w./.w.w.w.w/w.w.w.w.";

/// What the executor did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Execution {
    pub promoted: bool,
    pub captured: Option<Position>,
}

/// The 8x8 checkers board. Cells are stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; NUM_SQUARES],
}

impl Default for Board {
    fn default() -> Self {
        Self::reset()
    }
}

impl Board {
    /// A board with no pieces on it.
    pub fn empty() -> Self {
        Board { cells: [Cell::Empty; NUM_SQUARES] }
    }

    /// The canonical starting layout.
    pub fn reset() -> Self {
        let mut board = Board::empty();
        for row in 0..BOARD_SIZE {
            let color = match row {
                0..=2 => Color::Black,
                5..=7 => Color::White,
                _ => continue,
            };
            for col in 0..BOARD_SIZE {
                let pos = Position::new(row, col);
                if pos.is_playable() {
                    board.set(pos, Cell::Occupied(Piece::man(color)));
                }
            }
        }
        board
    }

    /// Parses a layout of eight `/`-separated rows. Digits compress runs of empty cells.
    pub fn from_layout(layout: &str) -> EngineResult<Self> {
        let mut board = Board::empty();
        let rows: Vec<&str> = layout.trim().split('/').collect();
        if rows.len() != BOARD_SIZE {
            return Err(EngineError::InvalidLayout(format!(
                "expected {} rows, found {}",
                BOARD_SIZE,
                rows.len()
            )));
        }

        for (row, text) in rows.iter().enumerate() {
            let mut col = 0;
            for ch in text.chars() {
                if let Some(run) = ch.to_digit(10) {
                    col += run as usize;
                    continue;
                }
                if col >= BOARD_SIZE {
                    return Err(EngineError::InvalidLayout(format!("row {row} is too long")));
                }
                let pos = Position::new(row, col);
                match ch {
                    '.' => {}
                    _ => {
                        let piece = Piece::from_layout_char(ch).ok_or_else(|| {
                            EngineError::InvalidLayout(format!("unknown piece {ch:?} in row {row}"))
                        })?;
                        if !pos.is_playable() {
                            return Err(EngineError::NonPlayableSquare { row, col });
                        }
                        board.set(pos, Cell::Occupied(piece));
                    }
                }
                col += 1;
            }
            if col != BOARD_SIZE {
                return Err(EngineError::InvalidLayout(format!(
                    "row {row} has {col} cells, expected {BOARD_SIZE}"
                )));
            }
        }
        Ok(board)
    }

    /// Writes the board in the layout format, without run compression.
    pub fn to_layout(&self) -> String {
        let rows: Vec<String> = (0..BOARD_SIZE)
            .map(|row| {
                (0..BOARD_SIZE)
                    .map(|col| self.get(Position::new(row, col)).to_layout_char())
                    .collect()
            })
            .collect();
        rows.join("/")
    }

    #[inline]
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.index()]
    }

    /// Writes a cell. Pieces may only be placed on playable squares.
    #[inline]
    pub fn set(&mut self, pos: Position, cell: Cell) {
        assert!(
            cell.is_empty() || pos.is_playable(),
            "piece placed on non-playable square {pos}"
        );
        self.cells[pos.index()] = cell;
    }

    #[inline]
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_empty()
    }

    pub fn count_pieces(&self, color: Color) -> usize {
        self.cells.iter().filter(|cell| cell.holds(color)).count()
    }

    /// Positions of every piece of the given color, in row-major order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| match cell {
            Cell::Occupied(piece) if piece.color == color => {
                Some((Position::from_index(idx), *piece))
            }
            _ => None,
        })
    }

    /// Applies a validated move. This is the only place the board changes during play.
    ///
    /// The board is left untouched when the move does not fit the current position.
    pub fn execute(
        &mut self,
        from: Position,
        to: Position,
        outcome: MoveOutcome,
    ) -> EngineResult<Execution> {
        let mut piece = self.get(from).piece().ok_or_else(|| {
            EngineError::InternalConsistency(format!("no piece to move on {from}"))
        })?;
        if !to.is_playable() {
            return Err(EngineError::InternalConsistency(format!(
                "destination {to} is not playable"
            )));
        }
        if !self.is_empty(to) {
            return Err(EngineError::InternalConsistency(format!(
                "destination {to} is occupied"
            )));
        }

        let row_delta = to.row.abs_diff(from.row);
        let col_delta = to.col.abs_diff(from.col);
        let fits = match outcome {
            MoveOutcome::Invalid => false,
            MoveOutcome::SimpleMove => row_delta == 1 && col_delta == 1,
            MoveOutcome::CaptureMove(mid) => {
                row_delta == 2 && col_delta == 2 && mid == from.midpoint(to)
            }
        };
        if !fits {
            return Err(EngineError::InternalConsistency(format!(
                "refusing to execute {outcome:?} from {from} to {to}"
            )));
        }

        let captured = outcome.captured();
        if let Some(mid) = captured {
            if !self.get(mid).holds(piece.color.opponent()) {
                return Err(EngineError::InternalConsistency(format!(
                    "no opposing piece to capture on {mid}"
                )));
            }
        }

        self.set(from, Cell::Empty);
        if let Some(mid) = captured {
            self.set(mid, Cell::Empty);
            debug!(square = %mid, "piece captured");
        }

        let promoted = piece.rank == Rank::Man && to.row == piece.color.promotion_row();
        if promoted {
            piece.rank = Rank::King;
            info!(color = %piece.color, square = %to, "piece promoted to king");
        }
        self.set(to, Cell::Occupied(piece));

        Ok(Execution { promoted, captured })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "  +-----------------+")?;
        for row in (0..BOARD_SIZE).rev() {
            write!(f, "{} | ", row + 1)?;
            for col in 0..BOARD_SIZE {
                write!(f, "{} ", self.get(Position::new(row, col)).to_layout_char())?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "  +-----------------+")?;
        writeln!(f, "    a b c d e f g h")
    }
}
