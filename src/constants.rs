//! Constants and basic piece types used by the checkers engine.

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// Pieces each side starts with (three rows of four).
pub const PIECES_PER_SIDE: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rank {
    Man,
    King,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub rank: Rank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Piece),
}

impl Color {
    /// Get the opponent of this color.
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Row direction a Man of this color moves in.
    pub fn forward(self) -> isize {
        match self {
            Color::Black => 1,
            Color::White => -1,
        }
    }

    /// The row on which a Man of this color is promoted.
    pub fn promotion_row(self) -> usize {
        match self {
            Color::Black => BOARD_SIZE - 1,
            Color::White => 0,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

impl Piece {
    pub const fn man(color: Color) -> Self {
        Piece { color, rank: Rank::Man }
    }

    pub const fn king(color: Color) -> Self {
        Piece { color, rank: Rank::King }
    }

    pub fn is_king(self) -> bool {
        self.rank == Rank::King
    }

    pub fn to_layout_char(self) -> char {
        match (self.color, self.rank) {
            (Color::Black, Rank::Man) => 'b',
            (Color::Black, Rank::King) => 'B',
            (Color::White, Rank::Man) => 'w',
            (Color::White, Rank::King) => 'W',
        }
    }

    pub fn from_layout_char(c: char) -> Option<Piece> {
        match c {
            'b' => Some(Piece::man(Color::Black)),
            'B' => Some(Piece::king(Color::Black)),
            'w' => Some(Piece::man(Color::White)),
            'W' => Some(Piece::king(Color::White)),
            _ => None,
        }
    }
}

impl Cell {
    pub fn piece(self) -> Option<Piece> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(piece) => Some(piece),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Returns true if the cell holds a piece of the given color.
    pub fn holds(self, color: Color) -> bool {
        matches!(self, Cell::Occupied(piece) if piece.color == color)
    }

    pub fn to_layout_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Occupied(piece) => piece.to_layout_char(),
        }
    }
}
