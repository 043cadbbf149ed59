//! Decides whether a game has been won.

use crate::board::Board;
use crate::constants::Color;

/// Returns the winner once one side has no pieces left.
///
/// A side with pieces but no legal move is not detected as lost.
pub fn check_winner(board: &Board) -> Option<Color> {
    if board.count_pieces(Color::Black) == 0 {
        Some(Color::White)
    } else if board.count_pieces(Color::White) == 0 {
        Some(Color::Black)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{Cell, Piece};
    use crate::r#move::Position;

    #[test]
    fn test_no_winner_at_start() {
        assert_eq!(check_winner(&Board::reset()), None);
    }

    #[test]
    fn test_black_wins_without_white_pieces() {
        let mut board = Board::empty();
        board.set(Position::new(3, 4), Cell::Occupied(Piece::man(Color::Black)));
        assert_eq!(check_winner(&board), Some(Color::Black));
    }

    #[test]
    fn test_white_wins_without_black_pieces() {
        let mut board = Board::empty();
        board.set(Position::new(6, 1), Cell::Occupied(Piece::king(Color::White)));
        assert_eq!(check_winner(&board), Some(Color::White));
    }
}
