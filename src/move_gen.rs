//! Move validation, including pre-computed diagonal tables.
//!
//! Everything here reads the board and never writes it, so the controller can
//! look for follow-up captures without side effects.

use crate::board::Board;
use crate::config::Config;
use crate::constants::{Color, NUM_SQUARES};
use crate::r#move::{Move, MoveOutcome, Position};
use once_cell::sync::Lazy;

const DIAGONALS: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Diagonal neighbours of every square, one and two steps away.
pub struct DiagonalTables {
    pub steps: [[Option<Position>; 4]; NUM_SQUARES],
    pub jumps: [[Option<Position>; 4]; NUM_SQUARES],
}

impl DiagonalTables {
    fn new() -> Self {
        let mut tables = DiagonalTables {
            steps: [[None; 4]; NUM_SQUARES],
            jumps: [[None; 4]; NUM_SQUARES],
        };

        for sq in 0..NUM_SQUARES {
            let pos = Position::from_index(sq);
            for (i, (dr, dc)) in DIAGONALS.iter().enumerate() {
                tables.steps[sq][i] = pos.offset(*dr, *dc);
                tables.jumps[sq][i] = pos.offset(dr * 2, dc * 2);
            }
        }

        tables
    }
}

// Initialised on first use and shared for the lifetime of the process.
pub static DIAGONAL_TABLES: Lazy<DiagonalTables> = Lazy::new(DiagonalTables::new);

/// Decides whether the piece on `from` may move to `to` on `turn`'s move.
///
/// A `from` square that does not hold one of `turn`'s pieces is reported as
/// `Invalid` rather than trusted.
pub fn validate(
    board: &Board,
    from: Position,
    turn: Color,
    to: Position,
    config: &Config,
) -> MoveOutcome {
    let piece = match board.get(from).piece() {
        Some(piece) if piece.color == turn => piece,
        _ => return MoveOutcome::Invalid,
    };
    if !board.is_empty(to) {
        return MoveOutcome::Invalid;
    }

    let row_delta = to.row as isize - from.row as isize;
    let col_delta = (to.col as isize - from.col as isize).abs();

    match (row_delta.abs(), col_delta) {
        (1, 1) => {
            if piece.is_king() || row_delta == turn.forward() {
                MoveOutcome::SimpleMove
            } else {
                MoveOutcome::Invalid
            }
        }
        (2, 2) => {
            let forward = row_delta == 2 * turn.forward();
            if !(piece.is_king() || forward || config.allow_backward_captures) {
                return MoveOutcome::Invalid;
            }
            let mid = from.midpoint(to);
            if board.get(mid).holds(turn.opponent()) {
                MoveOutcome::CaptureMove(mid)
            } else {
                MoveOutcome::Invalid
            }
        }
        _ => MoveOutcome::Invalid,
    }
}

/// All captures available to the piece on `from`, along its four two-step diagonals.
pub fn capture_targets(
    board: &Board,
    from: Position,
    turn: Color,
    config: &Config,
) -> Vec<(Move, Position)> {
    DIAGONAL_TABLES.jumps[from.index()]
        .iter()
        .flatten()
        .filter_map(|&to| match validate(board, from, turn, to, config) {
            MoveOutcome::CaptureMove(mid) => Some((Move::new(from, to), mid)),
            _ => None,
        })
        .collect()
}

pub fn has_capture(board: &Board, from: Position, turn: Color, config: &Config) -> bool {
    !capture_targets(board, from, turn, config).is_empty()
}

/// Every square the piece on `from` may legally move to.
pub fn legal_targets(board: &Board, from: Position, turn: Color, config: &Config) -> Vec<Position> {
    let idx = from.index();
    DIAGONAL_TABLES.steps[idx]
        .iter()
        .chain(DIAGONAL_TABLES.jumps[idx].iter())
        .flatten()
        .copied()
        .filter(|&to| validate(board, from, turn, to, config).is_legal())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{Cell, Piece};

    fn pos(s: &str) -> Position {
        s.parse().unwrap()
    }

    fn place(board: &mut Board, square: &str, piece: Piece) {
        board.set(pos(square), Cell::Occupied(piece));
    }

    #[test]
    fn test_simple_moves_from_start() {
        let board = Board::reset();
        let config = Config::classic();
        let from = Position::new(2, 3);

        assert_eq!(
            validate(&board, from, Color::Black, Position::new(3, 4), &config),
            MoveOutcome::SimpleMove
        );
        assert_eq!(
            validate(&board, from, Color::Black, Position::new(3, 2), &config),
            MoveOutcome::SimpleMove
        );
        assert_eq!(
            validate(&board, from, Color::Black, Position::new(4, 4), &config),
            MoveOutcome::Invalid
        );
        assert_eq!(
            validate(&board, from, Color::Black, Position::new(4, 5), &config),
            MoveOutcome::Invalid
        );
    }

    #[test]
    fn test_occupied_destination() {
        let mut board = Board::empty();
        place(&mut board, "d3", Piece::man(Color::Black));
        place(&mut board, "e4", Piece::man(Color::Black));
        let config = Config::default();

        assert_eq!(
            validate(&board, pos("d3"), Color::Black, pos("e4"), &config),
            MoveOutcome::Invalid
        );
        assert_eq!(
            validate(&board, pos("d3"), Color::Black, pos("d3"), &config),
            MoveOutcome::Invalid
        );
    }

    #[test]
    fn test_capture() {
        let mut board = Board::empty();
        place(&mut board, "d5", Piece::man(Color::Black));
        place(&mut board, "e6", Piece::man(Color::White));

        let outcome = validate(&board, pos("d5"), Color::Black, pos("f7"), &Config::classic());
        assert_eq!(outcome, MoveOutcome::CaptureMove(pos("e6")));
    }

    #[test]
    fn test_no_capture_over_own_piece_or_empty() {
        let mut board = Board::empty();
        place(&mut board, "d5", Piece::man(Color::Black));
        place(&mut board, "e6", Piece::man(Color::Black));
        let config = Config::default();

        assert_eq!(
            validate(&board, pos("d5"), Color::Black, pos("f7"), &config),
            MoveOutcome::Invalid
        );
        assert_eq!(
            validate(&board, pos("d5"), Color::Black, pos("b7"), &config),
            MoveOutcome::Invalid
        );
    }

    #[test]
    fn test_man_never_moves_backward() {
        let mut board = Board::empty();
        place(&mut board, "d5", Piece::man(Color::Black));
        place(&mut board, "e4", Piece::man(Color::White));

        for config in [Config::classic(), Config::chained()] {
            assert_eq!(
                validate(&board, pos("d5"), Color::Black, pos("c4"), &config),
                MoveOutcome::Invalid
            );
            assert_eq!(
                validate(&board, pos("e4"), Color::White, pos("d5"), &config),
                MoveOutcome::Invalid
            );
            assert_eq!(
                validate(&board, pos("e4"), Color::White, pos("f5"), &config),
                MoveOutcome::Invalid
            );
        }
        assert_eq!(
            validate(&board, pos("e4"), Color::White, pos("f3"), &Config::classic()),
            MoveOutcome::SimpleMove
        );
    }

    #[test]
    fn test_backward_capture_depends_on_config() {
        let mut board = Board::empty();
        place(&mut board, "d5", Piece::man(Color::Black));
        place(&mut board, "c4", Piece::man(Color::White));

        assert_eq!(
            validate(&board, pos("d5"), Color::Black, pos("b3"), &Config::classic()),
            MoveOutcome::Invalid
        );
        assert_eq!(
            validate(&board, pos("d5"), Color::Black, pos("b3"), &Config::chained()),
            MoveOutcome::CaptureMove(pos("c4"))
        );
    }

    #[test]
    fn test_king_moves_all_directions() {
        let mut board = Board::empty();
        place(&mut board, "d5", Piece::king(Color::White));
        place(&mut board, "e6", Piece::man(Color::Black));
        let config = Config::classic();

        let mut targets = legal_targets(&board, pos("d5"), Color::White, &config);
        targets.sort_by_key(|p| p.index());
        let mut expected = vec![pos("c4"), pos("e4"), pos("c6"), pos("f7")];
        expected.sort_by_key(|p| p.index());
        assert_eq!(targets, expected);
        assert_eq!(
            validate(&board, pos("d5"), Color::White, pos("f7"), &config),
            MoveOutcome::CaptureMove(pos("e6"))
        );
        assert_eq!(
            validate(&board, pos("d5"), Color::White, pos("b3"), &config),
            MoveOutcome::Invalid
        );
        assert_eq!(
            validate(&board, pos("d5"), Color::White, pos("a2"), &config),
            MoveOutcome::Invalid
        );
    }

    #[test]
    fn test_wrong_turn_is_invalid() {
        let board = Board::reset();
        let from = Position::new(2, 3);
        let to = Position::new(3, 4);
        let outcome = validate(&board, from, Color::White, to, &Config::default());
        assert_eq!(outcome, MoveOutcome::Invalid);
    }

    #[test]
    fn test_validate_is_idempotent() {
        let mut board = Board::empty();
        place(&mut board, "d5", Piece::man(Color::Black));
        place(&mut board, "e6", Piece::man(Color::White));
        let snapshot = board.clone();
        let config = Config::classic();

        let first = validate(&board, pos("d5"), Color::Black, pos("f7"), &config);
        let second = validate(&board, pos("d5"), Color::Black, pos("f7"), &config);
        assert_eq!(first, second);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_capture_targets() {
        let mut board = Board::empty();
        place(&mut board, "d5", Piece::man(Color::Black));
        place(&mut board, "e6", Piece::man(Color::White));
        place(&mut board, "c6", Piece::man(Color::White));
        place(&mut board, "c4", Piece::man(Color::White));

        let classic = capture_targets(&board, pos("d5"), Color::Black, &Config::classic());
        assert_eq!(classic.len(), 2);
        assert!(classic.iter().all(|(mv, _)| mv.to.row == 6));

        let chained = capture_targets(&board, pos("d5"), Color::Black, &Config::chained());
        assert_eq!(chained.len(), 3);
        assert!(chained.contains(&(Move::new(pos("d5"), pos("b3")), pos("c4"))));
        assert!(has_capture(&board, pos("d5"), Color::Black, &Config::classic()));
        let start = Board::reset();
        assert!(!has_capture(&start, Position::new(2, 3), Color::Black, &Config::chained()));
    }

    #[test]
    fn test_diagonal_tables_edges() {
        let corner = Position::new(0, 1).index();
        assert_eq!(DIAGONAL_TABLES.steps[corner].iter().flatten().count(), 2);
        assert_eq!(DIAGONAL_TABLES.jumps[corner].iter().flatten().count(), 1);
    }
}
