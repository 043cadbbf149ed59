//! The textual user interface for the checkers engine.

use crate::config::Config;
use crate::constants::{Cell, Color, BOARD_SIZE};
use crate::game::{Activation, Game, Phase};
use crate::r#move::Position;
use crossterm::style::Stylize;
use std::io::{self, BufRead, Write};
use tracing::warn;

/// Runs the main game loop for the text-based UI.
pub fn run(config: Config) -> io::Result<()> {
    let mut game = Game::new(config);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("--- Checkers in Rust ---");
    println!("Enter a square to select a piece, then its destination (e.g. c3, d4).");
    println!("Type 'reset' for a new game or 'exit' to quit.");

    loop {
        println!();
        print!("{}", render_board(&game));
        println!("{}", status_line(&game));
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let input = line?;
        let input = input.trim();

        match input {
            "" => continue,
            "exit" | "quit" => break,
            "reset" => {
                game.reset();
                continue;
            }
            _ => {}
        }

        let square = match input.parse::<Position>() {
            Ok(square) => square,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        match game.on_activate(square) {
            Ok(report) => describe(&report),
            Err(err) => {
                warn!(%err, "game aborted");
                println!("The game can't continue ({err}). Type 'reset' to start over.");
            }
        }
    }

    Ok(())
}

fn describe(report: &Activation) {
    if let Some(mv) = report.moved {
        match report.captured {
            Some(captured) => {
                println!("{} moves {} capturing {}", report_mover(report), mv, captured)
            }
            None => println!("{} moves {}", report_mover(report), mv),
        }
    }
    if report.promoted {
        println!("Crowned!");
    }
    if report.phase == Phase::ContinuationRequired {
        println!("Another capture is available: jump again or pick any other square to stop.");
    }
    if let Some(winner) = report.winner {
        println!("{}", format!("{winner} wins!").bold());
    }
}

// The side that just moved: the turn flips only after a completed move.
fn report_mover(report: &Activation) -> Color {
    if report.turn_switched {
        report.turn.opponent()
    } else {
        report.turn
    }
}

fn status_line(game: &Game) -> String {
    match (game.phase(), game.winner()) {
        (Phase::GameOver, Some(winner)) => format!("{winner} wins! Type 'reset' to play again."),
        (Phase::GameOver, None) => "Game aborted. Type 'reset' to play again.".to_string(),
        (Phase::Idle, _) => format!("{} to move", game.turn()),
        (_, _) => match game.selection() {
            Some(square) => format!("{} to move, {} selected", game.turn(), square),
            None => format!("{} to move", game.turn()),
        },
    }
}

/// Draws the board with row 8 on top, colouring pieces and the selection.
pub fn render_board(game: &Game) -> String {
    let board = game.board();
    let mut out = String::new();
    out.push_str("  +-----------------+\n");
    for row in (0..BOARD_SIZE).rev() {
        out.push_str(&format!("{} | ", row + 1));
        for col in 0..BOARD_SIZE {
            let pos = Position::new(row, col);
            let glyph = board.get(pos).to_layout_char();
            let styled = match board.get(pos) {
                Cell::Occupied(piece) if piece.color == Color::Black => glyph.dark_red(),
                Cell::Occupied(_) => glyph.white(),
                Cell::Empty => glyph.dark_grey(),
            };
            let styled = if game.selection() == Some(pos) {
                styled.on_dark_green()
            } else {
                styled
            };
            out.push_str(&format!("{styled} "));
        }
        out.push_str("|\n");
    }
    out.push_str("  +-----------------+\n");
    out.push_str("    a b c d e f g h\n");
    out
}
