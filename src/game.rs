//! The turn and selection state machine driving a game.

use crate::board::Board;
use crate::config::Config;
use crate::constants::Color;
use crate::error::{EngineError, EngineResult};
use crate::evaluate::check_winner;
use crate::move_gen;
use crate::r#move::{Move, MoveOutcome, Position};
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the side to move to pick a piece.
    Idle,
    /// A piece is picked and the next activation names its destination.
    Selected,
    /// The selected piece just captured and can capture again.
    ContinuationRequired,
    /// Someone won, or the game was aborted. Input is ignored until reset.
    GameOver,
}

/// Everything a front-end needs to know after one square activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activation {
    pub phase: Phase,
    pub turn: Color,
    pub selection: Option<Position>,
    pub moved: Option<Move>,
    pub captured: Option<Position>,
    pub promoted: bool,
    pub turn_switched: bool,
    pub winner: Option<Color>,
}

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    config: Config,
    turn: Color,
    selection: Option<Position>,
    phase: Phase,
    winner: Option<Color>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Game {
    /// A fresh game from the starting layout with Black to move.
    pub fn new(config: Config) -> Self {
        Self::with_board(Board::reset(), Color::Black, config)
    }

    /// A game starting from an arbitrary position.
    pub fn with_board(board: Board, turn: Color, config: Config) -> Self {
        let winner = check_winner(&board);
        Game {
            board,
            config,
            turn,
            selection: None,
            phase: if winner.is_some() { Phase::GameOver } else { Phase::Idle },
            winner,
        }
    }

    pub fn reset(&mut self) {
        *self = Game::new(self.config);
        info!("new game started");
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn selection(&self) -> Option<Position> {
        self.selection
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    /// Destinations the selected piece may move to right now.
    pub fn selection_targets(&self) -> Vec<Position> {
        let Some(from) = self.selection else {
            return Vec::new();
        };
        let targets = move_gen::legal_targets(&self.board, from, self.turn, &self.config);
        if self.phase == Phase::ContinuationRequired {
            targets
                .into_iter()
                .filter(|&to| {
                    let outcome =
                        move_gen::validate(&self.board, from, self.turn, to, &self.config);
                    matches!(outcome, MoveOutcome::CaptureMove(_))
                })
                .collect()
        } else {
            targets
        }
    }

    /// Handles one click or keyboard pick of a square.
    ///
    /// Illegal input never fails: it leaves the board alone and clears the
    /// selection. An error means the game state was inconsistent; the game is
    /// then over and must be reset.
    pub fn on_activate(&mut self, pos: Position) -> EngineResult<Activation> {
        debug!(square = %pos, turn = %self.turn, "square activated");
        let mut report = Activation {
            phase: self.phase,
            turn: self.turn,
            selection: self.selection,
            moved: None,
            captured: None,
            promoted: false,
            turn_switched: false,
            winner: self.winner,
        };

        match self.phase {
            Phase::GameOver => {
                debug!("game is over, ignoring activation");
            }
            Phase::Idle => {
                if self.board.get(pos).holds(self.turn) {
                    self.selection = Some(pos);
                    self.phase = Phase::Selected;
                    debug!(square = %pos, "piece selected");
                }
            }
            Phase::Selected | Phase::ContinuationRequired => {
                if let Err(err) = self.handle_destination(pos, &mut report) {
                    error!(%err, "aborting game");
                    self.selection = None;
                    self.phase = Phase::GameOver;
                    return Err(err);
                }
            }
        }

        report.phase = self.phase;
        report.turn = self.turn;
        report.selection = self.selection;
        report.winner = self.winner;
        Ok(report)
    }

    fn handle_destination(&mut self, to: Position, report: &mut Activation) -> EngineResult<()> {
        let from = self.selection.ok_or_else(|| {
            EngineError::InternalConsistency(format!(
                "{:?} phase without a selected piece",
                self.phase
            ))
        })?;
        let continuing = self.phase == Phase::ContinuationRequired;

        if to == from {
            debug!(square = %from, "piece deselected");
            self.release(continuing, report);
            return Ok(());
        }

        let outcome = move_gen::validate(&self.board, from, self.turn, to, &self.config);
        let accepted = match outcome {
            MoveOutcome::Invalid => false,
            MoveOutcome::SimpleMove => !continuing,
            MoveOutcome::CaptureMove(_) => true,
        };
        if !accepted {
            info!(from = %from, to = %to, "invalid move");
            self.release(continuing, report);
            return Ok(());
        }

        let execution = self.board.execute(from, to, outcome)?;
        report.moved = Some(Move::new(from, to));
        report.captured = execution.captured;
        report.promoted = execution.promoted;
        info!(color = %self.turn, from = %from, to = %to, "piece moved");

        if execution.captured.is_some()
            && self.config.chain_captures
            && move_gen::has_capture(&self.board, to, self.turn, &self.config)
        {
            self.selection = Some(to);
            self.phase = Phase::ContinuationRequired;
            debug!(square = %to, "further capture available");
            return Ok(());
        }

        self.selection = None;
        self.finish_turn(report);
        Ok(())
    }

    /// Drops the selection. Declining a continuation ends the turn.
    fn release(&mut self, continuing: bool, report: &mut Activation) {
        self.selection = None;
        if continuing {
            self.finish_turn(report);
        } else {
            self.phase = Phase::Idle;
        }
    }

    fn finish_turn(&mut self, report: &mut Activation) {
        if let Some(winner) = check_winner(&self.board) {
            self.winner = Some(winner);
            self.phase = Phase::GameOver;
            info!(%winner, "{winner} wins!");
            return;
        }
        self.turn = self.turn.opponent();
        self.phase = Phase::Idle;
        report.turn_switched = true;
        debug!(turn = %self.turn, "turn switched");
    }
}
