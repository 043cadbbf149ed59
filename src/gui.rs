//! The GUI for the checkers engine, built with Iced.

use iced::widget::{canvas, text, Button, Column, Container, Row, TextInput};
use iced::{
    executor, Application, Command, Element, Length, Padding, Pixels, Point, Rectangle, Renderer,
    Settings, Size, Subscription, Theme,
};
use iced::widget::canvas::{Program, Geometry, Frame, Stroke, Event as CanvasEvent};
use iced::mouse::{Cursor, Event as MouseEvent};
use iced::widget::canvas::event::Status;
use tracing::{info, warn};

use crate::board::Board;
use crate::config::Config;
use crate::constants::{Cell, Color, BOARD_SIZE};
use crate::error::{EngineError, EngineResult};
use crate::game::{Game, Phase};
use crate::r#move::{Move, Position};

const BOARD_PIXELS: f32 = 480.0;
const SQUARE_SIZE: f32 = BOARD_PIXELS / BOARD_SIZE as f32;

pub fn run(config: Config) -> iced::Result {
    CheckersApp::run(Settings {
        window: iced::window::Settings {
            size: Size::new(640.0, 720.0),
            ..iced::window::Settings::default()
        },
        ..Settings::with_flags(config)
    })
}

#[derive(Debug, Clone)]
enum Message {
    NewGame,
    SquareClicked(Position),
    LayoutInputChanged(String),
    LoadLayout,
}

struct CheckersApp {
    game: Game,
    last_move: Option<Move>,
    layout_input: String,
    notice: Option<String>,
}

impl Application for CheckersApp {
    type Executor = executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = Config;

    fn new(config: Config) -> (Self, Command<Message>) {
        let game = Game::new(config);
        let app = CheckersApp {
            layout_input: layout_text(&game),
            game,
            last_move: None,
            notice: None,
        };
        (app, Command::none())
    }

    fn title(&self) -> String {
        String::from("Checkers")
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::SquareClicked(square) => {
                match self.game.on_activate(square) {
                    Ok(report) => {
                        if report.moved.is_some() {
                            self.last_move = report.moved;
                            self.layout_input = layout_text(&self.game);
                        }
                        self.notice = None;
                    }
                    Err(err) => {
                        warn!(%err, "game aborted");
                        self.notice = Some(format!("Game aborted: {err}"));
                    }
                }
            }
            Message::NewGame => {
                self.game.reset();
                self.last_move = None;
                self.layout_input = layout_text(&self.game);
                self.notice = None;
            }
            Message::LayoutInputChanged(layout) => {
                self.layout_input = layout;
            }
            Message::LoadLayout => match parse_layout_input(&self.layout_input) {
                Ok((board, turn)) => {
                    info!(%turn, "layout loaded");
                    self.game = Game::with_board(board, turn, *self.game.config());
                    self.last_move = None;
                    self.notice = None;
                }
                Err(err) => {
                    self.notice = Some(err.to_string());
                }
            },
        }
        Command::none()
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::none()
    }

    fn view(&'_ self) -> Element<'_, Message> {
        let status_text = match (self.game.phase(), self.game.winner()) {
            (Phase::GameOver, Some(winner)) => format!("{winner} wins!"),
            (Phase::GameOver, None) => "Game over".to_string(),
            (Phase::ContinuationRequired, _) => format!("{} can capture again", self.game.turn()),
            _ => format!("{} to move", self.game.turn()),
        };

        let canvas = canvas(BoardCanvas::new(&self.game, self.last_move))
            .width(Length::Fixed(BOARD_PIXELS))
            .height(Length::Fixed(BOARD_PIXELS));

        let controls = Row::new()
            .spacing(10)
            .push(Button::new(text("New Game")).on_press(Message::NewGame));

        let layout_controls = Row::new()
            .spacing(10)
            .padding(Padding { top: 0.0, right: 60.0, bottom: 0.0, left: 60.0 })
            .align_items(iced::Alignment::Center)
            .push(
                TextInput::new("Board layout...", &self.layout_input)
                    .on_input(Message::LayoutInputChanged)
                    .width(Length::Fill),
            )
            .push(Button::new(text("Load Layout")).on_press(Message::LoadLayout));

        let mut content = Column::new()
            .spacing(20)
            .align_items(iced::Alignment::Center)
            .push(text(status_text).size(Pixels(24.0)))
            .push(canvas)
            .push(controls)
            .push(layout_controls);

        if let Some(notice) = &self.notice {
            content = content.push(text(notice));
        }

        Container::new(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x()
            .center_y()
            .into()
    }
}

/// The board layout followed by the side to move, e.g. `".b.b.b.b/.../8 w"`.
fn layout_text(game: &Game) -> String {
    let side = match game.turn() {
        Color::Black => 'b',
        Color::White => 'w',
    };
    format!("{} {side}", game.board().to_layout())
}

// A bare layout leaves Black to move.
fn parse_layout_input(input: &str) -> EngineResult<(Board, Color)> {
    let mut fields = input.split_whitespace();
    let board = Board::from_layout(fields.next().unwrap_or(""))?;
    let turn = match fields.next() {
        None | Some("b") => Color::Black,
        Some("w") => Color::White,
        Some(other) => {
            return Err(EngineError::InvalidLayout(format!("unknown side to move {other:?}")))
        }
    };
    if let Some(extra) = fields.next() {
        return Err(EngineError::InvalidLayout(format!("unexpected trailing {extra:?}")));
    }
    Ok((board, turn))
}

struct BoardCanvas<'a> {
    game: &'a Game,
    targets: Vec<Position>,
    last_move: Option<Move>,
}

impl<'a> BoardCanvas<'a> {
    fn new(game: &'a Game, last_move: Option<Move>) -> Self {
        Self { game, targets: game.selection_targets(), last_move }
    }
}

/// Top-left corner of a square on screen. Row 8 is drawn at the top.
fn square_origin(pos: Position) -> Point {
    let screen_row = BOARD_SIZE - 1 - pos.row;
    Point::new(pos.col as f32 * SQUARE_SIZE, screen_row as f32 * SQUARE_SIZE)
}

fn square_center(pos: Position) -> Point {
    let origin = square_origin(pos);
    Point::new(origin.x + SQUARE_SIZE / 2.0, origin.y + SQUARE_SIZE / 2.0)
}

impl<'a> Program<Message> for BoardCanvas<'a> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<Geometry> {
        let board = self.game.board();
        let mut frame = Frame::new(renderer, bounds.size());
        let square = Size::new(SQUARE_SIZE, SQUARE_SIZE);

        // Draw squares
        for idx in 0..BOARD_SIZE * BOARD_SIZE {
            let pos = Position::from_index(idx);
            let color = if pos.is_playable() {
                iced::Color::from_rgb8(181, 101, 29)
            } else {
                iced::Color::from_rgb8(240, 217, 181)
            };
            frame.fill(&canvas::Path::rectangle(square_origin(pos), square), color);
        }

        // Highlight last move
        if let Some(mv) = self.last_move {
            let from_path = canvas::Path::rectangle(square_origin(mv.from), square);
            frame.fill(&from_path, iced::Color::from_rgba(1.0, 1.0, 0.0, 0.3));
            let to_path = canvas::Path::rectangle(square_origin(mv.to), square);
            frame.fill(&to_path, iced::Color::from_rgba(0.0, 1.0, 0.0, 0.3));
        }

        // Draw pieces
        for idx in 0..BOARD_SIZE * BOARD_SIZE {
            let pos = Position::from_index(idx);
            let Cell::Occupied(piece) = board.get(pos) else {
                continue;
            };
            let center = square_center(pos);
            let (fill, rim) = match piece.color {
                Color::Black => {
                    (iced::Color::from_rgb8(30, 30, 30), iced::Color::from_rgb8(200, 200, 200))
                }
                Color::White => {
                    (iced::Color::from_rgb8(245, 245, 240), iced::Color::from_rgb8(0, 0, 0))
                }
            };

            let shadow_offset = 3.0;
            let shadow_center = Point::new(center.x + shadow_offset, center.y + shadow_offset);
            let shadow_circle = canvas::Path::circle(shadow_center, SQUARE_SIZE * 0.4);
            frame.fill(&shadow_circle, iced::Color::from_rgba8(0, 0, 0, 0.4));

            let circle = canvas::Path::circle(center, SQUARE_SIZE * 0.4);
            frame.fill(&circle, fill);
            frame.stroke(&circle, Stroke::default().with_width(2.0).with_color(rim));

            if piece.is_king() {
                let crown = canvas::Text {
                    content: "K".to_string(),
                    position: center,
                    color: iced::Color::from_rgb8(212, 175, 55),
                    size: Pixels(SQUARE_SIZE * 0.45),
                    horizontal_alignment: iced::alignment::Horizontal::Center,
                    vertical_alignment: iced::alignment::Vertical::Center,
                    ..canvas::Text::default()
                };
                frame.fill_text(crown);
            }
        }

        // Mark squares the selected piece can reach
        for &target in &self.targets {
            let dot = canvas::Path::circle(square_center(target), SQUARE_SIZE * 0.12);
            frame.fill(&dot, iced::Color::from_rgba(0.0, 0.8, 0.0, 0.7));
        }

        // Highlight selected square
        if let Some(selected) = self.game.selection() {
            let path = canvas::Path::rectangle(square_origin(selected), square);
            let highlight = iced::Color::from_rgb(0.0, 1.0, 0.0);
            frame.stroke(&path, Stroke::default().with_width(3.0).with_color(highlight));
        }

        vec![frame.into_geometry()]
    }

    fn update(
        &self,
        _state: &mut Self::State,
        event: CanvasEvent,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (Status, Option<Message>) {
        if let CanvasEvent::Mouse(MouseEvent::ButtonPressed(iced::mouse::Button::Left)) = event {
            if let Some(point) = cursor.position_in(bounds) {
                let col = (point.x / SQUARE_SIZE).floor() as usize;
                let screen_row = (point.y / SQUARE_SIZE).floor() as usize;
                if screen_row < BOARD_SIZE {
                    if let Ok(pos) = Position::try_new(BOARD_SIZE - 1 - screen_row, col) {
                        return (Status::Captured, Some(Message::SquareClicked(pos)));
                    }
                }
            }
        }
        (Status::Ignored, None)
    }
}
