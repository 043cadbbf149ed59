pub mod board;
pub mod config;
pub mod constants;
pub mod error;
pub mod evaluate;
pub mod game;
pub mod gui;
pub mod move_gen;
pub mod r#move;
pub mod tui;
