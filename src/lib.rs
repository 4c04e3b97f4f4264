//! Grid snake: a tick-driven game engine with a terminal front end.
//!
//! The core ([`engine`], [`game`]) never touches the terminal. It receives
//! [`input::Command`]s and reports [`display::DisplayEvent`]s, which the
//! ratatui front end mirrors into its own model before drawing.

pub mod board;
pub mod config;
pub mod display;
pub mod engine;
pub mod food;
pub mod game;
pub mod input;
pub mod renderer;
pub mod scheduler;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
pub mod walls;
