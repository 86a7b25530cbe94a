//! Grid Snake: the authoritative simulation core plus a thin terminal frontend.
//!
//! The core is [`game::Game`], which owns a [`game::GameState`] and a
//! [`direction_queue::DirectionQueue`]. Input handlers only enqueue directions;
//! the scheduler calls [`game::Game::step`] once per tick.

pub mod config;
pub mod direction_queue;
pub mod engine;
pub mod food;
pub mod game;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
