//! Turtle commands and their emission from path data

pub mod command;
pub mod config;
pub mod emitter;

pub use command::{replay, CursorState, Turtle, TurtleCommand};
pub use config::{EmitConfig, Sampling};
pub use emitter::{emit, Emitter};
