//! Game logic
//!
//! The round controller, drop-height scoring, and joystick mapping.

pub mod controller;
pub mod joystick;
pub mod scoring;

pub use controller::{GameController, LoopInput, Step, Transition};
pub use joystick::axis_command;
pub use scoring::{drop_bonus, elapsed_ticks, score_round, ScoreResult};
