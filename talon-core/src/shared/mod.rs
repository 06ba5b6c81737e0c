//! State shared between the game loop and interrupt-side producers
//!
//! Every cell has exactly one writer per field. Producers only raise flags or
//! copy small values; completion flags are cleared only by their consumer.
//! Cells are `const`-constructible so the firmware can place them in statics.

pub mod button;
pub mod flag;
pub mod phase;
pub mod round_clock;
pub mod sample;

pub use button::{ButtonCapture, EdgeAction, PressRecord};
pub use flag::Flag;
pub use phase::{Phase, PhaseCell};
pub use round_clock::RoundClock;
pub use sample::{AnalogChannel, AnalogSample, SampleError, SampleHandoff, Ticket, PHOTO_IDLE};
