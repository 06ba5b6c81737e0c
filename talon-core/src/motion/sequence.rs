//! Half-step coil sequence for four-phase unipolar steppers

use crate::traits::Direction;

/// Coil patterns for one electrical cycle, bit 3 = coil A ... bit 0 = coil D
pub const HALF_STEP_PATTERNS: [u8; 8] = [
    0b1001, 0b0001, 0b0011, 0b0010, 0b0110, 0b0100, 0b1100, 0b1000,
];

/// Tracks the current position in the half-step sequence
///
/// The phase survives enable/disable so a stopped axis resumes from the
/// coils it is already holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HalfStepSequencer {
    phase: u8,
}

impl HalfStepSequencer {
    /// Create a sequencer at phase 0
    pub const fn new() -> Self {
        Self { phase: 0 }
    }

    /// Current phase index in 0..8
    pub fn phase(&self) -> u8 {
        self.phase
    }

    /// Coil pattern for the current phase
    pub fn pattern(&self) -> u8 {
        HALF_STEP_PATTERNS[self.phase as usize]
    }

    /// Move one half-step and return the new coil pattern
    pub fn advance(&mut self, dir: Direction) -> u8 {
        let len = HALF_STEP_PATTERNS.len() as u8;
        self.phase = match dir {
            Direction::Clockwise => (self.phase + 1) % len,
            Direction::CounterClockwise => (self.phase + len - 1) % len,
        };
        self.pattern()
    }
}
