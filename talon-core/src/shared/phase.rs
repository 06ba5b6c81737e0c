//! Game phase published by the loop for interrupt-side readers

use crate::state::GameState;
use portable_atomic::{AtomicU32, Ordering};

/// Current state plus the number of the round it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Phase {
    pub state: GameState,
    /// Incremented each time play starts
    pub round: u16,
}

impl Phase {
    /// Phase before the first round
    pub const fn initial() -> Self {
        Self {
            state: GameState::Resetting,
            round: 0,
        }
    }

    const fn pack(self) -> u32 {
        ((self.round as u32) << 8) | self.state.as_u8() as u32
    }

    const fn unpack(raw: u32) -> Self {
        Self {
            state: GameState::from_u8((raw & 0xFF) as u8),
            round: (raw >> 8) as u16,
        }
    }
}

/// Lock-free cell holding a [`Phase`]
///
/// State and round are packed into one word so readers never observe a
/// state from one round paired with the number of another.
#[derive(Debug)]
pub struct PhaseCell(AtomicU32);

impl PhaseCell {
    pub const fn new() -> Self {
        Self(AtomicU32::new(Phase::initial().pack()))
    }

    /// Publish a new phase (game loop only)
    pub fn publish(&self, phase: Phase) {
        self.0.store(phase.pack(), Ordering::Release);
    }

    /// Read the current phase
    pub fn load(&self) -> Phase {
        Phase::unpack(self.0.load(Ordering::Acquire))
    }
}

impl Default for PhaseCell {
    fn default() -> Self {
        Self::new()
    }
}
