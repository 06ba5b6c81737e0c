//! Round clock shared between the tick source and the game loop
//!
//! The tick source calls [`RoundClock::on_tick`] at a fixed rate. Every tick
//! raises the refresh flag; every `ticks_per_second` ticks the seconds
//! counter drops by one, saturating at zero. The game loop reloads the
//! counter on each phase entry.

use super::flag::Flag;
use portable_atomic::{AtomicU16, AtomicU8, Ordering};

/// Seconds remaining in the current phase
#[derive(Debug)]
pub struct RoundClock {
    seconds: AtomicU16,
    ticks: AtomicU8,
    ticks_per_second: AtomicU8,
    refresh: Flag,
}

impl RoundClock {
    /// Create a clock at zero seconds
    pub const fn new(ticks_per_second: u8) -> Self {
        Self {
            seconds: AtomicU16::new(0),
            ticks: AtomicU8::new(0),
            ticks_per_second: AtomicU8::new(ticks_per_second),
            refresh: Flag::new(),
        }
    }

    /// Change the tick rate (startup only, before the tick source runs)
    pub fn set_ticks_per_second(&self, ticks_per_second: u8) {
        self.ticks_per_second
            .store(ticks_per_second.max(1), Ordering::Relaxed);
        self.ticks.store(0, Ordering::Relaxed);
    }

    /// Tick source entry point
    ///
    /// Returns true when this tick completed a second.
    pub fn on_tick(&self) -> bool {
        self.refresh.raise();

        let per_second = self.ticks_per_second.load(Ordering::Relaxed).max(1);
        let ticks = self.ticks.load(Ordering::Relaxed) + 1;
        if ticks < per_second {
            self.ticks.store(ticks, Ordering::Relaxed);
            return false;
        }

        self.ticks.store(0, Ordering::Relaxed);
        // Saturate: a result screen may sit at zero indefinitely
        let _ = self
            .seconds
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |s| s.checked_sub(1));
        true
    }

    /// Set the seconds remaining (game loop, on phase entry)
    pub fn reload(&self, seconds: u16) {
        self.seconds.store(seconds, Ordering::Release);
    }

    /// Seconds remaining
    pub fn remaining(&self) -> u16 {
        self.seconds.load(Ordering::Acquire)
    }

    /// Consume the update-due flag
    pub fn take_refresh(&self) -> bool {
        self.refresh.take()
    }
}
