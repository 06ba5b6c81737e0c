//! One-shot completion flag

use portable_atomic::{AtomicBool, Ordering};

/// Flag raised by a producer and cleared only by its consumer
#[derive(Debug)]
pub struct Flag(AtomicBool);

impl Flag {
    /// Create a lowered flag
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Raise the flag (producer side)
    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Lower the flag and report whether it was raised (consumer side)
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }

    /// Check the flag without consuming it
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl Default for Flag {
    fn default() -> Self {
        Self::new()
    }
}
