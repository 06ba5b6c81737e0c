//! Analog sample handoff
//!
//! Exactly one conversion may be outstanding. Each request is stamped with a
//! ticket; the sampler publishes the four channels under the ticket it was
//! handed, and writes carrying any other ticket are dropped. The sample
//! becomes ready once every channel has a fresh value for the current
//! ticket. The game loop takes it, which clears both the ready flag and the
//! outstanding mark.

use super::flag::Flag;
use core::cell::Cell;
use critical_section::Mutex;
use portable_atomic::{AtomicBool, Ordering};

/// Analog inputs scanned on each request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnalogChannel {
    JoystickX,
    JoystickY,
    PhotoA,
    PhotoB,
}

impl AnalogChannel {
    /// All channels in scan order
    pub const ALL: [AnalogChannel; 4] = [
        AnalogChannel::JoystickX,
        AnalogChannel::JoystickY,
        AnalogChannel::PhotoA,
        AnalogChannel::PhotoB,
    ];

    const fn bit(self) -> u8 {
        match self {
            AnalogChannel::JoystickX => 0b0001,
            AnalogChannel::JoystickY => 0b0010,
            AnalogChannel::PhotoA => 0b0100,
            AnalogChannel::PhotoB => 0b1000,
        }
    }
}

const ALL_CHANNELS: u8 = 0b1111;

/// One scan of the four analog inputs, 10-bit each
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogSample {
    pub x: u16,
    pub y: u16,
    pub photo_a: u16,
    pub photo_b: u16,
}

/// Photoresistor reading well above any darkness threshold
pub const PHOTO_IDLE: u16 = 1000;

impl AnalogSample {
    /// Joystick centred, cup lit
    pub const fn idle() -> Self {
        Self {
            x: 512,
            y: 512,
            photo_a: PHOTO_IDLE,
            photo_b: PHOTO_IDLE,
        }
    }

    /// Check whether either photoresistor is occluded
    pub fn is_dark(&self, threshold: u16) -> bool {
        self.photo_a < threshold || self.photo_b < threshold
    }

    /// Get one channel's value
    pub fn get(&self, channel: AnalogChannel) -> u16 {
        match channel {
            AnalogChannel::JoystickX => self.x,
            AnalogChannel::JoystickY => self.y,
            AnalogChannel::PhotoA => self.photo_a,
            AnalogChannel::PhotoB => self.photo_b,
        }
    }

    fn set(&mut self, channel: AnalogChannel, value: u16) {
        match channel {
            AnalogChannel::JoystickX => self.x = value,
            AnalogChannel::JoystickY => self.y = value,
            AnalogChannel::PhotoA => self.photo_a = value,
            AnalogChannel::PhotoB => self.photo_b = value,
        }
    }
}

impl Default for AnalogSample {
    fn default() -> Self {
        Self::idle()
    }
}

/// Sampling errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleError {
    /// A conversion is already outstanding
    Busy,
    /// The conversion did not complete in time
    Timeout,
}

/// Identifies one request; the sampler echoes it back on every write
pub type Ticket = u16;

#[derive(Clone, Copy)]
struct Scan {
    sample: AnalogSample,
    fresh: u8,
    ticket: Ticket,
}

/// Single-producer, single-consumer sample cell
pub struct SampleHandoff {
    outstanding: AtomicBool,
    ready: Flag,
    scan: Mutex<Cell<Scan>>,
}

impl SampleHandoff {
    /// Create an idle handoff
    pub const fn new() -> Self {
        Self {
            outstanding: AtomicBool::new(false),
            ready: Flag::new(),
            scan: Mutex::new(Cell::new(Scan {
                sample: AnalogSample::idle(),
                fresh: 0,
                ticket: 0,
            })),
        }
    }

    /// Start a conversion (consumer side)
    ///
    /// Refused while a previous request has not been taken or abandoned.
    /// The returned ticket must accompany every [`publish`](Self::publish)
    /// for this request.
    pub fn request(&self) -> Result<Ticket, SampleError> {
        if self.outstanding.swap(true, Ordering::AcqRel) {
            return Err(SampleError::Busy);
        }
        // Drop a completion left over from an abandoned request
        self.ready.take();
        let ticket = critical_section::with(|cs| {
            let cell = self.scan.borrow(cs);
            let mut scan = cell.get();
            scan.ticket = scan.ticket.wrapping_add(1);
            scan.fresh = 0;
            cell.set(scan);
            scan.ticket
        });
        Ok(ticket)
    }

    /// Check whether a conversion has been requested and not yet taken
    pub fn is_outstanding(&self) -> bool {
        self.outstanding.load(Ordering::Acquire)
    }

    /// Publish one converted channel (producer side)
    ///
    /// Writes from a request that has since been abandoned are ignored.
    /// Returns true once this completed the sample.
    pub fn publish(&self, ticket: Ticket, channel: AnalogChannel, value: u16) -> bool {
        let complete = critical_section::with(|cs| {
            let cell = self.scan.borrow(cs);
            let mut scan = cell.get();
            if scan.ticket != ticket || scan.fresh == ALL_CHANNELS {
                return false;
            }
            scan.sample.set(channel, value);
            scan.fresh |= channel.bit();
            cell.set(scan);
            scan.fresh == ALL_CHANNELS
        });
        if complete {
            self.ready.raise();
        }
        complete
    }

    /// Publish all four channels at once (producer side)
    pub fn complete(&self, ticket: Ticket, sample: AnalogSample) {
        for channel in AnalogChannel::ALL {
            self.publish(ticket, channel, sample.get(channel));
        }
    }

    /// Check whether a complete sample is waiting
    pub fn is_ready(&self) -> bool {
        self.ready.is_raised()
    }

    /// Take the completed sample (consumer side)
    pub fn take(&self) -> Option<AnalogSample> {
        if !self.ready.take() {
            return None;
        }
        let sample = critical_section::with(|cs| self.scan.borrow(cs).get().sample);
        self.outstanding.store(false, Ordering::Release);
        Some(sample)
    }

    /// Give up on the outstanding request so the next one can start
    pub fn abandon(&self) {
        // Retire the ticket so the rest of the old scan cannot land
        critical_section::with(|cs| {
            let cell = self.scan.borrow(cs);
            let mut scan = cell.get();
            scan.ticket = scan.ticket.wrapping_add(1);
            cell.set(scan);
        });
        self.ready.take();
        self.outstanding.store(false, Ordering::Release);
    }
}

impl Default for SampleHandoff {
    fn default() -> Self {
        Self::new()
    }
}
