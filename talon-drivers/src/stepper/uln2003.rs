//! ULN2003 four-coil stepper output
//!
//! The ULN2003 is a plain darlington array: each input pin switches one coil
//! of a unipolar stepper such as the 28BYJ-48. Step timing and the coil
//! sequence live in [`talon_core::motion::Axis`]; this driver only puts a
//! pattern on the pins.

use embedded_hal::digital::OutputPin;

use crate::error::{pin_err, DriverError};

/// Coil outputs for one motor
///
/// Pin order is coil A to coil D; pattern bit 3 drives coil A.
pub struct Uln2003<P> {
    coils: [P; 4],
    pattern: u8,
}

impl<P: OutputPin> Uln2003<P> {
    /// Take ownership of the coil pins and de-energize them
    pub fn new(coils: [P; 4]) -> Result<Self, DriverError> {
        let mut driver = Self { coils, pattern: 0 };
        driver.release()?;
        Ok(driver)
    }

    /// Drive a 4-bit coil pattern
    pub fn write_pattern(&mut self, pattern: u8) -> Result<(), DriverError> {
        for (i, coil) in self.coils.iter_mut().enumerate() {
            let bit = 0b1000 >> i;
            if pattern & bit != 0 {
                coil.set_high().map_err(pin_err)?;
            } else {
                coil.set_low().map_err(pin_err)?;
            }
        }
        self.pattern = pattern & 0x0F;
        Ok(())
    }

    /// De-energize every coil
    pub fn release(&mut self) -> Result<(), DriverError> {
        self.write_pattern(0)
    }

    /// Last pattern written
    pub fn pattern(&self) -> u8 {
        self.pattern
    }
}
