//! Driver error type

use talon_core::traits::DisplayError;

/// Errors raised while driving hardware outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError {
    /// A digital output could not be set
    Pin,
    /// A PWM duty cycle could not be set
    Pwm,
}

impl From<DriverError> for DisplayError {
    fn from(_: DriverError) -> Self {
        DisplayError::Bus
    }
}

/// Map any `embedded-hal` pin error into [`DriverError::Pin`]
pub(crate) fn pin_err<E>(_: E) -> DriverError {
    DriverError::Pin
}
