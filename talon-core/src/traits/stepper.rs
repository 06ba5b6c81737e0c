//! Axis stepper trait
//!
//! This trait abstracts the commanded behavior of one positional axis
//! (direction, speed, enable) away from how its step pulses are produced.

/// Motor rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Clockwise rotation (half-step phase increments)
    Clockwise,
    /// Counter-clockwise rotation (half-step phase decrements)
    CounterClockwise,
}

/// Trait for one open-loop positional axis
///
/// Implementations translate a commanded speed into a step period and advance
/// the coil sequence on every step-timer expiry. There is no position
/// feedback.
pub trait AxisDriver {
    /// Set the rotation direction used by subsequent steps
    fn set_direction(&mut self, dir: Direction);

    /// Get the current direction
    fn direction(&self) -> Direction;

    /// Set the target speed in hundredths of an RPM
    ///
    /// Values outside the axis's configured range are clamped. Zero speed is
    /// expressed by [`disable`](Self::disable), never by a zero RPM.
    fn set_speed(&mut self, rpm_x100: u16);

    /// Get the current target speed in hundredths of an RPM
    fn speed(&self) -> u16;

    /// Start step generation at the current speed and direction
    fn enable(&mut self);

    /// Stop step generation, keeping the current coil phase
    fn disable(&mut self);

    /// Check whether step generation is running
    fn is_enabled(&self) -> bool;
}
