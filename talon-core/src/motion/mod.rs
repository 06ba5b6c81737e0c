//! Axis motion
//!
//! Commands sent from the game loop to the step generators, the unified
//! axis model, and the half-step coil sequence.

pub mod axis;
pub mod sequence;

pub use axis::{direction_for, homing_command, Axis, Displacement};
pub use sequence::{HalfStepSequencer, HALF_STEP_PATTERNS};

use crate::traits::Direction;

/// Claw axis identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisId {
    /// Side to side, joystick X, motor 1
    X,
    /// Front to back, joystick Y, motor 2
    Y,
}

impl AxisId {
    /// Both axes in index order
    pub const ALL: [AxisId; 2] = [AxisId::X, AxisId::Y];

    /// Array index of this axis
    pub const fn index(self) -> usize {
        match self {
            AxisId::X => 0,
            AxisId::Y => 1,
        }
    }
}

/// Desired behavior of one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisCommand {
    /// Rotation direction
    pub direction: Direction,
    /// Speed in hundredths of an RPM (ignored while disabled)
    pub rpm_x100: u16,
    /// Whether the axis should step at all
    pub enabled: bool,
}

impl AxisCommand {
    /// Axis stopped
    pub const fn disabled() -> Self {
        Self {
            direction: Direction::Clockwise,
            rpm_x100: 0,
            enabled: false,
        }
    }

    /// Axis stepping in `direction` at `rpm_x100`
    pub const fn run(direction: Direction, rpm_x100: u16) -> Self {
        Self {
            direction,
            rpm_x100,
            enabled: true,
        }
    }
}

impl Default for AxisCommand {
    fn default() -> Self {
        Self::disabled()
    }
}
