//! Open-loop positional axis
//!
//! One type drives both claw axes. The per-axis differences (joystick
//! calibration, direction convention, speed range) all come from
//! [`AxisConfig`].

use super::sequence::HalfStepSequencer;
use super::AxisCommand;
use crate::config::{AxisConfig, DirectionConvention};
use crate::traits::{AxisDriver, Direction};

/// Which side of the rest zone the joystick is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Displacement {
    /// Reading below the rest zone
    Negative,
    /// Reading above the rest zone
    Positive,
}

/// Motor direction for a joystick displacement under a convention
pub fn direction_for(convention: DirectionConvention, displacement: Displacement) -> Direction {
    match (convention, displacement) {
        (DirectionConvention::Normal, Displacement::Negative) => Direction::CounterClockwise,
        (DirectionConvention::Normal, Displacement::Positive) => Direction::Clockwise,
        (DirectionConvention::Mirrored, Displacement::Negative) => Direction::Clockwise,
        (DirectionConvention::Mirrored, Displacement::Positive) => Direction::CounterClockwise,
    }
}

/// Command that drives an axis back toward its physical origin
///
/// The origin lies in the negative-displacement direction; homing runs at
/// full speed.
pub fn homing_command(config: &AxisConfig) -> AxisCommand {
    AxisCommand::run(
        direction_for(config.convention, Displacement::Negative),
        config.max_rpm.saturating_mul(100),
    )
}

/// Step generator state for one axis
#[derive(Debug, Clone)]
pub struct Axis {
    config: AxisConfig,
    direction: Direction,
    rpm_x100: u16,
    enabled: bool,
    sequencer: HalfStepSequencer,
}

impl Axis {
    /// Create a disabled axis at minimum speed
    pub fn new(config: AxisConfig) -> Self {
        Self {
            config,
            direction: Direction::Clockwise,
            rpm_x100: config.min_rpm.saturating_mul(100),
            enabled: false,
            sequencer: HalfStepSequencer::new(),
        }
    }

    /// Get the axis configuration
    pub fn config(&self) -> &AxisConfig {
        &self.config
    }

    /// Apply a complete command from the game loop
    pub fn apply(&mut self, command: &AxisCommand) {
        if command.enabled {
            self.set_direction(command.direction);
            self.set_speed(command.rpm_x100);
            self.enable();
        } else {
            self.disable();
        }
    }

    /// Step period in timer ticks for a timer running at `tick_hz`
    ///
    /// period = tick_hz * 60 / (rpm * steps_per_rev), with rpm carried in
    /// hundredths. Returns `None` while disabled.
    pub fn step_period_ticks(&self, tick_hz: u64) -> Option<u64> {
        if !self.enabled {
            return None;
        }
        let denom = self.rpm_x100 as u64 * self.config.steps_per_rev as u64;
        if denom == 0 {
            return None;
        }
        Some((tick_hz * 60 * 100 / denom).max(1))
    }

    /// Handle one step-timer expiry
    ///
    /// Returns the coil pattern to drive, or `None` if the axis is disabled.
    pub fn on_step(&mut self) -> Option<u8> {
        if !self.enabled {
            return None;
        }
        Some(self.sequencer.advance(self.direction))
    }

    /// Coil pattern currently held
    pub fn pattern(&self) -> u8 {
        self.sequencer.pattern()
    }

    fn min_x100(&self) -> u16 {
        self.config.min_rpm.max(1).saturating_mul(100)
    }

    fn max_x100(&self) -> u16 {
        self.config.max_rpm.saturating_mul(100).max(self.min_x100())
    }
}

impl AxisDriver for Axis {
    fn set_direction(&mut self, dir: Direction) {
        self.direction = dir;
    }

    fn direction(&self) -> Direction {
        self.direction
    }

    fn set_speed(&mut self, rpm_x100: u16) {
        self.rpm_x100 = rpm_x100.clamp(self.min_x100(), self.max_x100());
    }

    fn speed(&self) -> u16 {
        self.rpm_x100
    }

    fn enable(&mut self) {
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.enabled = false;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directions_by_convention() {
        assert_eq!(
            direction_for(DirectionConvention::Normal, Displacement::Negative),
            Direction::CounterClockwise
        );
        assert_eq!(
            direction_for(DirectionConvention::Mirrored, Displacement::Negative),
            Direction::Clockwise
        );
        assert_eq!(
            direction_for(DirectionConvention::Mirrored, Displacement::Positive),
            Direction::CounterClockwise
        );
    }

    #[test]
    fn test_homing_is_mirrored_between_axes() {
        let x = homing_command(&AxisConfig::default());
        let y = homing_command(&AxisConfig::mirrored());
        assert!(x.enabled && y.enabled);
        assert_eq!(x.direction, Direction::CounterClockwise);
        assert_eq!(y.direction, Direction::Clockwise);
        assert_eq!(x.rpm_x100, 1500);
    }

    #[test]
    fn test_speed_clamped_to_range() {
        let mut axis = Axis::new(AxisConfig::default());
        axis.set_speed(0);
        assert_eq!(axis.speed(), 100);
        axis.set_speed(9000);
        assert_eq!(axis.speed(), 1500);
        axis.set_speed(750);
        assert_eq!(axis.speed(), 750);
    }

    #[test]
    fn test_step_period() {
        let mut axis = Axis::new(AxisConfig::default());
        assert_eq!(axis.step_period_ticks(4_000_000), None);

        axis.apply(&AxisCommand::run(Direction::Clockwise, 1500));
        // 4 MHz * 60 / (15 rpm * 4096 steps)
        assert_eq!(axis.step_period_ticks(4_000_000), Some(3906));

        axis.set_speed(100);
        assert_eq!(axis.step_period_ticks(1_000_000), Some(14_648));
    }

    #[test]
    fn test_disable_keeps_phase() {
        let mut axis = Axis::new(AxisConfig::default());
        axis.apply(&AxisCommand::run(Direction::Clockwise, 500));
        axis.on_step();
        axis.on_step();
        let held = axis.pattern();

        axis.apply(&AxisCommand::disabled());
        assert_eq!(axis.on_step(), None);
        assert_eq!(axis.pattern(), held);

        axis.apply(&AxisCommand::run(Direction::CounterClockwise, 500));
        assert_eq!(axis.on_step(), Some(0b0001));
    }
}
