//! Hobby-servo gripper
//!
//! The servo angle is set by the pulse width within a fixed PWM period:
//! `min_pulse_us` at 0 degrees up to `max_pulse_us` at 180 degrees.

use embedded_hal::pwm::SetDutyCycle;
use talon_core::config::GripperConfig;
use talon_core::traits::Gripper;

use crate::error::DriverError;

/// Full servo travel in degrees
const SERVO_RANGE_DEG: u32 = 180;

/// Pulse width in microseconds for `angle` degrees
pub fn pulse_width_us(config: &GripperConfig, angle: u8) -> u16 {
    let min = config.min_pulse_us as u32;
    let max = config.max_pulse_us as u32;
    let angle = (angle as u32).min(SERVO_RANGE_DEG);
    (min + angle * max.saturating_sub(min) / SERVO_RANGE_DEG) as u16
}

/// Gripper servo on one PWM channel
///
/// The PWM channel must already run at the configured period.
pub struct ServoGripper<P> {
    pwm: P,
    config: GripperConfig,
    angle: u8,
}

impl<P: SetDutyCycle> ServoGripper<P> {
    /// Take the PWM channel and move to the open angle
    pub fn new(pwm: P, config: GripperConfig) -> Result<Self, DriverError> {
        let mut gripper = Self {
            pwm,
            config,
            angle: config.open_angle,
        };
        gripper.set_angle(config.open_angle)?;
        Ok(gripper)
    }

    /// Get the configuration
    pub fn config(&self) -> &GripperConfig {
        &self.config
    }

    /// Check whether the claw is at its closed angle
    pub fn is_closed(&self) -> bool {
        self.angle == self.config.closed_angle
    }

    fn limits(&self) -> (u8, u8) {
        let a = self.config.open_angle;
        let b = self.config.closed_angle;
        (a.min(b), a.max(b))
    }
}

impl<P: SetDutyCycle> Gripper for ServoGripper<P> {
    type Error = DriverError;

    fn set_angle(&mut self, angle: u8) -> Result<(), DriverError> {
        let (lo, hi) = self.limits();
        let angle = angle.clamp(lo, hi);
        let pulse = pulse_width_us(&self.config, angle);
        self.pwm
            .set_duty_cycle_fraction(pulse, self.config.period_us)
            .map_err(|_| DriverError::Pwm)?;
        self.angle = angle;
        Ok(())
    }

    fn angle(&self) -> u8 {
        self.angle
    }

    fn open_angle(&self) -> u8 {
        self.config.open_angle
    }

    fn closed_angle(&self) -> u8 {
        self.config.closed_angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::pwm::ErrorType;
    use talon_core::traits::GripperCommand;

    /// PWM channel with a 25000-count period, one count per microsecond
    struct MockPwm {
        duty: u16,
    }

    impl ErrorType for MockPwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for MockPwm {
        fn max_duty_cycle(&self) -> u16 {
            25_000
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            self.duty = duty;
            Ok(())
        }
    }

    fn gripper() -> ServoGripper<MockPwm> {
        ServoGripper::new(MockPwm { duty: 0 }, GripperConfig::default()).unwrap()
    }

    #[test]
    fn test_pulse_widths() {
        let config = GripperConfig::default();
        assert_eq!(pulse_width_us(&config, 0), 510);
        assert_eq!(pulse_width_us(&config, 180), 2490);
        assert_eq!(pulse_width_us(&config, 40), 950);
        assert_eq!(pulse_width_us(&config, 120), 1830);
    }

    #[test]
    fn test_starts_open() {
        let g = gripper();
        assert_eq!(g.angle(), 40);
        assert_eq!(g.pwm.duty, 950);
        assert!(!g.is_closed());
    }

    #[test]
    fn test_toggle_alternates() {
        let mut g = gripper();
        g.toggle().unwrap();
        assert_eq!(g.angle(), 120);
        assert_eq!(g.pwm.duty, 1830);
        g.toggle().unwrap();
        assert_eq!(g.angle(), 40);
    }

    #[test]
    fn test_angle_clamped_to_travel() {
        let mut g = gripper();
        g.set_angle(5).unwrap();
        assert_eq!(g.angle(), 40);
        g.set_angle(170).unwrap();
        assert_eq!(g.angle(), 120);
    }

    #[test]
    fn test_forced_positions() {
        let mut g = gripper();
        g.apply(GripperCommand::Close).unwrap();
        assert!(g.is_closed());
        g.apply(GripperCommand::Close).unwrap();
        assert!(g.is_closed());
        g.apply(GripperCommand::Open).unwrap();
        assert_eq!(g.angle(), 40);
    }
}
