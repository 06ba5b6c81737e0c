//! Joystick to axis-command mapping
//!
//! Each axis has its own rest zone `[midpoint - dead_zone, midpoint + dead_zone]`.
//! Outside it, speed grows linearly with displacement from the edge of the
//! zone, from `min_rpm` at the edge to `max_rpm` at full deflection.

use crate::config::AxisConfig;
use crate::motion::{direction_for, AxisCommand, Displacement};

/// Map one joystick reading onto a command for its axis
pub fn axis_command(value: u16, config: &AxisConfig) -> AxisCommand {
    let js = &config.joystick;
    let low_edge = js.midpoint.saturating_sub(js.dead_zone);
    let high_edge = js.midpoint.saturating_add(js.dead_zone);

    let (displacement, offset, span) = if value < low_edge {
        // Mirror the reading so the low side measures from the same edge
        let mirrored = js.full_scale.saturating_sub(value);
        (
            Displacement::Negative,
            mirrored.saturating_sub(high_edge),
            js.full_scale.saturating_sub(high_edge),
        )
    } else if value > high_edge {
        (
            Displacement::Positive,
            value.saturating_sub(high_edge + 1),
            js.full_scale.saturating_sub(high_edge + 1),
        )
    } else {
        return AxisCommand::disabled();
    };

    AxisCommand::run(
        direction_for(config.convention, displacement),
        speed_x100(offset, span, config),
    )
}

/// Linear interpolation between min and max RPM, in hundredths
fn speed_x100(offset: u16, span: u16, config: &AxisConfig) -> u16 {
    let min = config.min_rpm as u32 * 100;
    let max = config.max_rpm as u32 * 100;
    let range = max.saturating_sub(min);
    let span = span.max(1) as u32;
    let offset = (offset as u32).min(span);
    (min + offset * range / span).min(u16::MAX as u32) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Direction;
    use proptest::prelude::*;

    #[test]
    fn test_rest_zone_disables() {
        let config = AxisConfig::default();
        for v in [500, 512, 524] {
            assert!(!axis_command(v, &config).enabled, "value {}", v);
        }
    }

    #[test]
    fn test_zone_edges_run_at_min_speed() {
        let config = AxisConfig::default();
        let low = axis_command(499, &config);
        assert!(low.enabled);
        assert_eq!(low.rpm_x100, 100);
        assert_eq!(low.direction, Direction::CounterClockwise);

        let high = axis_command(525, &config);
        assert_eq!(high.rpm_x100, 100);
        assert_eq!(high.direction, Direction::Clockwise);
    }

    #[test]
    fn test_full_deflection_runs_at_max_speed() {
        let config = AxisConfig::default();
        assert_eq!(axis_command(0, &config).rpm_x100, 1500);
        assert_eq!(axis_command(1023, &config).rpm_x100, 1500);
    }

    #[test]
    fn test_midway_speed() {
        let config = AxisConfig::default();
        // (1023 - 250) - 524 = 249 of 499 -> 1 + 249/499 * 14 rpm
        assert_eq!(axis_command(250, &config).rpm_x100, 798);
    }

    #[test]
    fn test_mirrored_axis_reverses_directions() {
        let config = AxisConfig::mirrored();
        assert_eq!(axis_command(0, &config).direction, Direction::Clockwise);
        assert_eq!(
            axis_command(1023, &config).direction,
            Direction::CounterClockwise
        );
    }

    proptest! {
        #[test]
        fn prop_speed_within_range(v in 0u16..=1023) {
            let config = AxisConfig::default();
            let cmd = axis_command(v, &config);
            if (500..=524).contains(&v) {
                prop_assert!(!cmd.enabled);
            } else {
                prop_assert!(cmd.enabled);
                prop_assert!(cmd.rpm_x100 >= 100 && cmd.rpm_x100 <= 1500);
            }
        }

        #[test]
        fn prop_speed_monotonic_in_displacement(a in 0u16..=1023, b in 0u16..=1023) {
            let config = AxisConfig::default();
            let same_side = (a < 500 && b < 500) || (a > 524 && b > 524);
            prop_assume!(same_side);
            let da = (a as i32 - 512).abs();
            let db = (b as i32 - 512).abs();
            let sa = axis_command(a, &config).rpm_x100;
            let sb = axis_command(b, &config).rpm_x100;
            if da <= db {
                prop_assert!(sa <= sb);
            } else {
                prop_assert!(sa >= sb);
            }
        }
    }
}
