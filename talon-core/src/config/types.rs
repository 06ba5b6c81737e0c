//! Configuration type definitions
//!
//! These types describe one claw machine: phase durations, per-axis joystick
//! calibration and motor limits, gripper angles, drop-sensor threshold and
//! the bonus timing window. Defaults match the reference build.

/// Default reset-phase duration in seconds
pub const DEFAULT_RESET_S: u16 = 10;

/// Default countdown-phase duration in seconds
pub const DEFAULT_COUNTDOWN_S: u16 = 3;

/// Default play-phase duration in seconds
pub const DEFAULT_PLAY_S: u16 = 80;

/// Default round-clock ticks per second
pub const DEFAULT_TICKS_PER_SECOND: u8 = 8;

/// Full-scale reading of the 10-bit analog inputs
pub const ADC_FULL_SCALE: u16 = 1023;

/// Capture counter values are 16-bit
pub const MAX_COUNTER_MODULUS: u32 = 1 << 16;

/// Phase durations and loop cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingConfig {
    /// Seconds spent driving the claw back to its origin
    pub reset_s: u16,
    /// Seconds of "starting in" countdown before play
    pub countdown_s: u16,
    /// Seconds the player has to win a round
    pub play_s: u16,
    /// Round-clock ticks per second (one decrement every this many ticks)
    pub ticks_per_second: u8,
    /// Idle delay between game-loop iterations outside of sampling
    pub loop_period_ms: u16,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            reset_s: DEFAULT_RESET_S,
            countdown_s: DEFAULT_COUNTDOWN_S,
            play_s: DEFAULT_PLAY_S,
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            loop_period_ms: 5,
        }
    }
}

impl TimingConfig {
    /// Round-clock tick interval in milliseconds
    pub fn tick_interval_ms(&self) -> u32 {
        1000 / self.ticks_per_second.max(1) as u32
    }
}

/// How joystick displacement maps onto motor direction for one axis
///
/// The two claw motors are mounted facing opposite ways, so the same
/// joystick displacement must spin them in opposite directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DirectionConvention {
    /// Negative displacement spins counter-clockwise
    #[default]
    Normal,
    /// Negative displacement spins clockwise
    Mirrored,
}

/// Joystick channel calibration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JoystickConfig {
    /// Reading at rest
    pub midpoint: u16,
    /// Half-width of the rest zone around the midpoint
    pub dead_zone: u16,
    /// Maximum reading of the channel
    pub full_scale: u16,
}

impl Default for JoystickConfig {
    fn default() -> Self {
        Self {
            midpoint: 512,
            dead_zone: 12,
            full_scale: ADC_FULL_SCALE,
        }
    }
}

/// One positional axis: joystick channel plus stepper limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisConfig {
    /// Joystick calibration for this axis
    pub joystick: JoystickConfig,
    /// Displacement to direction mapping
    pub convention: DirectionConvention,
    /// Speed at the edge of the dead zone (RPM, must be non-zero)
    pub min_rpm: u16,
    /// Speed at full joystick deflection (RPM)
    pub max_rpm: u16,
    /// Half-steps per output shaft revolution
    pub steps_per_rev: u32,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            joystick: JoystickConfig::default(),
            convention: DirectionConvention::Normal,
            min_rpm: 1,
            max_rpm: 15,
            // 28BYJ-48: 32 steps x 64:1 gearbox, doubled for half-stepping
            steps_per_rev: 32 * 64 * 2,
        }
    }
}

impl AxisConfig {
    /// Default configuration with a mirrored direction convention
    pub fn mirrored() -> Self {
        Self {
            convention: DirectionConvention::Mirrored,
            ..Self::default()
        }
    }
}

/// Gripper servo configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GripperConfig {
    /// Servo angle that holds the claw open (degrees)
    pub open_angle: u8,
    /// Servo angle that holds the claw closed (degrees)
    pub closed_angle: u8,
    /// Pulse width at 0 degrees
    pub min_pulse_us: u16,
    /// Pulse width at 180 degrees
    pub max_pulse_us: u16,
    /// PWM period
    pub period_us: u16,
}

impl Default for GripperConfig {
    fn default() -> Self {
        Self {
            open_angle: 40,
            closed_angle: 120,
            min_pulse_us: 510,
            max_pulse_us: 2490,
            period_us: 25_000,
        }
    }
}

/// Drop sensor and analog sampler configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorConfig {
    /// Photoresistor reading below which the cup counts as occluded
    pub dark_threshold: u16,
    /// How long the game loop waits for a conversion before retrying
    pub sample_timeout_us: u32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            dark_threshold: 150,
            sample_timeout_us: 2_000,
        }
    }
}

/// Drop-height bonus window
///
/// All tick values are in capture-counter ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BonusConfig {
    /// Win must land within this many round-clock seconds of the last press
    pub gate_s: u16,
    /// Elapsed ticks at or below this earn nothing (object was placed)
    pub cutoff_ticks: u32,
    /// Ticks per bonus point above the cutoff
    pub scale_ticks: u32,
    /// Elapsed ticks at or above this earn nothing (implausibly slow drop)
    pub ceiling_ticks: u32,
    /// Wrap period of the free-running capture counter
    pub counter_modulus: u32,
    /// Capture counter rate
    pub capture_hz: u32,
}

impl Default for BonusConfig {
    fn default() -> Self {
        Self {
            gate_s: 2,
            cutoff_ticks: 4_000,
            scale_ticks: 1_000,
            ceiling_ticks: 32_768,
            counter_modulus: 65_536,
            capture_hz: 32_768,
        }
    }
}

/// Button input configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputConfig {
    /// Quiet time after each edge before the next one is accepted
    pub debounce_ms: u16,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { debounce_ms: 10 }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GameConfig {
    /// Phase durations
    pub timing: TimingConfig,
    /// Side-to-side axis (joystick X, motor 1)
    pub axis_x: AxisConfig,
    /// Up-down axis (joystick Y, motor 2)
    pub axis_y: AxisConfig,
    /// Gripper servo
    pub gripper: GripperConfig,
    /// Drop sensors and sampler
    pub sensors: SensorConfig,
    /// Bonus window
    pub bonus: BonusConfig,
    /// Button
    pub input: InputConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            timing: TimingConfig::default(),
            axis_x: AxisConfig::default(),
            axis_y: AxisConfig::mirrored(),
            gripper: GripperConfig::default(),
            sensors: SensorConfig::default(),
            bonus: BonusConfig::default(),
            input: InputConfig::default(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Round clock would never advance
    ZeroTicksPerSecond,
    /// min_rpm is zero or above max_rpm
    InvalidRpmRange,
    /// Step period would be undefined
    ZeroStepsPerRevolution,
    /// Dead zone leaves no travel on one side of the midpoint
    DeadZoneTooWide,
    /// Gripper angles outside 0..=180 or pulse range inverted
    InvalidGripper,
    /// Bonus window is empty, exceeds the counter period, or the counter
    /// does not fit in 16 bits
    InvalidBonusWindow,
}

impl GameConfig {
    /// Get the configuration for one axis
    pub fn axis(&self, id: crate::motion::AxisId) -> &AxisConfig {
        match id {
            crate::motion::AxisId::X => &self.axis_x,
            crate::motion::AxisId::Y => &self.axis_y,
        }
    }

    /// Check internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timing.ticks_per_second == 0 {
            return Err(ConfigError::ZeroTicksPerSecond);
        }

        for axis in [&self.axis_x, &self.axis_y] {
            if axis.min_rpm == 0 || axis.min_rpm > axis.max_rpm {
                return Err(ConfigError::InvalidRpmRange);
            }
            if axis.steps_per_rev == 0 {
                return Err(ConfigError::ZeroStepsPerRevolution);
            }
            let js = &axis.joystick;
            let upper = js.midpoint.saturating_add(js.dead_zone).saturating_add(1);
            if js.dead_zone >= js.midpoint || upper >= js.full_scale {
                return Err(ConfigError::DeadZoneTooWide);
            }
        }

        let g = &self.gripper;
        if g.open_angle > 180
            || g.closed_angle > 180
            || g.min_pulse_us >= g.max_pulse_us
            || g.max_pulse_us >= g.period_us
        {
            return Err(ConfigError::InvalidGripper);
        }

        let b = &self.bonus;
        if b.scale_ticks == 0
            || b.cutoff_ticks >= b.ceiling_ticks
            || b.ceiling_ticks > b.counter_modulus
            || b.counter_modulus > MAX_COUNTER_MODULUS
            || b.capture_hz == 0
        {
            return Err(ConfigError::InvalidBonusWindow);
        }

        Ok(())
    }
}
