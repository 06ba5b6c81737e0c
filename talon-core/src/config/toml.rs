//! Simple TOML parser for game configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! `game.toml`. It does NOT support the full TOML language and needs no allocator.
//!
//! Supported features:
//! - Key = value pairs (string, integer)
//! - [section] and [section.subsection] headers
//! - Underscore digit separators (65_536)
//! - Comments (# ...), full-line or trailing
//!
//! Keys that are absent keep their default value.

use super::types::{AxisConfig, DirectionConvention, GameConfig};

/// What went wrong while parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseErrorKind {
    /// Section header not recognized
    UnknownSection,
    /// Key not valid for the current section
    UnknownKey,
    /// Line is neither a header nor `key = value`
    Syntax,
    /// Value has the wrong type or is out of range
    InvalidValue,
}

/// Parse error with the 1-based line it occurred on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParseError {
    /// Line number in the input
    pub line: usize,
    /// Error category
    pub kind: ParseErrorKind,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Timing,
    AxisX,
    AxisY,
    Gripper,
    Sensors,
    Bonus,
    Input,
}

/// Parse TOML text into a [`GameConfig`], starting from defaults
///
/// The result is not validated; call [`GameConfig::validate`] afterwards.
pub fn parse_config(input: &str) -> Result<GameConfig, ParseError> {
    let mut config = GameConfig::default();
    let mut section = Section::Root;

    for (index, raw) in input.lines().enumerate() {
        let line_no = index + 1;
        let fail = |kind| ParseError {
            line: line_no,
            kind,
        };

        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            if !line.ends_with(']') {
                return Err(fail(ParseErrorKind::Syntax));
            }
            section = parse_section_header(&line[1..line.len() - 1])
                .ok_or(fail(ParseErrorKind::UnknownSection))?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(fail(ParseErrorKind::Syntax))?;
        apply_value(&mut config, section, key, value).map_err(fail)?;
    }

    Ok(config)
}

/// Drop a trailing `# comment`, ignoring '#' inside double quotes
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_section_header(header: &str) -> Option<Section> {
    match header.trim() {
        "timing" => Some(Section::Timing),
        "axis.x" => Some(Section::AxisX),
        "axis.y" => Some(Section::AxisY),
        "gripper" => Some(Section::Gripper),
        "sensors" => Some(Section::Sensors),
        "bonus" => Some(Section::Bonus),
        "input" => Some(Section::Input),
        _ => None,
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Parse an unsigned integer, allowing `_` separators
fn parse_uint(value: &str) -> Result<u32, ParseErrorKind> {
    let mut result: u32 = 0;
    let mut digits = 0;
    for c in value.chars() {
        if c == '_' {
            continue;
        }
        let d = c.to_digit(10).ok_or(ParseErrorKind::InvalidValue)?;
        result = result
            .checked_mul(10)
            .and_then(|r| r.checked_add(d))
            .ok_or(ParseErrorKind::InvalidValue)?;
        digits += 1;
    }
    if digits == 0 {
        return Err(ParseErrorKind::InvalidValue);
    }
    Ok(result)
}

fn parse_u8(value: &str) -> Result<u8, ParseErrorKind> {
    u8::try_from(parse_uint(value)?).map_err(|_| ParseErrorKind::InvalidValue)
}

fn parse_u16(value: &str) -> Result<u16, ParseErrorKind> {
    u16::try_from(parse_uint(value)?).map_err(|_| ParseErrorKind::InvalidValue)
}

fn parse_string(value: &str) -> Result<&str, ParseErrorKind> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ParseErrorKind::InvalidValue)
}

fn parse_convention(value: &str) -> Result<DirectionConvention, ParseErrorKind> {
    match parse_string(value)? {
        "normal" => Ok(DirectionConvention::Normal),
        "mirrored" => Ok(DirectionConvention::Mirrored),
        _ => Err(ParseErrorKind::InvalidValue),
    }
}

fn apply_value(
    config: &mut GameConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ParseErrorKind> {
    match section {
        Section::Root => return Err(ParseErrorKind::UnknownKey),
        Section::Timing => {
            let t = &mut config.timing;
            match key {
                "reset_s" => t.reset_s = parse_u16(value)?,
                "countdown_s" => t.countdown_s = parse_u16(value)?,
                "play_s" => t.play_s = parse_u16(value)?,
                "ticks_per_second" => t.ticks_per_second = parse_u8(value)?,
                "loop_period_ms" => t.loop_period_ms = parse_u16(value)?,
                _ => return Err(ParseErrorKind::UnknownKey),
            }
        }
        Section::AxisX => apply_axis(&mut config.axis_x, key, value)?,
        Section::AxisY => apply_axis(&mut config.axis_y, key, value)?,
        Section::Gripper => {
            let g = &mut config.gripper;
            match key {
                "open_angle" => g.open_angle = parse_u8(value)?,
                "closed_angle" => g.closed_angle = parse_u8(value)?,
                "min_pulse_us" => g.min_pulse_us = parse_u16(value)?,
                "max_pulse_us" => g.max_pulse_us = parse_u16(value)?,
                "period_us" => g.period_us = parse_u16(value)?,
                _ => return Err(ParseErrorKind::UnknownKey),
            }
        }
        Section::Sensors => {
            let s = &mut config.sensors;
            match key {
                "dark_threshold" => s.dark_threshold = parse_u16(value)?,
                "sample_timeout_us" => s.sample_timeout_us = parse_uint(value)?,
                _ => return Err(ParseErrorKind::UnknownKey),
            }
        }
        Section::Bonus => {
            let b = &mut config.bonus;
            match key {
                "gate_s" => b.gate_s = parse_u16(value)?,
                "cutoff_ticks" => b.cutoff_ticks = parse_uint(value)?,
                "scale_ticks" => b.scale_ticks = parse_uint(value)?,
                "ceiling_ticks" => b.ceiling_ticks = parse_uint(value)?,
                "counter_modulus" => b.counter_modulus = parse_uint(value)?,
                "capture_hz" => b.capture_hz = parse_uint(value)?,
                _ => return Err(ParseErrorKind::UnknownKey),
            }
        }
        Section::Input => match key {
            "debounce_ms" => config.input.debounce_ms = parse_u16(value)?,
            _ => return Err(ParseErrorKind::UnknownKey),
        },
    }
    Ok(())
}

fn apply_axis(axis: &mut AxisConfig, key: &str, value: &str) -> Result<(), ParseErrorKind> {
    match key {
        "midpoint" => axis.joystick.midpoint = parse_u16(value)?,
        "dead_zone" => axis.joystick.dead_zone = parse_u16(value)?,
        "full_scale" => axis.joystick.full_scale = parse_u16(value)?,
        "convention" => axis.convention = parse_convention(value)?,
        "min_rpm" => axis.min_rpm = parse_u16(value)?,
        "max_rpm" => axis.max_rpm = parse_u16(value)?,
        "steps_per_rev" => axis.steps_per_rev = parse_uint(value)?,
        _ => return Err(ParseErrorKind::UnknownKey),
    }
    Ok(())
}
