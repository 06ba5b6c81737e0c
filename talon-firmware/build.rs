//! Build script for talon-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates game.toml at compile time, so a typo fails the build instead
//!   of silently falling back to defaults on the board

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Keys accepted in each section, with the largest value each may hold
const SECTIONS: &[(&str, &[(&str, i64)])] = &[
    (
        "timing",
        &[
            ("reset_s", u16::MAX as i64),
            ("countdown_s", u16::MAX as i64),
            ("play_s", u16::MAX as i64),
            ("ticks_per_second", u8::MAX as i64),
            ("loop_period_ms", u16::MAX as i64),
        ],
    ),
    (
        "gripper",
        &[
            ("open_angle", 180),
            ("closed_angle", 180),
            ("min_pulse_us", u16::MAX as i64),
            ("max_pulse_us", u16::MAX as i64),
            ("period_us", u16::MAX as i64),
        ],
    ),
    (
        "sensors",
        &[
            ("dark_threshold", 1023),
            ("sample_timeout_us", u32::MAX as i64),
        ],
    ),
    (
        "bonus",
        &[
            ("gate_s", u16::MAX as i64),
            ("cutoff_ticks", u32::MAX as i64),
            ("scale_ticks", u32::MAX as i64),
            ("ceiling_ticks", u32::MAX as i64),
            ("counter_modulus", 65_536),
            ("capture_hz", u32::MAX as i64),
        ],
    ),
    ("input", &[("debounce_ms", u16::MAX as i64)]),
];

/// Integer keys of an `[axis.*]` table
const AXIS_KEYS: &[(&str, i64)] = &[
    ("midpoint", 1023),
    ("dead_zone", 1023),
    ("full_scale", 1023),
    ("min_rpm", u16::MAX as i64),
    ("max_rpm", u16::MAX as i64),
    ("steps_per_rev", u32::MAX as i64),
];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).expect("cannot create memory.x");
    f.write_all(memory_x).expect("cannot write memory.x");

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate game.toml against the keys the firmware parser understands
fn validate_config() {
    println!("cargo:rerun-if-changed=game.toml");

    let config_path = Path::new("game.toml");
    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => report("Cannot read game.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => report(
            "Invalid TOML syntax in game.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();
    let Some(root) = config.as_table() else {
        report("game.toml must be a table", &[]);
    };

    for (name, value) in root {
        match name.as_str() {
            "axis" => validate_axes(value, &mut errors),
            _ => match SECTIONS.iter().find(|(section, _)| section == name) {
                Some((_, keys)) => validate_table(name, value, keys, &mut errors),
                None => errors.push(format!("unknown section [{}]", name)),
            },
        }
    }

    if !errors.is_empty() {
        report("Invalid configuration in game.toml", &errors);
    }

    println!("cargo:warning=game.toml validated successfully");
}

fn validate_axes(value: &toml::Value, errors: &mut Vec<String>) {
    let Some(axes) = value.as_table() else {
        errors.push("[axis] must contain [axis.x] and/or [axis.y]".to_string());
        return;
    };

    for (axis, table) in axes {
        let section = format!("axis.{}", axis);
        if axis != "x" && axis != "y" {
            errors.push(format!("unknown section [{}]", section));
            continue;
        }
        let Some(entries) = table.as_table() else {
            errors.push(format!("[{}] must be a table", section));
            continue;
        };

        for (key, value) in entries {
            if key == "convention" {
                match value.as_str() {
                    Some("normal") | Some("mirrored") => {}
                    _ => errors.push(format!(
                        "[{}] convention must be \"normal\" or \"mirrored\"",
                        section
                    )),
                }
            } else {
                check_integer(&section, key, value, AXIS_KEYS, errors);
            }
        }

        let get = |key: &str| entries.get(key).and_then(toml::Value::as_integer);
        if let (Some(min), Some(max)) = (get("min_rpm"), get("max_rpm")) {
            if min == 0 || min > max {
                errors.push(format!("[{}] needs 0 < min_rpm <= max_rpm", section));
            }
        }
    }
}

fn validate_table(
    section: &str,
    value: &toml::Value,
    keys: &[(&str, i64)],
    errors: &mut Vec<String>,
) {
    let Some(entries) = value.as_table() else {
        errors.push(format!("[{}] must be a table", section));
        return;
    };
    for (key, value) in entries {
        check_integer(section, key, value, keys, errors);
    }
}

fn check_integer(
    section: &str,
    key: &str,
    value: &toml::Value,
    keys: &[(&str, i64)],
    errors: &mut Vec<String>,
) {
    let Some((_, max)) = keys.iter().find(|(name, _)| *name == key) else {
        errors.push(format!("[{}] unknown key '{}'", section, key));
        return;
    };
    match value.as_integer() {
        Some(v) if (0..=*max).contains(&v) => {}
        Some(_) => errors.push(format!("[{}] {} must be 0-{}", section, key, max)),
        None => errors.push(format!("[{}] {} must be an integer", section, key)),
    }
}

/// Abort the build with a boxed list of problems
fn report(title: &str, lines: &[String]) -> ! {
    let body = lines
        .iter()
        .map(|line| {
            let line = if line.len() > 62 {
                format!("{}...", &line[..59])
            } else {
                line.clone()
            };
            format!("║  • {:<62} ║", line)
        })
        .collect::<Vec<_>>()
        .join("\n");

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}
