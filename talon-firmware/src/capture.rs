//! Free-running capture counter
//!
//! The drop bonus is measured in ticks of a wrapping counter running at
//! `capture_hz`. It is derived from the embassy time base, so the button
//! task and the game task read the same counter without sharing a timer.

use embassy_time::{Instant, TICK_HZ};
use talon_core::config::BonusConfig;

/// Current counter value
pub fn now(bonus: &BonusConfig) -> u16 {
    let ticks = Instant::now().as_ticks() as u128 * bonus.capture_hz as u128 / TICK_HZ as u128;
    // Validation caps the modulus at 65536
    (ticks % bonus.counter_modulus as u128) as u16
}
