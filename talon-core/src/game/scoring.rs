//! Round scoring and drop-height bonus
//!
//! The base score is the time left on the round clock when the drop is
//! detected. A bonus is added for objects that were let go from height: the
//! longer the fall between the gripper opening and the sensors going dark,
//! the higher the bonus.
//!
//! Falls are timed with the free-running capture counter, which wraps. Only
//! one wrap is accounted for, which bounds any meaningful fall to less than
//! one counter period.

use crate::config::BonusConfig;
use crate::shared::PressRecord;

/// Score of a winning round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScoreResult {
    /// Round-clock seconds remaining at the win
    pub base_s: u16,
    /// Drop-height bonus
    pub bonus: u16,
    /// base_s + bonus
    pub total: u16,
}

/// Capture-counter ticks from `last` to `win`, allowing one wrap
///
/// Equal readings count as a full wrap.
pub fn elapsed_ticks(config: &BonusConfig, win_ticks: u32, last_ticks: u32) -> u32 {
    if win_ticks <= last_ticks {
        win_ticks + config.counter_modulus.saturating_sub(last_ticks)
    } else {
        win_ticks - last_ticks
    }
}

/// Bonus points for one drop
pub fn drop_bonus(
    config: &BonusConfig,
    win_clock_s: u16,
    win_ticks: u32,
    press_clock_s: u16,
    press_ticks: u32,
) -> u16 {
    // Releases well before the drop was detected are not drops
    if press_clock_s.saturating_sub(win_clock_s) >= config.gate_s {
        return 0;
    }

    let elapsed = elapsed_ticks(config, win_ticks, press_ticks);
    if elapsed <= config.cutoff_ticks || elapsed >= config.ceiling_ticks {
        return 0;
    }

    ((elapsed - config.cutoff_ticks) / config.scale_ticks.max(1)).min(u16::MAX as u32) as u16
}

/// Score a winning round
///
/// `press` must be the last gripper-toggling press of `round`; a record from
/// any other round earns no bonus.
pub fn score_round(
    config: &BonusConfig,
    round: u16,
    win_clock_s: u16,
    win_ticks: u16,
    press: Option<PressRecord>,
) -> ScoreResult {
    let bonus = match press {
        Some(p) if p.round == round => drop_bonus(
            config,
            win_clock_s,
            win_ticks as u32,
            p.clock_s,
            p.capture_ticks as u32,
        ),
        _ => 0,
    };

    ScoreResult {
        base_s: win_clock_s,
        bonus,
        total: win_clock_s.saturating_add(bonus),
    }
}
