//! Button edge capture
//!
//! The button source is the only writer of the press/release state, the last
//! press record, and the reset-request flag. It reads the published
//! [`Phase`] to decide what a press means.

use super::flag::Flag;
use super::phase::Phase;
use crate::state::GameState;
use core::cell::Cell;
use critical_section::Mutex;
use portable_atomic::{AtomicBool, Ordering};

/// Timing of the most recent gripper-toggling press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressRecord {
    /// Free-running capture counter at the edge
    pub capture_ticks: u16,
    /// Round-clock seconds remaining at the edge
    pub clock_s: u16,
    /// Round the press belongs to
    pub round: u16,
}

/// What a debounced edge asks the rest of the system to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeAction {
    /// Button let go; nothing else happens
    Released,
    /// Edge with no change of level (contact bounce)
    Bounce,
    /// Press during play: toggle the gripper
    ToggleGripper(PressRecord),
    /// Press on a result screen: start over
    ResetRequested,
    /// Press while resetting or counting down
    Ignored,
}

impl EdgeAction {
    /// The indicator flips on every press, whatever the phase
    pub fn toggles_indicator(&self) -> bool {
        !matches!(self, EdgeAction::Released | EdgeAction::Bounce)
    }
}

/// Button state shared with the game loop
pub struct ButtonCapture {
    pressed: AtomicBool,
    last_press: Mutex<Cell<Option<PressRecord>>>,
    reset: Flag,
}

impl ButtonCapture {
    pub const fn new() -> Self {
        Self {
            pressed: AtomicBool::new(false),
            last_press: Mutex::new(Cell::new(None)),
            reset: Flag::new(),
        }
    }

    /// Handle one debounced edge (button source only)
    ///
    /// `pressed` is the button level after the edge.
    pub fn on_edge(
        &self,
        pressed: bool,
        capture_ticks: u16,
        phase: Phase,
        clock_s: u16,
    ) -> EdgeAction {
        let was_pressed = self.pressed.swap(pressed, Ordering::AcqRel);
        if pressed == was_pressed {
            return EdgeAction::Bounce;
        }
        if !pressed {
            return EdgeAction::Released;
        }

        match phase.state {
            GameState::Playing => {
                let record = PressRecord {
                    capture_ticks,
                    clock_s,
                    round: phase.round,
                };
                critical_section::with(|cs| self.last_press.borrow(cs).set(Some(record)));
                EdgeAction::ToggleGripper(record)
            }
            GameState::Won | GameState::Lost => {
                self.reset.raise();
                EdgeAction::ResetRequested
            }
            GameState::Resetting | GameState::ReadyCountdown => EdgeAction::Ignored,
        }
    }

    /// Check whether the button is currently held
    pub fn is_pressed(&self) -> bool {
        self.pressed.load(Ordering::Acquire)
    }

    /// Most recent gripper-toggling press, from any round
    pub fn last_press(&self) -> Option<PressRecord> {
        critical_section::with(|cs| self.last_press.borrow(cs).get())
    }

    /// Consume a pending reset request
    pub fn take_reset_request(&self) -> bool {
        self.reset.take()
    }
}

impl Default for ButtonCapture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phase(state: GameState, round: u16) -> Phase {
        Phase { state, round }
    }

    #[test]
    fn test_press_during_play_records() {
        let button = ButtonCapture::new();
        let action = button.on_edge(true, 1234, phase(GameState::Playing, 3), 42);
        let record = PressRecord {
            capture_ticks: 1234,
            clock_s: 42,
            round: 3,
        };
        assert_eq!(action, EdgeAction::ToggleGripper(record));
        assert_eq!(button.last_press(), Some(record));
        assert!(button.is_pressed());
    }

    #[test]
    fn test_release_only_updates_state() {
        let button = ButtonCapture::new();
        button.on_edge(true, 10, phase(GameState::Playing, 1), 50);
        let action = button.on_edge(false, 20, phase(GameState::Playing, 1), 50);
        assert_eq!(action, EdgeAction::Released);
        assert!(!action.toggles_indicator());
        assert_eq!(button.last_press().unwrap().capture_ticks, 10);
        assert!(!button.is_pressed());
    }

    #[test]
    fn test_press_on_result_requests_reset() {
        let button = ButtonCapture::new();
        let action = button.on_edge(true, 0, phase(GameState::Lost, 1), 0);
        assert_eq!(action, EdgeAction::ResetRequested);
        assert!(button.take_reset_request());
        assert!(!button.take_reset_request());
        assert_eq!(button.last_press(), None);
    }

    #[test]
    fn test_press_while_resetting_only_flips_indicator() {
        let button = ButtonCapture::new();
        let action = button.on_edge(true, 0, phase(GameState::Resetting, 0), 7);
        assert_eq!(action, EdgeAction::Ignored);
        assert!(action.toggles_indicator());
        assert!(!button.take_reset_request());
    }

    #[test]
    fn test_repeated_press_level_is_not_a_new_press() {
        let button = ButtonCapture::new();
        button.on_edge(true, 1, phase(GameState::Won, 1), 0);
        button.take_reset_request();
        assert_eq!(
            button.on_edge(true, 2, phase(GameState::Won, 1), 0),
            EdgeAction::Bounce
        );
        assert!(!button.take_reset_request());
    }
}
