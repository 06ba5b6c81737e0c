//! State machine definition
//!
//! All motor, gripper, and display behavior is a function of the current
//! state and an event.

use super::events::Event;
use crate::config::TimingConfig;

/// Game states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GameState {
    /// Claw driven back to its origin, gripper open
    Resetting,
    /// Countdown before the round, gripper closed
    ReadyCountdown,
    /// Player is steering the claw
    Playing,
    /// Object dropped into the cup; score shown
    Won,
    /// Round clock ran out
    Lost,
}

impl GameState {
    /// Check if this state allows joystick-driven motion
    pub fn joystick_allowed(&self) -> bool {
        matches!(self, GameState::Playing)
    }

    /// Check if this is a result screen waiting for the player
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameState::Won | GameState::Lost)
    }

    /// Round-clock reload applied when this state is entered
    ///
    /// Result screens are not timed and keep whatever is on the clock.
    pub fn phase_seconds(&self, timing: &TimingConfig) -> Option<u16> {
        match self {
            GameState::Resetting => Some(timing.reset_s),
            GameState::ReadyCountdown => Some(timing.countdown_s),
            GameState::Playing => Some(timing.play_s),
            GameState::Won | GameState::Lost => None,
        }
    }

    /// Compact encoding for sharing through an atomic
    pub const fn as_u8(self) -> u8 {
        match self {
            GameState::Resetting => 0,
            GameState::ReadyCountdown => 1,
            GameState::Playing => 2,
            GameState::Won => 3,
            GameState::Lost => 4,
        }
    }

    /// Decode from [`as_u8`](Self::as_u8); unknown values map to Resetting
    pub const fn from_u8(value: u8) -> Self {
        match value {
            1 => GameState::ReadyCountdown,
            2 => GameState::Playing,
            3 => GameState::Won,
            4 => GameState::Lost,
            _ => GameState::Resetting,
        }
    }

    /// Process an event and return the next state
    ///
    /// This is the core state transition logic.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use GameState::*;

        match (self, event) {
            // Power-on always starts by homing the claw
            (_, PowerOn) => Resetting,

            // Timed phases
            (Resetting, ClockExpired) => ReadyCountdown,
            (ReadyCountdown, ClockExpired) => Playing,
            (Playing, ClockExpired) => Lost,

            // Drop detected during play
            (Playing, ObjectDetected) => Won,

            // Result screens only leave on an explicit request
            (Won, ResetRequested) => Resetting,
            (Lost, ResetRequested) => Resetting,

            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [GameState; 5] = [
        GameState::Resetting,
        GameState::ReadyCountdown,
        GameState::Playing,
        GameState::Won,
        GameState::Lost,
    ];

    #[test]
    fn test_round_flow() {
        let state = GameState::Resetting;
        let state = state.transition(Event::ClockExpired);
        assert_eq!(state, GameState::ReadyCountdown);
        let state = state.transition(Event::ClockExpired);
        assert_eq!(state, GameState::Playing);
        let state = state.transition(Event::ObjectDetected);
        assert_eq!(state, GameState::Won);
        let state = state.transition(Event::ResetRequested);
        assert_eq!(state, GameState::Resetting);
    }

    #[test]
    fn test_timeout_loses() {
        assert_eq!(
            GameState::Playing.transition(Event::ClockExpired),
            GameState::Lost
        );
        assert_eq!(
            GameState::Lost.transition(Event::ResetRequested),
            GameState::Resetting
        );
    }

    #[test]
    fn test_result_screens_ignore_timer() {
        for state in [GameState::Won, GameState::Lost] {
            assert_eq!(state.transition(Event::ClockExpired), state);
            assert_eq!(state.transition(Event::ObjectDetected), state);
        }
    }

    #[test]
    fn test_reset_request_ignored_outside_results() {
        for state in [
            GameState::Resetting,
            GameState::ReadyCountdown,
            GameState::Playing,
        ] {
            assert_eq!(state.transition(Event::ResetRequested), state);
        }
    }

    #[test]
    fn test_detection_only_counts_during_play() {
        assert_eq!(
            GameState::ReadyCountdown.transition(Event::ObjectDetected),
            GameState::ReadyCountdown
        );
        assert_eq!(
            GameState::Resetting.transition(Event::ObjectDetected),
            GameState::Resetting
        );
    }

    #[test]
    fn test_every_state_reaches_resetting() {
        // Timers first, then the player's button; at most four steps
        for start in ALL {
            let mut state = start;
            for _ in 0..4 {
                if state == GameState::Resetting {
                    break;
                }
                state = if state.is_terminal() {
                    state.transition(Event::ResetRequested)
                } else {
                    state.transition(Event::ClockExpired)
                };
            }
            assert_eq!(state, GameState::Resetting, "stuck starting from {:?}", start);
        }
    }

    #[test]
    fn test_power_on_from_anywhere() {
        for state in ALL {
            assert_eq!(state.transition(Event::PowerOn), GameState::Resetting);
        }
    }

    #[test]
    fn test_u8_encoding() {
        for state in ALL {
            assert_eq!(GameState::from_u8(state.as_u8()), state);
        }
    }

    #[test]
    fn test_phase_seconds() {
        let timing = TimingConfig::default();
        assert_eq!(GameState::Resetting.phase_seconds(&timing), Some(10));
        assert_eq!(GameState::ReadyCountdown.phase_seconds(&timing), Some(3));
        assert_eq!(GameState::Playing.phase_seconds(&timing), Some(80));
        assert_eq!(GameState::Won.phase_seconds(&timing), None);
    }
}
