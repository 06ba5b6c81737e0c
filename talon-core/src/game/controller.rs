//! Round controller
//!
//! Wraps the [`GameState`] transition table with the entry behavior of each
//! state: where the axes go, what the gripper does, how long the phase
//! lasts, and the score when a round is won. The controller is polled once
//! per game-loop iteration with a snapshot of the shared inputs and reports
//! what changed; it never touches hardware itself.

use super::joystick::axis_command;
use super::scoring::{score_round, ScoreResult};
use crate::config::GameConfig;
use crate::motion::{homing_command, AxisCommand, AxisId};
use crate::shared::{AnalogSample, Phase, PressRecord, PHOTO_IDLE};
use crate::state::{Event, GameState};
use crate::traits::GripperCommand;
use crate::ui::{status_text, StatusText};

/// Snapshot of the shared inputs for one loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoopInput {
    /// Round-clock seconds remaining
    pub clock_s: u16,
    /// Update-due flag taken from the round clock
    pub refresh_due: bool,
    /// Fresh analog sample, if one was taken this iteration
    pub sample: Option<AnalogSample>,
    /// Reset-request flag taken from the button
    pub reset_requested: bool,
    /// Capture counter now
    pub capture_ticks: u16,
    /// Most recent gripper-toggling press
    pub last_press: Option<PressRecord>,
}

/// A completed state change and the entry actions it requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    pub from: GameState,
    pub to: GameState,
    pub event: Event,
    /// Round-clock value at the moment of the transition
    pub clock_s: u16,
    /// New round-clock value, for timed states
    pub clock_reload: Option<u16>,
    /// Forced gripper position on entry
    pub gripper: Option<GripperCommand>,
    /// Set when the round was won
    pub score: Option<ScoreResult>,
}

/// Result of one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Step {
    /// State change, if any
    pub transition: Option<Transition>,
    /// Axis commands differ from the previous poll
    pub axes_changed: bool,
    /// The status text should be redrawn
    pub refresh_display: bool,
}

/// Owner of the game state
#[derive(Debug, Clone)]
pub struct GameController {
    config: GameConfig,
    state: GameState,
    round: u16,
    axes: [AxisCommand; 2],
    last_sample: AnalogSample,
    score: Option<ScoreResult>,
}

impl GameController {
    /// Create a controller; call [`boot`](Self::boot) before polling
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            state: GameState::Resetting,
            round: 0,
            axes: [AxisCommand::disabled(); 2],
            last_sample: AnalogSample::idle(),
            score: None,
        }
    }

    /// Enter the first phase
    pub fn boot(&mut self) -> Transition {
        self.enter(Event::PowerOn, 0, &LoopInput::default())
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Number of the current or most recent round
    pub fn round(&self) -> u16 {
        self.round
    }

    /// State and round, for publishing to interrupt-side readers
    pub fn phase(&self) -> Phase {
        Phase {
            state: self.state,
            round: self.round,
        }
    }

    /// Check whether the next poll should carry a fresh sample
    pub fn needs_sample(&self) -> bool {
        self.state.joystick_allowed()
    }

    /// Check whether the controller is waiting for a reset request
    pub fn awaiting_reset(&self) -> bool {
        self.state.is_terminal()
    }

    /// Current commands for both axes
    pub fn axis_commands(&self) -> [AxisCommand; 2] {
        self.axes
    }

    /// Current command for one axis
    pub fn axis(&self, id: AxisId) -> AxisCommand {
        self.axes[id.index()]
    }

    /// Most recent sample seen during play
    pub fn last_sample(&self) -> AnalogSample {
        self.last_sample
    }

    /// Score of the last won round
    pub fn score(&self) -> Option<ScoreResult> {
        self.score
    }

    /// Message for the current state
    pub fn status(&self, clock_s: u16) -> StatusText {
        status_text(self.state, clock_s, self.score.as_ref())
    }

    /// Advance the game by one loop iteration
    pub fn poll(&mut self, input: &LoopInput) -> Step {
        if let Some(event) = self.pending_event(input) {
            let transition = self.enter(event, input.clock_s, input);
            return Step {
                transition: Some(transition),
                axes_changed: true,
                refresh_display: true,
            };
        }

        let mut step = Step::default();
        if !input.refresh_due {
            return step;
        }
        step.refresh_display = true;

        if self.state == GameState::Playing {
            if let Some(sample) = input.sample {
                let next = [
                    axis_command(sample.x, &self.config.axis_x),
                    axis_command(sample.y, &self.config.axis_y),
                ];
                step.axes_changed = next != self.axes;
                self.axes = next;
            }
        }
        step
    }

    fn pending_event(&mut self, input: &LoopInput) -> Option<Event> {
        match self.state {
            GameState::Resetting | GameState::ReadyCountdown => {
                (input.clock_s == 0).then_some(Event::ClockExpired)
            }
            GameState::Playing => {
                if let Some(sample) = input.sample {
                    self.last_sample = sample;
                }
                if input.clock_s == 0 {
                    Some(Event::ClockExpired)
                } else if self.last_sample.is_dark(self.config.sensors.dark_threshold) {
                    Some(Event::ObjectDetected)
                } else {
                    None
                }
            }
            GameState::Won | GameState::Lost => {
                input.reset_requested.then_some(Event::ResetRequested)
            }
        }
    }

    fn enter(&mut self, event: Event, clock_s: u16, input: &LoopInput) -> Transition {
        let from = self.state;
        let to = from.transition(event);
        self.state = to;

        let mut score = None;
        let gripper = match to {
            GameState::Resetting => {
                self.axes = [
                    homing_command(&self.config.axis_x),
                    homing_command(&self.config.axis_y),
                ];
                Some(GripperCommand::Open)
            }
            GameState::ReadyCountdown => {
                self.axes = [AxisCommand::disabled(); 2];
                Some(GripperCommand::Close)
            }
            GameState::Playing => {
                self.round = self.round.wrapping_add(1);
                self.axes = [AxisCommand::disabled(); 2];
                self.last_sample = AnalogSample::idle();
                None
            }
            GameState::Won => {
                self.axes = [AxisCommand::disabled(); 2];
                // Edge-triggered: the dark reading must not win the next round
                self.last_sample.photo_a = PHOTO_IDLE;
                self.last_sample.photo_b = PHOTO_IDLE;
                let result = score_round(
                    &self.config.bonus,
                    self.round,
                    clock_s,
                    input.capture_ticks,
                    input.last_press,
                );
                self.score = Some(result);
                score = Some(result);
                Some(GripperCommand::Open)
            }
            GameState::Lost => {
                self.axes = [AxisCommand::disabled(); 2];
                Some(GripperCommand::Open)
            }
        };

        Transition {
            from,
            to,
            event,
            clock_s,
            clock_reload: to.phase_seconds(&self.config.timing),
            gripper,
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{ButtonCapture, EdgeAction, RoundClock};
    use crate::traits::Direction;

    fn lit(x: u16, y: u16) -> AnalogSample {
        AnalogSample {
            x,
            y,
            photo_a: 800,
            photo_b: 800,
        }
    }

    fn booted() -> GameController {
        let mut game = GameController::new(GameConfig::default());
        game.boot();
        game
    }

    fn at_clock(clock_s: u16) -> LoopInput {
        LoopInput {
            clock_s,
            ..LoopInput::default()
        }
    }

    fn into_play(game: &mut GameController) {
        game.poll(&at_clock(0));
        game.poll(&at_clock(0));
        assert_eq!(game.state(), GameState::Playing);
    }

    #[test]
    fn test_boot_homes_axes_and_opens_gripper() {
        let mut game = GameController::new(GameConfig::default());
        let t = game.boot();
        assert_eq!(t.to, GameState::Resetting);
        assert_eq!(t.clock_reload, Some(10));
        assert_eq!(t.gripper, Some(GripperCommand::Open));

        let [x, y] = game.axis_commands();
        assert!(x.enabled && y.enabled);
        assert_eq!(x.direction, Direction::CounterClockwise);
        assert_eq!(y.direction, Direction::Clockwise);
        assert_eq!(x.rpm_x100, 1500);
    }

    #[test]
    fn test_timed_phases() {
        let mut game = booted();
        assert_eq!(game.poll(&at_clock(4)).transition, None);

        let t = game.poll(&at_clock(0)).transition.unwrap();
        assert_eq!(t.to, GameState::ReadyCountdown);
        assert_eq!(t.clock_reload, Some(3));
        assert_eq!(t.gripper, Some(GripperCommand::Close));
        assert!(!game.axis(AxisId::X).enabled);

        let t = game.poll(&at_clock(0)).transition.unwrap();
        assert_eq!(t.to, GameState::Playing);
        assert_eq!(t.clock_reload, Some(80));
        assert_eq!(t.gripper, None);
        assert_eq!(game.round(), 1);
        assert!(game.needs_sample());
    }

    #[test]
    fn test_joystick_drives_axes_on_refresh() {
        let mut game = booted();
        into_play(&mut game);

        let input = LoopInput {
            clock_s: 70,
            refresh_due: false,
            sample: Some(lit(0, 1023)),
            ..LoopInput::default()
        };
        let step = game.poll(&input);
        assert!(!step.axes_changed);
        assert!(!game.axis(AxisId::X).enabled);

        let step = game.poll(&LoopInput {
            refresh_due: true,
            ..input
        });
        assert!(step.axes_changed && step.refresh_display);
        let [x, y] = game.axis_commands();
        assert_eq!(x.direction, Direction::CounterClockwise);
        assert_eq!(y.direction, Direction::CounterClockwise);
        assert_eq!(x.rpm_x100, 1500);

        let step = game.poll(&LoopInput {
            refresh_due: true,
            ..input
        });
        assert!(!step.axes_changed);
    }

    #[test]
    fn test_timeout_beats_detection() {
        let mut game = booted();
        into_play(&mut game);
        let mut dark = lit(512, 512);
        dark.photo_a = 10;
        let t = game
            .poll(&LoopInput {
                clock_s: 0,
                sample: Some(dark),
                ..LoopInput::default()
            })
            .transition
            .unwrap();
        assert_eq!(t.to, GameState::Lost);
        assert_eq!(t.gripper, Some(GripperCommand::Open));
        assert_eq!(t.clock_reload, None);
        assert!(game.awaiting_reset());
    }

    #[test]
    fn test_win_scores_and_resets_photo_readings() {
        let mut game = booted();
        into_play(&mut game);

        let mut dark = lit(512, 512);
        dark.photo_b = 20;
        let press = PressRecord {
            capture_ticks: 1_000,
            clock_s: 41,
            round: 1,
        };
        let t = game
            .poll(&LoopInput {
                clock_s: 40,
                sample: Some(dark),
                capture_ticks: 7_106,
                last_press: Some(press),
                ..LoopInput::default()
            })
            .transition
            .unwrap();

        assert_eq!(t.to, GameState::Won);
        let score = t.score.unwrap();
        assert_eq!((score.base_s, score.bonus, score.total), (40, 2, 42));
        assert!(!game.last_sample().is_dark(150));
        assert_eq!(game.status(0).as_str(), "WINNER! Score=42 Button=restart");
    }

    #[test]
    fn test_result_waits_for_reset_request() {
        let mut game = booted();
        into_play(&mut game);
        game.poll(&at_clock(0));
        assert_eq!(game.state(), GameState::Lost);

        for _ in 0..5 {
            assert_eq!(game.poll(&at_clock(0)).transition, None);
        }

        let t = game
            .poll(&LoopInput {
                reset_requested: true,
                ..LoopInput::default()
            })
            .transition
            .unwrap();
        assert_eq!(t.to, GameState::Resetting);
        assert_eq!(t.clock_reload, Some(10));
    }

    #[test]
    fn test_reset_request_ignored_while_playing() {
        let mut game = booted();
        into_play(&mut game);
        let step = game.poll(&LoopInput {
            clock_s: 50,
            sample: Some(lit(512, 512)),
            reset_requested: true,
            ..LoopInput::default()
        });
        assert_eq!(step.transition, None);
        assert_eq!(game.state(), GameState::Playing);
    }

    #[test]
    fn test_missing_sample_still_times_out() {
        let mut game = booted();
        into_play(&mut game);
        assert_eq!(game.poll(&at_clock(5)).transition, None);
        assert_eq!(
            game.poll(&at_clock(0)).transition.map(|t| t.to),
            Some(GameState::Lost)
        );
    }

    #[test]
    fn test_full_round_with_shared_cells() {
        let config = GameConfig::default();
        let clock = RoundClock::new(config.timing.ticks_per_second);
        let button = ButtonCapture::new();
        let mut game = GameController::new(config);

        let reload = |t: &Transition| {
            if let Some(s) = t.clock_reload {
                clock.reload(s);
            }
        };
        reload(&game.boot());

        let iterate = |game: &mut GameController, sample: Option<AnalogSample>, ticks: u16| {
            let input = LoopInput {
                clock_s: clock.remaining(),
                refresh_due: clock.take_refresh(),
                sample,
                reset_requested: game.awaiting_reset() && button.take_reset_request(),
                capture_ticks: ticks,
                last_press: button.last_press(),
            };
            let step = game.poll(&input);
            if let Some(t) = &step.transition {
                reload(t);
            }
            step
        };

        // Reset and countdown elapse on the clock alone
        for _ in 0..(10 + 3) * 8 {
            clock.on_tick();
            iterate(&mut game, None, 0);
        }
        iterate(&mut game, Some(lit(512, 512)), 0);
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(clock.remaining(), 80);

        // Open the claw over the cup
        for _ in 0..8 * 5 {
            clock.on_tick();
            iterate(&mut game, Some(lit(512, 512)), 0);
        }
        let action = button.on_edge(true, 2_000, game.phase(), clock.remaining());
        assert!(matches!(action, EdgeAction::ToggleGripper(_)));
        button.on_edge(false, 2_100, game.phase(), clock.remaining());

        let mut dark = lit(512, 512);
        dark.photo_a = 90;
        let step = iterate(&mut game, Some(dark), 15_109);
        assert_eq!(step.transition.unwrap().score.unwrap().bonus, 9);
        assert_eq!(game.state(), GameState::Won);

        // Only a button press leaves the result screen
        for _ in 0..8 * 20 {
            clock.on_tick();
            iterate(&mut game, None, 0);
        }
        assert_eq!(game.state(), GameState::Won);
        button.on_edge(true, 0, game.phase(), clock.remaining());
        iterate(&mut game, None, 0);
        assert_eq!(game.state(), GameState::Resetting);
        assert_eq!(clock.remaining(), 10);
    }
}
