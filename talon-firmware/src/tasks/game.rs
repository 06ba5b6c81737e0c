//! Game loop task
//!
//! Owns the [`GameController`]. Each iteration snapshots the shared inputs
//! (round clock, button, a fresh analog scan during play), polls the
//! controller, and fans the result out: clock reloads and the published
//! phase, gripper positions, axis commands and the status text.

use defmt::*;
use embassy_time::{with_timeout, Duration, Timer};

use talon_core::config::{BonusConfig, GameConfig};
use talon_core::game::{GameController, LoopInput, Transition};
use talon_core::motion::AxisId;
use talon_core::shared::{AnalogSample, SampleError};

use crate::capture;
use crate::channels::{
    AXIS_CMD, BUTTON, GRIPPER_CMD, PHASE, ROUND_CLOCK, SAMPLES, SAMPLE_READY, SAMPLE_REQUEST,
    STATUS_TEXT,
};

/// Game task
#[embassy_executor::task]
pub async fn game_task(config: GameConfig) {
    info!("Game task started");

    let idle = Duration::from_millis(config.timing.loop_period_ms as u64);
    let sample_timeout = Duration::from_micros(config.sensors.sample_timeout_us as u64);
    let bonus = config.bonus;

    let mut game = GameController::new(config);
    let boot = game.boot();
    apply_transition(&game, &boot).await;
    publish_axes(&game);
    publish_status(&game);

    loop {
        let sample = if game.needs_sample() {
            acquire_sample(sample_timeout).await
        } else {
            None
        };

        let input = snapshot(&game, &bonus, sample);
        let step = game.poll(&input);

        if let Some(transition) = step.transition {
            apply_transition(&game, &transition).await;
        }
        if step.axes_changed {
            publish_axes(&game);
        }
        if step.refresh_display {
            publish_status(&game);
        }

        if sample.is_none() {
            Timer::after(idle).await;
        }
    }
}

/// Gather one iteration's inputs from the shared cells
fn snapshot(
    game: &GameController,
    bonus: &BonusConfig,
    sample: Option<AnalogSample>,
) -> LoopInput {
    LoopInput {
        clock_s: ROUND_CLOCK.remaining(),
        refresh_due: ROUND_CLOCK.take_refresh(),
        sample,
        // Only consumed on a result screen, so a stale request cannot cut a
        // later round short
        reset_requested: game.awaiting_reset() && BUTTON.take_reset_request(),
        capture_ticks: capture::now(bonus),
        last_press: BUTTON.last_press(),
    }
}

/// Request one scan and wait for it, bounded by `timeout`
async fn acquire_sample(timeout: Duration) -> Option<AnalogSample> {
    SAMPLE_READY.reset();
    let ticket = match SAMPLES.request() {
        Ok(ticket) => ticket,
        Err(e) => {
            warn!("Sample request refused: {:?}", e);
            SAMPLES.abandon();
            return None;
        }
    };
    SAMPLE_REQUEST.signal(ticket);

    match with_timeout(timeout, SAMPLE_READY.wait()).await {
        Ok(()) => SAMPLES.take(),
        Err(_) => {
            warn!("Sample {:?}, retrying", SampleError::Timeout);
            SAMPLES.abandon();
            None
        }
    }
}

/// Carry out the entry actions of a state change
async fn apply_transition(game: &GameController, transition: &Transition) {
    if let Some(seconds) = transition.clock_reload {
        ROUND_CLOCK.reload(seconds);
    }
    PHASE.publish(game.phase());

    info!(
        "{:?} -> {:?} on {:?} (round {}, clock {} s)",
        transition.from,
        transition.to,
        transition.event,
        game.round(),
        transition.clock_s
    );
    if let Some(score) = transition.score {
        info!(
            "Round {} won: base {} + bonus {} = {}",
            game.round(),
            score.base_s,
            score.bonus,
            score.total
        );
    }

    if let Some(command) = transition.gripper {
        GRIPPER_CMD.send(command).await;
    }
}

fn publish_axes(game: &GameController) {
    for id in AxisId::ALL {
        let command = game.axis(id);
        trace!("{:?} axis command {:?}", id, command);
        AXIS_CMD[id.index()].signal(command);
    }
}

fn publish_status(game: &GameController) {
    STATUS_TEXT.signal(game.status(ROUND_CLOCK.remaining()));
}
