//! Button capture task
//!
//! Timestamps every edge with the capture counter and the round clock, waits
//! out contact bounce, then classifies the settled level. Presses flip the
//! indicator LED; presses during play toggle the gripper.

use defmt::*;
use embassy_rp::gpio::{Input, Output};
use embassy_time::{Duration, Timer};

use talon_core::config::BonusConfig;
use talon_core::shared::EdgeAction;
use talon_core::traits::GripperCommand;

use crate::capture;
use crate::channels::{BUTTON, GRIPPER_CMD, PHASE, ROUND_CLOCK};

/// Button task
///
/// The button is active low (pull-up, switch to ground).
#[embassy_executor::task]
pub async fn button_task(
    mut button: Input<'static>,
    mut indicator: Output<'static>,
    debounce_ms: u16,
    bonus: BonusConfig,
) {
    info!("Button task started");

    let debounce = Duration::from_millis(debounce_ms as u64);

    loop {
        button.wait_for_any_edge().await;
        let capture_ticks = capture::now(&bonus);
        let clock_s = ROUND_CLOCK.remaining();

        Timer::after(debounce).await;

        let action = BUTTON.on_edge(button.is_low(), capture_ticks, PHASE.load(), clock_s);
        if action.toggles_indicator() {
            indicator.toggle();
        }

        match action {
            EdgeAction::ToggleGripper(press) => {
                debug!(
                    "Press in round {} at {} s, counter {}",
                    press.round, press.clock_s, press.capture_ticks
                );
                GRIPPER_CMD.send(GripperCommand::Toggle).await;
            }
            EdgeAction::ResetRequested => debug!("Reset requested"),
            EdgeAction::Ignored => trace!("Press ignored"),
            EdgeAction::Released | EdgeAction::Bounce => {}
        }
    }
}
