//! Gripper task
//!
//! Sole owner of the servo. Forced positions from the game task and toggles
//! from the button task arrive on one channel and are applied in order.

use defmt::*;
use embassy_rp::pwm::PwmOutput;

use talon_core::traits::Gripper;
use talon_drivers::gripper::ServoGripper;

use crate::channels::GRIPPER_CMD;

/// Servo on one RP2040 PWM channel
pub type ServoOutput = ServoGripper<PwmOutput<'static>>;

/// Gripper task
#[embassy_executor::task]
pub async fn gripper_task(mut gripper: ServoOutput) {
    info!("Gripper task started");

    loop {
        let command = GRIPPER_CMD.receive().await;
        match gripper.apply(command) {
            Ok(()) => debug!("Gripper {:?} -> {} deg", command, gripper.angle()),
            Err(e) => error!("Gripper {:?} failed: {:?}", command, e),
        }
    }
}
