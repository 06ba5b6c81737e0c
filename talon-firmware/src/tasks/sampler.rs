//! Analog sampler task
//!
//! One scan per request: joystick X and Y, then both photoresistors. The
//! RP2040 ADC is 12-bit; values are scaled down to the 10-bit range the game
//! logic is calibrated for.

use defmt::*;
use embassy_rp::adc::{Adc, Async, Channel};

use talon_core::shared::AnalogChannel;

use crate::channels::{SAMPLES, SAMPLE_READY, SAMPLE_REQUEST};

/// 12-bit to 10-bit
const ADC_SHIFT: u16 = 2;

/// Sampler task
///
/// `inputs` are in [`AnalogChannel::ALL`] order. A scan runs to the end
/// even if the game task gave up on it; its writes are then dropped by the
/// handoff, and the newest request is picked up next.
#[embassy_executor::task]
pub async fn sampler_task(mut adc: Adc<'static, Async>, mut inputs: [Channel<'static>; 4]) {
    info!("Sampler task started");

    loop {
        let ticket = SAMPLE_REQUEST.wait().await;

        for (channel, input) in AnalogChannel::ALL.into_iter().zip(inputs.iter_mut()) {
            match adc.read(input).await {
                Ok(raw) => {
                    if SAMPLES.publish(ticket, channel, raw >> ADC_SHIFT) {
                        SAMPLE_READY.signal(());
                    }
                }
                Err(_) => {
                    // Scan stays incomplete; the game task times out and retries
                    warn!("ADC conversion failed on {:?}", channel);
                    break;
                }
            }
        }
    }
}
