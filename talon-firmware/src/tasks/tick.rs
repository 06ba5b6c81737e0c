//! Round-clock tick task
//!
//! Ticks the round clock at `ticks_per_second`. Every tick raises the
//! display-refresh flag; every full second decrements the remaining time.

use defmt::*;
use embassy_time::{Duration, Ticker};

use crate::channels::ROUND_CLOCK;

/// Tick task - drives the round clock
#[embassy_executor::task]
pub async fn tick_task(interval_ms: u32) {
    info!("Tick task started ({} ms)", interval_ms);

    let mut ticker = Ticker::every(Duration::from_millis(interval_ms as u64));

    loop {
        ticker.next().await;

        if ROUND_CLOCK.on_tick() {
            trace!("Round clock: {} s", ROUND_CLOCK.remaining());
        }
    }
}
