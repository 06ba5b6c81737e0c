//! Axis step generator task
//!
//! One instance per axis. Sleeps until the next step is due or a new
//! command arrives, whichever comes first, and drives the next half-step
//! pattern onto the ULN2003 coils. The step deadline advances by a whole
//! period each time so the average rate does not drift with task latency.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Output;
use embassy_time::{Duration, Instant, Timer, TICK_HZ};

use talon_core::config::AxisConfig;
use talon_core::motion::{Axis, AxisId};
use talon_core::traits::AxisDriver;
use talon_drivers::stepper::Uln2003;

use crate::channels::AXIS_CMD;

/// Axis task
#[embassy_executor::task(pool_size = 2)]
pub async fn axis_task(id: AxisId, config: AxisConfig, mut coils: Uln2003<Output<'static>>) {
    info!("{:?} axis task started", id);

    let command = &AXIS_CMD[id.index()];
    let mut axis = Axis::new(config);
    let mut next_step = Instant::now();

    loop {
        let Some(period) = axis.step_period_ticks(TICK_HZ) else {
            // Disabled: coils hold their phase until the next command
            let cmd = command.wait().await;
            axis.apply(&cmd);
            next_step = Instant::now();
            debug!("{:?} axis {:?}", id, cmd);
            continue;
        };

        match select(command.wait(), Timer::at(next_step)).await {
            Either::First(cmd) => {
                axis.apply(&cmd);
                debug!("{:?} axis {:?}", id, cmd);
            }
            Either::Second(()) => {
                if let Some(pattern) = axis.on_step() {
                    if let Err(e) = coils.write_pattern(pattern) {
                        error!("{:?} axis coil write failed: {:?}", id, e);
                    }
                }
                next_step += Duration::from_ticks(period);
                // Fell behind (speed change or long stall): restart the cadence
                let now = Instant::now();
                if next_step < now {
                    next_step = now;
                }
            }
        }

        if !axis.is_enabled() {
            trace!("{:?} axis stopped at pattern {=u8:b}", id, axis.pattern());
        }
    }
}
