//! LCD task
//!
//! Initializes the HD44780 and redraws it whenever the game task publishes
//! a new status message.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_time::Delay;

use talon_core::traits::TextDisplay;
use talon_drivers::display::Hd44780;

use crate::channels::STATUS_TEXT;

/// 2x16 LCD on plain GPIO
pub type Lcd = Hd44780<Output<'static>, Output<'static>, Output<'static>, Delay>;

/// Display task
#[embassy_executor::task]
pub async fn display_task(mut lcd: Lcd) {
    info!("Display task started");

    if let Err(e) = lcd.init().await {
        error!("LCD init failed: {:?}", e);
    }

    loop {
        let text = STATUS_TEXT.wait().await;
        if let Err(e) = lcd.show_text(&text).await {
            warn!("LCD write failed: {:?}", e);
        }
    }
}
