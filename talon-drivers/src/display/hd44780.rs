//! HD44780 character LCD, 4-bit parallel interface
//!
//! Write-only wiring: RS, E and D4-D7. R/W is tied low, so the busy flag is
//! never read and every command is followed by a fixed delay long enough
//! for the controller to finish. The delays are awaited, so a full redraw
//! yields to other tasks between bus cycles.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use talon_core::traits::{DisplayError, TextDisplay};
use talon_core::ui::{Frame, FRAME_CHARS, ROWS};

use crate::error::{pin_err, DriverError};

/// Controller commands
pub mod cmd {
    /// Clear display and return home
    pub const CLEAR: u8 = 0x01;
    /// Increment cursor, no shift
    pub const ENTRY_MODE: u8 = 0x06;
    /// Display on, cursor off, blink off
    pub const DISPLAY_ON: u8 = 0x0C;
    /// 4-bit bus, two lines, 5x8 font
    pub const FUNCTION_SET: u8 = 0x28;
    /// Set DDRAM address (OR with the address)
    pub const SET_DDRAM: u8 = 0x80;
}

/// DDRAM address of the start of each line
const LINE_ADDR: [u8; ROWS] = [0x00, 0x40];

/// Typical instruction execution time
const EXEC_US: u32 = 50;
/// Clear and home take much longer
const CLEAR_US: u32 = 2_000;

/// HD44780 driver
pub struct Hd44780<RS, EN, D, DL> {
    rs: RS,
    en: EN,
    data: [D; 4],
    delay: DL,
    initialized: bool,
}

impl<RS, EN, D, DL> Hd44780<RS, EN, D, DL>
where
    RS: OutputPin,
    EN: OutputPin,
    D: OutputPin,
    DL: DelayNs,
{
    /// Create a driver; call [`init`](Self::init) before writing
    ///
    /// `data` is D4 to D7 in order.
    pub fn new(rs: RS, en: EN, data: [D; 4], delay: DL) -> Self {
        Self {
            rs,
            en,
            data,
            delay,
            initialized: false,
        }
    }

    /// Run the 4-bit initialization sequence and clear the screen
    pub async fn init(&mut self) -> Result<(), DriverError> {
        // Power-on settle time
        self.delay.delay_ms(50).await;
        self.rs.set_low().map_err(pin_err)?;
        self.en.set_low().map_err(pin_err)?;

        // Force 8-bit mode three times, then switch to 4-bit
        self.write_nibble(0x3).await?;
        self.delay.delay_us(4_500).await;
        self.write_nibble(0x3).await?;
        self.delay.delay_us(150).await;
        self.write_nibble(0x3).await?;
        self.write_nibble(0x2).await?;

        self.command(cmd::FUNCTION_SET).await?;
        self.command(cmd::DISPLAY_ON).await?;
        self.command(cmd::CLEAR).await?;
        self.delay.delay_us(CLEAR_US).await;
        self.command(cmd::ENTRY_MODE).await?;

        self.initialized = true;
        Ok(())
    }

    /// Check whether [`init`](Self::init) has completed
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Draw a full frame, line by line
    pub async fn write_frame(&mut self, frame: &Frame) -> Result<(), DriverError> {
        for (row, addr) in LINE_ADDR.iter().enumerate() {
            self.command(cmd::SET_DDRAM | addr).await?;
            for &byte in frame.line(row) {
                self.write_data(byte).await?;
            }
        }
        Ok(())
    }

    async fn command(&mut self, byte: u8) -> Result<(), DriverError> {
        self.rs.set_low().map_err(pin_err)?;
        self.write_byte(byte).await
    }

    async fn write_data(&mut self, byte: u8) -> Result<(), DriverError> {
        self.rs.set_high().map_err(pin_err)?;
        self.write_byte(byte).await
    }

    async fn write_byte(&mut self, byte: u8) -> Result<(), DriverError> {
        self.write_nibble(byte >> 4).await?;
        self.write_nibble(byte & 0x0F).await
    }

    async fn write_nibble(&mut self, nibble: u8) -> Result<(), DriverError> {
        for (bit, pin) in self.data.iter_mut().enumerate() {
            if nibble & (1 << bit) != 0 {
                pin.set_high().map_err(pin_err)?;
            } else {
                pin.set_low().map_err(pin_err)?;
            }
        }
        // Latched on the falling edge of E
        self.en.set_high().map_err(pin_err)?;
        self.delay.delay_us(1).await;
        self.en.set_low().map_err(pin_err)?;
        self.delay.delay_us(EXEC_US).await;
        Ok(())
    }
}

impl<RS, EN, D, DL> TextDisplay for Hd44780<RS, EN, D, DL>
where
    RS: OutputPin,
    EN: OutputPin,
    D: OutputPin,
    DL: DelayNs,
{
    async fn show_text(&mut self, text: &str) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }
        self.write_frame(&Frame::from_text(text)).await?;
        Ok(())
    }

    fn capacity(&self) -> usize {
        FRAME_CHARS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use core::future::Future;
    use core::pin::pin;
    use core::task::{Context, Waker};
    use embassy_futures::{block_on, yield_now};
    use embedded_hal::digital::ErrorType;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;
    use std::task::Wake;

    /// Bus levels plus every (rs, nibble) latched on a falling E edge
    #[derive(Default)]
    struct Bus {
        rs: bool,
        en: bool,
        data: [bool; 4],
        latched: Vec<(bool, u8)>,
    }

    #[derive(Clone, Copy)]
    enum Line {
        Rs,
        En,
        Data(usize),
    }

    struct BusPin {
        line: Line,
        bus: Rc<RefCell<Bus>>,
    }

    impl ErrorType for BusPin {
        type Error = Infallible;
    }

    impl BusPin {
        fn drive(&mut self, level: bool) {
            let mut bus = self.bus.borrow_mut();
            match self.line {
                Line::Rs => bus.rs = level,
                Line::Data(i) => bus.data[i] = level,
                Line::En => {
                    if bus.en && !level {
                        let nibble = bus
                            .data
                            .iter()
                            .enumerate()
                            .fold(0u8, |n, (i, &b)| n | ((b as u8) << i));
                        let rs = bus.rs;
                        bus.latched.push((rs, nibble));
                    }
                    bus.en = level;
                }
            }
        }
    }

    impl OutputPin for BusPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.drive(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.drive(true);
            Ok(())
        }
    }

    /// Delay that hands control back to the executor once per call
    #[derive(Default)]
    struct YieldDelay {
        calls: usize,
    }

    impl DelayNs for YieldDelay {
        async fn delay_ns(&mut self, _ns: u32) {
            self.calls += 1;
            yield_now().await;
        }
    }

    type TestLcd = Hd44780<BusPin, BusPin, BusPin, YieldDelay>;

    fn lcd() -> (TestLcd, Rc<RefCell<Bus>>) {
        let bus = Rc::new(RefCell::new(Bus::default()));
        let pin = |line| BusPin {
            line,
            bus: bus.clone(),
        };
        let data = [
            pin(Line::Data(0)),
            pin(Line::Data(1)),
            pin(Line::Data(2)),
            pin(Line::Data(3)),
        ];
        let lcd = Hd44780::new(pin(Line::Rs), pin(Line::En), data, YieldDelay::default());
        (lcd, bus)
    }

    /// Reassemble latched nibbles into (rs, byte) pairs
    fn bytes(nibbles: &[(bool, u8)]) -> Vec<(bool, u8)> {
        nibbles
            .chunks(2)
            .map(|pair| (pair[0].0, (pair[0].1 << 4) | pair[1].1))
            .collect()
    }

    #[test]
    fn test_init_sequence() {
        let (mut lcd, bus) = lcd();
        block_on(lcd.init()).unwrap();
        assert!(lcd.is_initialized());

        let latched = bus.borrow().latched.clone();
        let nibbles: Vec<u8> = latched[..4].iter().map(|&(_, n)| n).collect();
        assert_eq!(nibbles, [0x3, 0x3, 0x3, 0x2]);
        assert_eq!(
            bytes(&latched[4..]),
            [
                (false, cmd::FUNCTION_SET),
                (false, cmd::DISPLAY_ON),
                (false, cmd::CLEAR),
                (false, cmd::ENTRY_MODE),
            ]
        );
    }

    #[test]
    fn test_requires_init() {
        let (mut lcd, _) = lcd();
        assert_eq!(block_on(lcd.show_text("hi")), Err(DisplayError::NotInitialized));
    }

    #[test]
    fn test_show_text_writes_both_lines() {
        let (mut lcd, bus) = lcd();
        block_on(lcd.init()).unwrap();
        bus.borrow_mut().latched.clear();

        block_on(lcd.show_text("WINNER! Score=47 Button=restart")).unwrap();
        let written = bytes(&bus.borrow().latched);
        assert_eq!(written.len(), 2 + FRAME_CHARS);

        assert_eq!(written[0], (false, cmd::SET_DDRAM));
        let line0: Vec<u8> = written[1..17].iter().map(|&(_, b)| b).collect();
        assert_eq!(line0, b"WINNER! Score=47");

        assert_eq!(written[17], (false, cmd::SET_DDRAM | 0x40));
        let line1: Vec<u8> = written[18..].iter().map(|&(_, b)| b).collect();
        assert_eq!(line1, b" Button=restart ");
        assert!(written[18..].iter().all(|&(rs, _)| rs));
    }

    #[test]
    fn test_redraw_yields_between_bus_cycles() {
        let (mut lcd, bus) = lcd();
        block_on(lcd.init()).unwrap();
        lcd.delay.calls = 0;
        bus.borrow_mut().latched.clear();

        let waker = Waker::from(Arc::new(NoopWaker));
        let mut cx = Context::from_waker(&waker);
        {
            let mut redraw = pin!(lcd.show_text("GO! Time: 42"));

            // Parks on the first delay, before E has even fallen once
            assert!(redraw.as_mut().poll(&mut cx).is_pending());
            assert!(bus.borrow().latched.is_empty());

            let mut polls = 1;
            while redraw.as_mut().poll(&mut cx).is_pending() {
                polls += 1;
            }
            // One pending poll per awaited delay
            assert_eq!(polls, 2 * 2 * (2 + FRAME_CHARS));
        }

        // Two delays per nibble, two nibbles per byte
        let written = bus.borrow().latched.len();
        assert_eq!(written, 2 * (2 + FRAME_CHARS));
        assert_eq!(lcd.delay.calls, 2 * written);
    }

    struct NoopWaker;

    impl Wake for NoopWaker {
        fn wake(self: Arc<Self>) {}
    }

    #[test]
    fn test_capacity() {
        let (lcd, _) = lcd();
        assert_eq!(lcd.capacity(), 32);
    }
}
