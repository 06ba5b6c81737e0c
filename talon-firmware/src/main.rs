//! Talon - Claw Game Firmware
//!
//! Main firmware binary for an RP2040 claw machine: joystick-driven X/Y
//! gantry on two 28BYJ-48 steppers, a servo gripper, a pair of
//! photoresistors in the prize chute, and a 2x16 status LCD.
//!
//! Pin map:
//! - GPIO2-5: X coils (ULN2003 IN1-IN4), GPIO6-9: Y coils
//! - GPIO10: LCD RS, GPIO11: LCD E, GPIO12-15: LCD D4-D7
//! - GPIO16: button (to ground), GPIO25: indicator LED
//! - GPIO18: gripper servo (PWM slice 1 A)
//! - GPIO26/27: joystick X/Y, GPIO28/29: photoresistors A/B

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig, InterruptHandler as AdcInterruptHandler};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_time::Delay;
use fixed::types::U12F4;
use {defmt_rtt as _, panic_probe as _};

use talon_core::config::GripperConfig;
use talon_core::motion::AxisId;
use talon_drivers::display::Hd44780;
use talon_drivers::gripper::ServoGripper;
use talon_drivers::stepper::Uln2003;

mod capture;
mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    ADC_IRQ_FIFO => AdcInterruptHandler;
});

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Talon firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();
    channels::ROUND_CLOCK.set_ticks_per_second(config.timing.ticks_per_second);
    info!(
        "Phases {}/{}/{} s, {} ticks/s",
        config.timing.reset_s,
        config.timing.countdown_s,
        config.timing.play_s,
        config.timing.ticks_per_second
    );

    // Analog inputs, in AnalogChannel::ALL order
    let adc = Adc::new(p.ADC, Irqs, AdcConfig::default());
    let inputs = [
        Channel::new_pin(p.PIN_26, Pull::None),
        Channel::new_pin(p.PIN_27, Pull::None),
        Channel::new_pin(p.PIN_28, Pull::None),
        Channel::new_pin(p.PIN_29, Pull::None),
    ];

    let x_coils = Uln2003::new([
        Output::new(p.PIN_2, Level::Low),
        Output::new(p.PIN_3, Level::Low),
        Output::new(p.PIN_4, Level::Low),
        Output::new(p.PIN_5, Level::Low),
    ])
    .unwrap();
    let y_coils = Uln2003::new([
        Output::new(p.PIN_6, Level::Low),
        Output::new(p.PIN_7, Level::Low),
        Output::new(p.PIN_8, Level::Low),
        Output::new(p.PIN_9, Level::Low),
    ])
    .unwrap();
    info!("Stepper outputs initialized");

    let pwm = Pwm::new_output_a(p.PWM_SLICE1, p.PIN_18, servo_pwm_config(&config.gripper));
    let (servo_pwm, _) = pwm.split();
    let gripper = ServoGripper::new(servo_pwm.unwrap(), config.gripper).unwrap();
    info!("Gripper servo initialized");

    let lcd = Hd44780::new(
        Output::new(p.PIN_10, Level::Low),
        Output::new(p.PIN_11, Level::Low),
        [
            Output::new(p.PIN_12, Level::Low),
            Output::new(p.PIN_13, Level::Low),
            Output::new(p.PIN_14, Level::Low),
            Output::new(p.PIN_15, Level::Low),
        ],
        Delay,
    );

    let button = Input::new(p.PIN_16, Pull::Up);
    let indicator = Output::new(p.PIN_25, Level::Low);

    // Spawn tasks
    spawner
        .spawn(tasks::tick_task(config.timing.tick_interval_ms()))
        .unwrap();
    spawner.spawn(tasks::sampler_task(adc, inputs)).unwrap();
    spawner
        .spawn(tasks::button_task(
            button,
            indicator,
            config.input.debounce_ms,
            config.bonus,
        ))
        .unwrap();
    spawner
        .spawn(tasks::axis_task(AxisId::X, config.axis_x, x_coils))
        .unwrap();
    spawner
        .spawn(tasks::axis_task(AxisId::Y, config.axis_y, y_coils))
        .unwrap();
    spawner.spawn(tasks::gripper_task(gripper)).unwrap();
    spawner.spawn(tasks::display_task(lcd)).unwrap();
    spawner.spawn(tasks::game_task(config)).unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// PWM slice running at 1 MHz with a top of one servo period
///
/// One count per microsecond keeps pulse widths exact.
fn servo_pwm_config(gripper: &GripperConfig) -> PwmConfig {
    let mut cfg = PwmConfig::default();
    cfg.divider = U12F4::from_num(embassy_rp::clocks::clk_sys_freq() / 1_000_000);
    cfg.top = gripper.period_us.saturating_sub(1);
    cfg.compare_a = 0;
    cfg
}
