//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in talon-core, written against `embedded-hal` 1.0:
//!
//! - Stepper coil output (ULN2003 darlington array)
//! - Gripper servo on a PWM channel
//! - HD44780 character LCD in 4-bit mode

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod display;
pub mod error;
pub mod gripper;
pub mod stepper;

pub use error::DriverError;
