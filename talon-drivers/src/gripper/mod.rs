//! Gripper actuator implementations

pub mod servo;

pub use servo::{pulse_width_us, ServoGripper};
