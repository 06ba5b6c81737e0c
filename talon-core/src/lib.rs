//! Board-agnostic core logic for the claw game firmware
//!
//! This crate contains all game logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (axis, gripper, text display)
//! - Game state machine and round controller
//! - Drop-height bonus scoring
//! - Joystick to axis-command mapping
//! - Axis model and half-step sequencing
//! - Single-writer handoff cells shared with interrupt-side producers
//! - Configuration types and the `game.toml` parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod game;
pub mod motion;
pub mod shared;
pub mod state;
pub mod traits;
pub mod ui;
