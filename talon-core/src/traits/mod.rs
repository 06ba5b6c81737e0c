//! Collaborator traits
//!
//! These traits define the interface between the game logic
//! and hardware-specific implementations.

pub mod display;
pub mod gripper;
pub mod stepper;

pub use display::{DisplayError, TextDisplay};
pub use gripper::{Gripper, GripperCommand};
pub use stepper::{AxisDriver, Direction};
