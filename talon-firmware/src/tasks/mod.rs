//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod axis;
pub mod button;
pub mod display;
pub mod game;
pub mod gripper;
pub mod sampler;
pub mod tick;

pub use axis::axis_task;
pub use button::button_task;
pub use display::display_task;
pub use game::game_task;
pub use gripper::gripper_task;
pub use sampler::sampler_task;
pub use tick::tick_task;
