//! Display content
//!
//! Status messages and their layout on the 2x16 character LCD.

pub mod frame;
pub mod status;

pub use frame::{Frame, COLUMNS, FRAME_CHARS, ROWS};
pub use status::{status_text, StatusText, STATUS_CAPACITY};
