//! Configuration types
//!
//! Board-agnostic game configuration, loaded from `game.toml` text.

pub mod toml;
pub mod types;

pub use self::toml::{parse_config, ParseError, ParseErrorKind};
pub use types::*;
