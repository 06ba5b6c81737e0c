//! Embedded game configuration
//!
//! `game.toml` is compiled into the image (and checked by `build.rs`). It is
//! parsed once at boot; anything the parser or validator rejects falls back
//! to the built-in defaults so the machine stays playable.

use defmt::*;
use talon_core::config::{parse_config, GameConfig};

/// Embedded configuration text
/// Edit game.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../../game.toml");

/// Parse and validate the embedded configuration
pub fn load() -> GameConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            warn!("game.toml line {}: {:?}, using defaults", e.line, e.kind);
            return GameConfig::default();
        }
    };

    match config.validate() {
        Ok(()) => {
            info!("Parsed embedded configuration");
            config
        }
        Err(e) => {
            warn!("game.toml rejected: {:?}, using defaults", e);
            GameConfig::default()
        }
    }
}
