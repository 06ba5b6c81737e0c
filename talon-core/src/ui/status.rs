//! Status line text for each game state

use core::fmt::Write;
use heapless::String;

use crate::game::ScoreResult;
use crate::state::GameState;

/// Room for the longest message with a five-digit number
pub const STATUS_CAPACITY: usize = 40;

/// Rendered status message
pub type StatusText = String<STATUS_CAPACITY>;

/// Render the message shown while in `state`
///
/// `clock_s` is the round clock; `score` is only used on the win screen.
pub fn status_text(state: GameState, clock_s: u16, score: Option<&ScoreResult>) -> StatusText {
    let mut text = StatusText::new();
    // Capacity covers every message, so formatting cannot overflow
    let _ = match state {
        GameState::Resetting => write!(text, "Resetting... {}", clock_s),
        GameState::ReadyCountdown => write!(text, "Starting in... {}", clock_s),
        GameState::Playing => write!(text, "GO! Time: {}", clock_s),
        GameState::Won => write!(
            text,
            "WINNER! Score={} Button=restart",
            score.map(|s| s.total).unwrap_or(0)
        ),
        GameState::Lost => write!(text, "Game over! Button to restart"),
    };
    text
}
