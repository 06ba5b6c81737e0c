//! Character display trait for the 2x16 status LCD

/// Errors that can occur while writing to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// A control or data line could not be driven
    Bus,
    /// Display has not been initialized
    NotInitialized,
}

/// Trait for a fixed-size character display
///
/// The display owns the layout: text longer than its capacity is truncated
/// and shorter text is padded with spaces so stale characters are cleared.
///
/// Writing is async: a slow panel waits on the timer between bus cycles
/// instead of holding up the step generators.
#[allow(async_fn_in_trait)]
pub trait TextDisplay {
    /// Render `text` across the whole display
    async fn show_text(&mut self, text: &str) -> Result<(), DisplayError>;

    /// Total number of characters the display can show
    fn capacity(&self) -> usize;
}
