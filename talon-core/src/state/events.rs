//! Events that trigger state transitions

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Firmware started; enters the first phase
    PowerOn,
    /// Round clock reached zero
    ClockExpired,
    /// A photoresistor went dark during play
    ObjectDetected,
    /// Player pressed the button on the result screen
    ResetRequested,
}
