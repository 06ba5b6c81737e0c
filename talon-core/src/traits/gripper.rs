//! Gripper actuator trait

/// Gripper position requested by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GripperCommand {
    /// Move to the configured open angle
    Open,
    /// Move to the configured closed angle
    Close,
    /// Flip between open and closed
    Toggle,
}

/// Trait for the claw gripper servo
pub trait Gripper {
    /// Error raised by the underlying output
    type Error;

    /// Drive the servo to `angle` degrees
    ///
    /// Implementations clamp the angle to their configured range.
    fn set_angle(&mut self, angle: u8) -> Result<(), Self::Error>;

    /// Get the last commanded angle
    fn angle(&self) -> u8;

    /// Angle that holds the claw open
    fn open_angle(&self) -> u8;

    /// Angle that holds the claw closed
    fn closed_angle(&self) -> u8;

    /// Flip between the open and closed angles
    ///
    /// Any angle other than the closed one counts as open, so the first toggle
    /// from an intermediate position closes the claw.
    fn toggle(&mut self) -> Result<(), Self::Error> {
        let next = if self.angle() == self.closed_angle() {
            self.open_angle()
        } else {
            self.closed_angle()
        };
        self.set_angle(next)
    }

    /// Apply a game-level command
    fn apply(&mut self, command: GripperCommand) -> Result<(), Self::Error> {
        match command {
            GripperCommand::Open => self.set_angle(self.open_angle()),
            GripperCommand::Close => self.set_angle(self.closed_angle()),
            GripperCommand::Toggle => self.toggle(),
        }
    }
}
