//! Inter-task communication channels
//!
//! Commands flow from the game task to the actuator tasks through
//! embassy-sync signals and channels. Values written by the producer tasks
//! (tick, sampler, button) live in the `talon-core` handoff cells, each with
//! exactly one writer.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use talon_core::config::DEFAULT_TICKS_PER_SECOND;
use talon_core::motion::AxisCommand;
use talon_core::shared::{ButtonCapture, PhaseCell, RoundClock, SampleHandoff, Ticket};
use talon_core::traits::GripperCommand;
use talon_core::ui::StatusText;

/// Channel capacity for gripper commands
const GRIPPER_CHANNEL_SIZE: usize = 4;

/// Latest command for each axis, indexed by `AxisId::index()`
pub static AXIS_CMD: [Signal<CriticalSectionRawMutex, AxisCommand>; 2] =
    [Signal::new(), Signal::new()];

/// Gripper commands from the game task (forced positions) and the button
/// task (toggles); the gripper task is the only servo writer
pub static GRIPPER_CMD: Channel<CriticalSectionRawMutex, GripperCommand, GRIPPER_CHANNEL_SIZE> =
    Channel::new();

/// Status message to draw on the LCD
pub static STATUS_TEXT: Signal<CriticalSectionRawMutex, StatusText> = Signal::new();

/// Game task asks the sampler for one scan, under the given ticket
pub static SAMPLE_REQUEST: Signal<CriticalSectionRawMutex, Ticket> = Signal::new();

/// Sampler reports that every channel of the scan is in
pub static SAMPLE_READY: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Round clock, written by the tick task and reloaded by the game task
pub static ROUND_CLOCK: RoundClock = RoundClock::new(DEFAULT_TICKS_PER_SECOND);

/// Scan values, written by the sampler task
pub static SAMPLES: SampleHandoff = SampleHandoff::new();

/// Button state and press records, written by the button task
pub static BUTTON: ButtonCapture = ButtonCapture::new();

/// Game state and round number, written by the game task
pub static PHASE: PhaseCell = PhaseCell::new();
