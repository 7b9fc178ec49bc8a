//! Error taxonomy of the alert pipeline
//!
//! Every fallible operation funnels into [`Error`]. All variants are `Copy`,
//! per-cycle errors are handled where they occur and only a total failure to
//! start the tasks is fatal.

use core::fmt;

/// Pipeline error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The temperature sensor did not answer or answered with the wrong identity
    SensorUnavailable,
    /// The display did not acknowledge a write
    DisplayUnavailable,
    /// A best-effort channel was full and the event was dropped
    ChannelFull,
    /// A task could not be spawned
    TaskCreation,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SensorUnavailable => write!(f, "sensor unavailable"),
            Self::DisplayUnavailable => write!(f, "display unavailable"),
            Self::ChannelFull => write!(f, "channel full"),
            Self::TaskCreation => write!(f, "task creation failed"),
        }
    }
}
