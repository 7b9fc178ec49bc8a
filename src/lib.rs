//! Temperature alert pipeline
//!
//! A sensor threshold crossing pulls an interrupt line low. The interrupt
//! boundary hands a notification to the alert monitor through a single-slot
//! channel and disarms itself. The monitor raises the alert flag and arms a
//! debounce timer, which after the cooldown clears the flag and re-arms the
//! interrupt only when the temperature has dropped back below the threshold.
//! Meanwhile a periodic task alternates the display between a counter and
//! the last reading and feeds LED toggles to the indicator task, which also
//! mirrors the alert flag on a second LED.
//!
//! Everything here is hardware independent; the firmware binary binds it to
//! an RP2350, an MCP9808 sensor and an HT16K33 display.

#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod config;
pub mod drivers;
pub mod error;
pub mod system;
pub mod task;

pub use config::Config;
pub use error::Error;
