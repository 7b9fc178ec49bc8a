//! Collaborator ports
//!
//! The pipeline only talks to hardware through these traits. The firmware
//! implements them with the MCP9808 and HT16K33 drivers and two GPIO
//! outputs; the test suite implements them with recorders.

use crate::error::Error;

/// Temperature sensor with a latching alert output
#[allow(async_fn_in_trait)]
pub trait TemperatureSensor {
    /// Reads the current temperature in °C
    async fn read_celsius(&mut self) -> Result<f32, Error>;

    /// Releases the latched alert output. With `mask_output` set the output
    /// also stays disabled afterwards.
    async fn clear_alert(&mut self, mask_output: bool) -> Result<(), Error>;
}

/// Buffered 4-digit display. Render calls only touch the buffer; nothing is
/// shown until [`SegmentDisplay::commit`].
#[allow(async_fn_in_trait)]
pub trait SegmentDisplay {
    /// Blanks the buffer
    fn clear(&mut self);

    /// Buffers an integer; values outside 0..=9999 are shown as 9999
    fn render_integer(&mut self, value: i32);

    /// Buffers a value with `precision` decimals followed by `suffix`
    fn render_value(&mut self, value: f32, precision: usize, suffix: char);

    /// Draws the buffer
    async fn commit(&mut self) -> Result<(), Error>;
}

/// The two indicator LEDs
///
/// Both calls set a level. Writing the same value twice has no visible
/// effect.
pub trait Indicator {
    /// Drives the LED that blinks with the flip task
    fn set_primary(&mut self, on: bool);

    /// Drives the LED that mirrors the alert flag
    fn set_alert(&mut self, on: bool);
}
