//! HT16K33 4-digit 7-segment display driver
//!
//! Drives the common HT16K33 backpack with four digits and a centre colon.
//! All rendering happens in a RAM mirror; [`SegmentDisplay::commit`] writes
//! the whole mirror in one I2C transaction.
//!
//! # Digit layout
//! The controller RAM holds 16 bytes. The digits live at byte offsets 0, 2,
//! 6 and 8 (offset 4 is the colon). Bit 7 of a digit byte is its decimal
//! point.

use core::fmt::Write;

use embedded_hal_async::i2c::I2c;
use heapless::String;

use crate::error::Error;
use crate::system::ports::SegmentDisplay;

/// Default I2C address
pub const HT16K33_ADDR: u8 = 0x70;

/// Number of digit positions
pub const DIGIT_COUNT: usize = 4;

/// Largest integer that fits the display
pub const MAX_INTEGER: i32 = 9999;

const CMD_OSCILLATOR_ON: u8 = 0x21;
const CMD_DISPLAY_ON: u8 = 0x81;
const CMD_BRIGHTNESS: u8 = 0xE0;
const MAX_BRIGHTNESS: u8 = 15;

const DIGIT_OFFSETS: [usize; DIGIT_COUNT] = [0, 2, 6, 8];
const DECIMAL_POINT: u8 = 0x80;

const DIGIT_GLYPHS: [u8; 10] = [0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F];

/// Segment pattern for a character; anything unknown is blank
pub fn glyph(c: char) -> u8 {
    match c {
        '0'..='9' => DIGIT_GLYPHS[(c as u8 - b'0') as usize],
        'a' | 'A' => 0x77,
        'b' | 'B' => 0x7C,
        'C' => 0x39,
        'c' => 0x58,
        'd' | 'D' => 0x5E,
        'e' | 'E' => 0x79,
        'f' | 'F' => 0x71,
        '-' => 0x40,
        _ => 0x00,
    }
}

/// HT16K33 on an I2C bus
pub struct Ht16k33<I2C> {
    i2c: I2C,
    address: u8,
    ram: [u8; 16],
}

impl<I2C: I2c> Ht16k33<I2C> {
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            ram: [0; 16],
        }
    }

    /// Starts the oscillator, switches the display on and sets brightness (0-15)
    pub async fn init(&mut self, brightness: u8) -> Result<(), Error> {
        self.command(CMD_OSCILLATOR_ON).await?;
        self.command(CMD_DISPLAY_ON).await?;
        self.command(CMD_BRIGHTNESS | brightness.min(MAX_BRIGHTNESS)).await?;
        self.clear();
        self.commit().await
    }

    /// Buffered segment patterns of the four digits, left to right
    pub fn digits(&self) -> [u8; DIGIT_COUNT] {
        DIGIT_OFFSETS.map(|offset| self.ram[offset])
    }

    fn set_glyph(&mut self, position: usize, pattern: u8) {
        self.ram[DIGIT_OFFSETS[position]] = pattern;
    }

    fn set_decimal_point(&mut self, position: usize) {
        self.ram[DIGIT_OFFSETS[position]] |= DECIMAL_POINT;
    }

    async fn command(&mut self, command: u8) -> Result<(), Error> {
        self.i2c
            .write(self.address, &[command])
            .await
            .map_err(|_| Error::DisplayUnavailable)
    }
}

impl<I2C: I2c> SegmentDisplay for Ht16k33<I2C> {
    fn clear(&mut self) {
        self.ram = [0; 16];
    }

    fn render_integer(&mut self, value: i32) {
        let value = if (0..=MAX_INTEGER).contains(&value) {
            value
        } else {
            MAX_INTEGER
        };

        let mut rest = value;
        for position in (0..DIGIT_COUNT).rev() {
            self.set_glyph(position, DIGIT_GLYPHS[(rest % 10) as usize]);
            rest /= 10;
        }
    }

    fn render_value(&mut self, value: f32, precision: usize, suffix: char) {
        let mut text: String<16> = String::new();
        if write!(text, "{:.*}", precision, value).is_err() {
            // too wide to format at all
            for position in 0..DIGIT_COUNT - 1 {
                self.set_glyph(position, glyph('-'));
            }
        } else {
            // last position is reserved for the suffix
            let mut position = 0;
            for c in text.chars() {
                if position == DIGIT_COUNT - 1 {
                    break;
                }
                if c == '.' {
                    if position > 0 {
                        self.set_decimal_point(position - 1);
                    }
                    continue;
                }
                self.set_glyph(position, glyph(c));
                position += 1;
            }
        }
        self.set_glyph(DIGIT_COUNT - 1, glyph(suffix));
    }

    async fn commit(&mut self) -> Result<(), Error> {
        let mut frame = [0u8; 17];
        frame[1..].copy_from_slice(&self.ram);
        self.i2c
            .write(self.address, &frame)
            .await
            .map_err(|_| Error::DisplayUnavailable)
    }
}
