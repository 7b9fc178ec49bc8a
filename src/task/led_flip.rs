//! LED flip and display alternation
//!
//! Runs on a fixed-rate ticker (500 ms by default). Every tick flips an
//! internal flag:
//! - now on: advance the counter, show it, post `Toggle::On`
//! - now off: show the last reading as `NN.Nc`, post `Toggle::Off`
//!
//! Posting is best effort. A full LED channel drops the toggle, which is
//! harmless because only the latest state matters for the LED.
//!
//! The ticker keeps the period free of drift and leaves the task suspended
//! between ticks instead of spinning on the tick count.

use embassy_time::{Duration, Ticker};

use crate::system::{
    event::{post_toggle, LedChannel, Toggle},
    ports::SegmentDisplay,
    state::SharedState,
};

/// Largest value the 4-digit display can show
pub const COUNTER_MAX: u16 = 9999;

/// Decimals shown for the temperature
pub const READING_PRECISION: usize = 2;

/// Unit glyph shown after the temperature
pub const READING_SUFFIX: char = 'c';

/// Display counter that wraps from 9999 back to 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counter {
    next: u16,
}

impl Counter {
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Returns the next value to show, starting at 0
    pub fn advance(&mut self) -> u16 {
        let value = self.next;
        self.next = if value >= COUNTER_MAX { 0 } else { value + 1 };
        value
    }
}

/// Tick-to-tick state of the flip task
#[derive(Debug, Default)]
pub struct Flipper {
    lit: bool,
    counter: Counter,
}

impl Flipper {
    pub const fn new() -> Self {
        Self {
            lit: false,
            counter: Counter::new(),
        }
    }

    /// Flips the flag and buffers the matching frame. Returns the toggle to post.
    pub fn step<D: SegmentDisplay>(&mut self, reading: f32, display: &mut D) -> Toggle {
        self.lit = !self.lit;

        display.clear();
        if self.lit {
            display.render_integer(i32::from(self.counter.advance()));
        } else {
            display.render_value(reading, READING_PRECISION, READING_SUFFIX);
        }

        Toggle::from(self.lit)
    }
}

/// LED flip task body
pub async fn led_flip<D: SegmentDisplay>(
    state: &SharedState,
    leds: &LedChannel,
    display: &mut D,
    period: Duration,
) -> ! {
    info!("LED flip started");
    let mut ticker = Ticker::every(period);
    let mut flipper = Flipper::new();

    loop {
        ticker.next().await;

        let toggle = flipper.step(state.last_reading(), display);
        if let Err(e) = display.commit().await {
            warn!("Display commit failed: {}", e);
        }

        if post_toggle(leds, toggle).is_err() {
            trace!("LED channel full, {:?} dropped", toggle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_starts_at_zero() {
        let mut counter = Counter::new();
        assert_eq!(counter.advance(), 0);
        assert_eq!(counter.advance(), 1);
    }

    #[test]
    fn counter_wraps_after_9999() {
        let mut counter = Counter { next: COUNTER_MAX };
        assert_eq!(counter.advance(), 9999);
        assert_eq!(counter.advance(), 0);
    }
}
