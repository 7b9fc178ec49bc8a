//! Compile-time configuration
//!
//! All tunables of the alert pipeline in one place. The firmware always runs
//! with [`Config::DEFAULT`]; hosted tests build their own [`Config`] with a
//! shorter time base and hand its fields to the task bodies.

use embassy_time::Duration;

/// Temperature (°C) at or above which the sensor raises its alert
pub const ALERT_THRESHOLD_C: f32 = 35.0;

/// Cooldown between an alert being raised and the attempt to clear it
pub const ALERT_COOLDOWN: Duration = Duration::from_millis(5000);

/// Period of the LED flip / display alternation
pub const FLIP_PERIOD: Duration = Duration::from_millis(500);

/// Delay between two sensor reads
pub const SENSOR_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Display brightness, 0 (dimmest) to 15
pub const DISPLAY_BRIGHTNESS: u8 = 1;

/// Runtime view of the tunables above
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Readings strictly below this value count as "cleared"
    pub alert_threshold: f32,
    /// Debounce window armed by the alert monitor
    pub cooldown: Duration,
    /// Tick period of the LED flip task
    pub flip_period: Duration,
    /// Sleep between sensor polls
    pub poll_interval: Duration,
    /// Brightness handed to the display on init
    pub display_brightness: u8,
}

impl Config {
    /// The production configuration
    pub const DEFAULT: Config = Config {
        alert_threshold: ALERT_THRESHOLD_C,
        cooldown: ALERT_COOLDOWN,
        flip_period: FLIP_PERIOD,
        poll_interval: SENSOR_POLL_INTERVAL,
        display_brightness: DISPLAY_BRIGHTNESS,
    };
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}
