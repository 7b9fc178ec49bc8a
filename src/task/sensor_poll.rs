//! Sensor polling
//!
//! Sleeps for the poll interval, reads the sensor and publishes the value.
//! A failed read keeps the previous value and is retried on the next cycle.

use embassy_time::{Duration, Timer};

use crate::error::Error;
use crate::system::{ports::TemperatureSensor, state::SharedState};

/// Reads once and publishes the value on success
pub async fn poll_once<S: TemperatureSensor>(state: &SharedState, sensor: &mut S) -> Result<f32, Error> {
    let celsius = sensor.read_celsius().await?;
    state.publish_reading(celsius);
    Ok(celsius)
}

/// Sensor poll task body
pub async fn sensor_poll<S: TemperatureSensor>(state: &SharedState, sensor: &mut S, interval: Duration) -> ! {
    info!("Sensor poll started");
    loop {
        Timer::after(interval).await;

        if let Err(e) = poll_once(state, sensor).await {
            debug!("Sensor read skipped: {}", e);
        }
    }
}
