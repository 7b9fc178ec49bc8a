//! Alert clearance
//!
//! Action of the debounce timer. On every expiry the alert flag is cleared
//! unconditionally. The interrupt is re-armed only when the last reading is
//! strictly below the threshold; the sensor latch is released first so the
//! still-low alert line cannot fire straight away.
//!
//! At or above the threshold the interrupt stays disarmed and nothing
//! retries. A reading that never drops back leaves the pipeline disarmed for
//! the rest of the run.

use crate::system::{debounce::DebounceTimer, ports::TemperatureSensor, state::SharedState};

/// What an expiry did with the interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClearOutcome {
    /// Reading below threshold, interrupt enabled again
    Rearmed,
    /// Reading still at or above threshold, interrupt left disabled
    StillAlerting,
}

/// Runs the debounce timer's action once
pub async fn clear_alert<S: TemperatureSensor>(
    state: &SharedState,
    sensor: &mut S,
    threshold: f32,
) -> ClearOutcome {
    state.clear_alert();

    let reading = state.last_reading();
    if reading < threshold {
        if let Err(e) = sensor.clear_alert(false).await {
            warn!("Could not release sensor alert latch: {}", e);
        }
        state.enable_irq();
        info!("Alert cleared at {} C, interrupt re-armed", reading);
        ClearOutcome::Rearmed
    } else {
        warn!("Alert cleared but {} C is not below {} C, interrupt stays disabled", reading, threshold);
        ClearOutcome::StillAlerting
    }
}

/// Alert clear task body: waits on the debounce timer forever
pub async fn alert_clear<S: TemperatureSensor>(
    state: &SharedState,
    timer: &DebounceTimer,
    sensor: &mut S,
    threshold: f32,
) -> ! {
    info!("Alert clear started");
    loop {
        timer.expired().await;
        debug!("Debounce timer fired");
        clear_alert(state, sensor, threshold).await;
    }
}
