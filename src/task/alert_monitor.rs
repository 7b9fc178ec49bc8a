//! Alert Monitor
//!
//! Blocks on the alert channel and turns each alert into state: the alert
//! flag goes up and the debounce timer is armed for the cooldown.
//!
//! # States
//! - `Idle`: no alert active. An alert sets the flag, arms the timer and
//!   moves to `Alerted`.
//! - `Alerted`: an alert here cannot normally happen (single-slot channel,
//!   interrupt disarmed). If one does, the timer is re-armed and the state
//!   stays `Alerted`.
//!
//! The way back to `Idle` is the debounce timer clearing the alert flag, so
//! the phase is read from the shared state rather than kept locally.

use embassy_time::Duration;

use crate::system::{
    debounce::DebounceTimer,
    event::{AlertChannel, AlertEvent},
    state::SharedState,
};

/// Phase of the alert monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// No alert active, waiting for the first event
    Idle,
    /// Alert flag raised and debounce timer pending.
    /// - Left only when the timer clears the flag
    /// - Further events re-arm the timer
    Alerted,
}

/// Alert monitor state machine
pub struct AlertMonitor<'a> {
    state: &'a SharedState,
    timer: &'a DebounceTimer,
    cooldown: Duration,
}

impl<'a> AlertMonitor<'a> {
    pub fn new(state: &'a SharedState, timer: &'a DebounceTimer, cooldown: Duration) -> Self {
        Self { state, timer, cooldown }
    }

    /// Current phase, derived from the alert flag
    pub fn phase(&self) -> Phase {
        if self.state.is_alert_active() {
            Phase::Alerted
        } else {
            Phase::Idle
        }
    }

    /// Applies one alert event and returns the resulting phase
    pub fn handle(&self, event: AlertEvent) -> Phase {
        match (self.phase(), event) {
            (Phase::Idle, AlertEvent::Detected) => {
                info!("Alert raised, clearing in {} ms", self.cooldown.as_millis());
                // flag first: it must be up before the timer can possibly clear it
                self.state.raise_alert();
                self.timer.arm(self.cooldown);
            }
            (Phase::Alerted, AlertEvent::Detected) => {
                warn!("Alert while already alerted, re-arming timer");
                self.timer.arm(self.cooldown);
            }
        }
        Phase::Alerted
    }

    /// Waits for alerts forever
    pub async fn run(&self, alerts: &AlertChannel) -> ! {
        loop {
            let event = alerts.receive().await;
            self.handle(event);
        }
    }
}

/// Alert monitor task body
pub async fn alert_monitor(
    state: &SharedState,
    alerts: &AlertChannel,
    timer: &DebounceTimer,
    cooldown: Duration,
) -> ! {
    info!("Alert monitor started");
    AlertMonitor::new(state, timer, cooldown).run(alerts).await
}
