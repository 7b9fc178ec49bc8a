//! Interrupt Boundary
//!
//! The sensor pulls its alert line low when the temperature crosses the
//! programmed limit. Whatever runs on that edge may do exactly two things:
//! 1. attempt a non-blocking send of [`AlertEvent::Detected`](super::event::AlertEvent)
//!    on the single-slot alert channel (dropped if one is already pending)
//! 2. disarm itself, so a line that stays low cannot re-fire
//!
//! It never allocates, never blocks and never touches the alert flag. Only
//! the debounce timer arms it again.

use embedded_hal_async::digital::Wait;

use super::event::{post_alert, AlertChannel};
use super::state::SharedState;

/// Runs on an alert edge. Bounded, non-blocking, interrupt safe.
pub fn on_alert_edge(alerts: &AlertChannel, state: &SharedState) {
    // A full slot already records the condition
    let _ = post_alert(alerts);
    state.disable_irq();
}

/// Watches the alert line and runs [`on_alert_edge`] each time it goes low
/// while armed.
///
/// On the RP2350 the `wait_for_low` future is completed by the GPIO bank
/// interrupt. The pin is only listened to while the interrupt is enabled,
/// which models the hardware enable bit.
pub async fn alert_sense<P: Wait>(pin: &mut P, alerts: &AlertChannel, state: &SharedState) -> ! {
    info!("Alert sense started");
    loop {
        state.irq_armed().await;

        if pin.wait_for_low().await.is_err() {
            warn!("Alert line unreadable, waiting for next arm");
            state.disable_irq();
            continue;
        }

        on_alert_edge(alerts, state);
        debug!("Alert edge, interrupt disarmed");
    }
}
