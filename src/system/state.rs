//! Shared Alert State
//!
//! The one piece of state touched by more than one task and by the interrupt
//! boundary:
//! - alert active flag (true between an alert being processed and the
//!   debounce timer firing)
//! - last temperature reading (overwritten on every successful poll)
//! - interrupt enable flag (cleared by the interrupt boundary, set again only
//!   by the debounce timer)
//!
//! # Access Discipline
//! Every field is a lock-free atomic accessed with plain loads and stores, so
//! each accessor is safe from interrupt context and never blocks. Only
//! load/store are used, which the Cortex-M0+/M33 cores support natively.
//! Writers:
//! - `active`: alert monitor (set), debounce timer (clear)
//! - `last_reading`: sensor poll task
//! - `irq_enabled`: interrupt boundary (disable), debounce timer and startup (enable)
//!
//! ```rust
//! use thermo_alert::system::state::SHARED_STATE;
//!
//! SHARED_STATE.publish_reading(30.0);
//! assert_eq!(SHARED_STATE.last_reading(), 30.0);
//! ```

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};

/// Process-wide alert state, created disarmed with no alert and a 0.0 reading
pub static SHARED_STATE: SharedState = SharedState::new();

/// Alert flags and last reading shared between tasks and the interrupt boundary
pub struct SharedState {
    /// Alert raised and not yet cleared by the debounce timer
    active: AtomicBool,
    /// Last reading in °C, stored as the raw bits of an `f32`
    last_reading: AtomicU32,
    /// Whether the alert interrupt may fire
    irq_enabled: AtomicBool,
    /// Wakes the edge watcher when the interrupt is re-enabled
    irq_armed: Signal<CriticalSectionRawMutex, ()>,
}

impl SharedState {
    pub const fn new() -> Self {
        Self {
            active: AtomicBool::new(false),
            // 0.0_f32 has an all-zero bit pattern
            last_reading: AtomicU32::new(0),
            irq_enabled: AtomicBool::new(false),
            irq_armed: Signal::new(),
        }
    }

    /// True while an alert is being debounced
    pub fn is_alert_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Marks an alert as raised
    pub fn raise_alert(&self) {
        self.active.store(true, Ordering::Release);
    }

    /// Marks the current alert as cleared
    pub fn clear_alert(&self) {
        self.active.store(false, Ordering::Release);
    }

    /// Most recent temperature reading in °C
    pub fn last_reading(&self) -> f32 {
        f32::from_bits(self.last_reading.load(Ordering::Acquire))
    }

    /// Overwrites the last reading; no history is kept
    pub fn publish_reading(&self, celsius: f32) {
        self.last_reading.store(celsius.to_bits(), Ordering::Release);
    }

    /// Whether the alert interrupt is currently armed
    pub fn is_irq_enabled(&self) -> bool {
        self.irq_enabled.load(Ordering::Acquire)
    }

    /// Disarms the alert interrupt. Safe to call from interrupt context.
    pub fn disable_irq(&self) {
        self.irq_enabled.store(false, Ordering::Release);
    }

    /// Re-arms the alert interrupt and wakes whoever waits on [`Self::irq_armed`]
    pub fn enable_irq(&self) {
        self.irq_enabled.store(true, Ordering::Release);
        self.irq_armed.signal(());
    }

    /// Resolves once the alert interrupt is enabled
    pub async fn irq_armed(&self) {
        while !self.is_irq_enabled() {
            self.irq_armed.wait().await;
        }
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}
