//! Debounce Timer
//!
//! A single-slot, one-shot deferred action. [`DebounceTimer::arm`] stores a
//! deadline in a signal, which atomically replaces any deadline that was
//! still pending; re-arming therefore never stacks timers. The owning task
//! awaits [`DebounceTimer::expired`] and runs its action once per expiry.
//!
//! A new deadline arriving while the old one is running restarts the wait,
//! in the same way a debouncer restarts on every new input.

use core::sync::atomic::{AtomicBool, Ordering};

use embassy_futures::select::{select, Either};
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
use embassy_time::{Duration, Instant, Timer};

/// Timer armed by the alert monitor and awaited by the alert clear task
pub static ALERT_TIMER: DebounceTimer = DebounceTimer::new();

/// One-shot timer whose arm replaces any pending deadline
pub struct DebounceTimer {
    /// Latest requested deadline, consumed by [`Self::expired`]
    deadline: Signal<CriticalSectionRawMutex, Instant>,
    /// Set by arm, cleared on expiry or cancel
    pending: AtomicBool,
}

impl DebounceTimer {
    pub const fn new() -> Self {
        Self {
            deadline: Signal::new(),
            pending: AtomicBool::new(false),
        }
    }

    /// Schedules expiry `after` from now, superseding any pending deadline
    pub fn arm(&self, after: Duration) {
        self.pending.store(true, Ordering::Release);
        self.deadline.signal(Instant::now() + after);
    }

    /// Drops the pending deadline, if any
    pub fn cancel(&self) {
        self.pending.store(false, Ordering::Release);
        self.deadline.signal(Instant::MAX);
    }

    /// Whether a deadline is waiting to expire
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Resolves once, when the most recently armed deadline passes
    pub async fn expired(&self) {
        let mut deadline = self.deadline.wait().await;
        loop {
            match select(Timer::at(deadline), self.deadline.wait()).await {
                Either::First(_) if deadline == Instant::MAX => {}
                Either::First(_) => break,
                Either::Second(next) => deadline = next,
            }
        }
        self.pending.store(false, Ordering::Release);
    }
}

impl Default for DebounceTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(60);

    #[tokio::test]
    async fn fires_once_after_window() {
        let timer = DebounceTimer::new();
        let start = Instant::now();
        timer.arm(WINDOW);
        assert!(timer.is_pending());

        timer.expired().await;
        assert!(start.elapsed() >= WINDOW);
        assert!(!timer.is_pending());

        // single shot: nothing further to expire
        let again = select(timer.expired(), Timer::after(WINDOW * 2)).await;
        assert!(matches!(again, Either::Second(_)));
    }

    #[tokio::test]
    async fn rearm_replaces_pending_deadline() {
        let timer = DebounceTimer::new();
        let start = Instant::now();
        timer.arm(WINDOW);

        let first = select(timer.expired(), async {
            Timer::after(Duration::from_millis(30)).await;
            timer.arm(WINDOW);
            Timer::after(WINDOW * 4).await;
        })
        .await;

        assert!(matches!(first, Either::First(_)));
        assert!(start.elapsed() >= Duration::from_millis(30) + WINDOW);
        assert!(!timer.is_pending());
    }

    #[tokio::test]
    async fn cancel_suppresses_expiry() {
        let timer = DebounceTimer::new();
        timer.arm(WINDOW);
        timer.cancel();
        assert!(!timer.is_pending());

        let outcome = select(timer.expired(), Timer::after(WINDOW * 2)).await;
        assert!(matches!(outcome, Either::Second(_)));
    }
}
