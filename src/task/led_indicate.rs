//! LED indicator
//!
//! Sole writer of both LEDs. Each received toggle drives the primary LED to
//! the toggle's value and the alert LED to the current alert flag. Outputs
//! are levels, not edges, so replaying a toggle changes nothing.

use crate::system::{
    event::{LedChannel, Toggle},
    ports::Indicator,
    state::SharedState,
};

/// Applies one toggle and the current alert flag to the LEDs
pub fn apply<I: Indicator>(indicator: &mut I, toggle: Toggle, state: &SharedState) {
    indicator.set_primary(toggle.is_on());
    indicator.set_alert(state.is_alert_active());
}

/// LED indicate task body
pub async fn led_indicate<I: Indicator>(state: &SharedState, leds: &LedChannel, indicator: &mut I) -> ! {
    info!("LED indicate started");
    loop {
        let toggle = leds.receive().await;
        apply(indicator, toggle, state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Levels {
        primary: bool,
        alert: bool,
    }

    impl Indicator for Levels {
        fn set_primary(&mut self, on: bool) {
            self.primary = on;
        }

        fn set_alert(&mut self, on: bool) {
            self.alert = on;
        }
    }

    #[test]
    fn same_toggle_gives_same_output() {
        let state = SharedState::new();
        let mut leds = Levels::default();

        apply(&mut leds, Toggle::On, &state);
        let first = (leds.primary, leds.alert);
        for _ in 0..5 {
            apply(&mut leds, Toggle::On, &state);
            assert_eq!((leds.primary, leds.alert), first);
        }
        assert_eq!(first, (true, false));
    }

    #[test]
    fn alert_led_follows_alert_flag() {
        let state = SharedState::new();
        let mut leds = Levels::default();

        state.raise_alert();
        apply(&mut leds, Toggle::Off, &state);
        assert!(!leds.primary);
        assert!(leds.alert);

        state.clear_alert();
        apply(&mut leds, Toggle::Off, &state);
        assert!(!leds.alert);
    }
}
