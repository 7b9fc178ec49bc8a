//! Event Channel Pair
//!
//! Defines the events and the two bounded channels of the pipeline:
//! - LED channel (capacity 4): LED flip task → LED indicate task
//! - Alert channel (capacity 1): interrupt boundary → alert monitor task
//!
//! Both channels are best effort. Posting never blocks and a full channel
//! drops the new event; nothing retries. The single slot of the alert
//! channel means at most one unacknowledged alert is ever pending.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use crate::error::Error;

/// Capacity of the LED channel
pub const LED_CHANNEL_CAPACITY: usize = 4;

/// Capacity of the alert channel (single-slot mailbox)
pub const ALERT_CHANNEL_CAPACITY: usize = 1;

/// Channel carrying LED toggles
pub type LedChannel = Channel<CriticalSectionRawMutex, Toggle, LED_CHANNEL_CAPACITY>;

/// Channel carrying alert notifications out of interrupt context
pub type AlertChannel = Channel<CriticalSectionRawMutex, AlertEvent, ALERT_CHANNEL_CAPACITY>;

/// LED toggles from the flip task
pub static LED_CHANNEL: LedChannel = Channel::new();

/// Alert notifications from the interrupt boundary
pub static ALERT_CHANNEL: AlertChannel = Channel::new();

/// Desired state of the primary LED
///
/// Posted once per flip tick. The indicator task applies it as a level, so
/// a dropped or repeated toggle never leaves the LED in a wrong state for
/// longer than one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Toggle {
    /// Primary LED lit; the display shows the counter
    On,
    /// Primary LED dark; the display shows the last reading
    Off,
}

impl Toggle {
    /// Output level for the primary LED
    pub fn is_on(self) -> bool {
        self == Toggle::On
    }
}

impl From<bool> for Toggle {
    fn from(on: bool) -> Self {
        if on {
            Toggle::On
        } else {
            Toggle::Off
        }
    }
}

/// Notification that the sensor crossed its alert threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlertEvent {
    /// Alert line went low while the interrupt was armed.
    /// - Sent only from the interrupt boundary
    /// - At most one is ever pending
    Detected,
}

/// Posts a toggle without waiting; a full channel drops it
pub fn post_toggle(channel: &LedChannel, toggle: Toggle) -> Result<(), Error> {
    channel.try_send(toggle).map_err(|_| Error::ChannelFull)
}

/// Posts an alert without waiting. Safe from interrupt context.
pub fn post_alert(channel: &AlertChannel) -> Result<(), Error> {
    channel.try_send(AlertEvent::Detected).map_err(|_| Error::ChannelFull)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn led_channel_drops_fifth_toggle() {
        let channel = LedChannel::new();
        for i in 0..LED_CHANNEL_CAPACITY {
            assert_eq!(post_toggle(&channel, Toggle::from(i % 2 == 0)), Ok(()));
        }
        assert_eq!(post_toggle(&channel, Toggle::On), Err(Error::ChannelFull));

        // FIFO order survives the drop
        assert_eq!(channel.try_receive().ok(), Some(Toggle::On));
        assert_eq!(channel.try_receive().ok(), Some(Toggle::Off));
    }

    #[test]
    fn alert_channel_holds_one_pending_alert() {
        let channel = AlertChannel::new();
        assert_eq!(post_alert(&channel), Ok(()));
        assert_eq!(post_alert(&channel), Err(Error::ChannelFull));
        assert_eq!(channel.try_receive().ok(), Some(AlertEvent::Detected));
        assert!(channel.try_receive().is_err());
    }
}
