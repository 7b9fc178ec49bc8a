//! Pipeline task bodies
//!
//! Each task is a generic `async fn` that never returns. The firmware wraps
//! them in `#[embassy_executor::task]` functions bound to concrete hardware.
pub mod alert_clear;
pub mod alert_monitor;
pub mod led_flip;
pub mod led_indicate;
pub mod sensor_poll;
