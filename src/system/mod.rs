//! Core coordination primitives of the alert pipeline
pub mod debounce;
pub mod event;
pub mod irq;
pub mod ports;
pub mod startup;
pub mod state;
