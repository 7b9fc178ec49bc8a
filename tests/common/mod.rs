//! Test doubles for the collaborator ports.
//!
//! Every double keeps its observable state behind an `Rc` so the scenario
//! can inspect or steer it while the task under test owns the double.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

use embassy_futures::select::{select, Either};
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
use embedded_hal_async::digital::Wait;
use embedded_hal_async::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use thermo_alert::system::ports::{Indicator, SegmentDisplay, TemperatureSensor};
use thermo_alert::Error;

/// Runs `scenario` while `tasks` run alongside it; returns the scenario's result
pub async fn run_alongside<T, F>(tasks: F, scenario: impl Future<Output = T>) -> T
where
    F: Future,
{
    match select(scenario, tasks).await {
        Either::First(result) => result,
        Either::Second(_) => panic!("task loop returned"),
    }
}

// ── Sensor ────────────────────────────────────────────────────

/// Sensor whose reading the scenario sets
#[derive(Clone)]
pub struct FakeSensor {
    pub reading: Rc<Cell<Result<f32, Error>>>,
    pub latch_clears: Rc<Cell<usize>>,
}

impl FakeSensor {
    pub fn reading(celsius: f32) -> Self {
        Self {
            reading: Rc::new(Cell::new(Ok(celsius))),
            latch_clears: Rc::new(Cell::new(0)),
        }
    }

    pub fn set(&self, celsius: f32) {
        self.reading.set(Ok(celsius));
    }
}

impl TemperatureSensor for FakeSensor {
    async fn read_celsius(&mut self) -> Result<f32, Error> {
        self.reading.get()
    }

    async fn clear_alert(&mut self, _mask_output: bool) -> Result<(), Error> {
        self.latch_clears.set(self.latch_clears.get() + 1);
        Ok(())
    }
}

// ── Display ───────────────────────────────────────────────────

/// What one committed frame showed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frame {
    Blank,
    Integer(i32),
    Value(f32, usize, char),
}

/// Display that records every committed frame
#[derive(Clone)]
pub struct RecordingDisplay {
    buffered: Frame,
    pub frames: Rc<RefCell<Vec<Frame>>>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self {
            buffered: Frame::Blank,
            frames: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn frames(&self) -> Vec<Frame> {
        self.frames.borrow().clone()
    }
}

impl SegmentDisplay for RecordingDisplay {
    fn clear(&mut self) {
        self.buffered = Frame::Blank;
    }

    fn render_integer(&mut self, value: i32) {
        self.buffered = Frame::Integer(value);
    }

    fn render_value(&mut self, value: f32, precision: usize, suffix: char) {
        self.buffered = Frame::Value(value, precision, suffix);
    }

    async fn commit(&mut self) -> Result<(), Error> {
        self.frames.borrow_mut().push(self.buffered);
        Ok(())
    }
}

// ── Indicator ─────────────────────────────────────────────────

/// LEDs that record every (primary, alert) pair written
#[derive(Clone, Default)]
pub struct RecordingLeds {
    primary: Rc<Cell<bool>>,
    alert: Rc<Cell<bool>>,
    pub history: Rc<RefCell<Vec<(bool, bool)>>>,
}

impl RecordingLeds {
    pub fn alert(&self) -> bool {
        self.alert.get()
    }

    pub fn history(&self) -> Vec<(bool, bool)> {
        self.history.borrow().clone()
    }
}

impl Indicator for RecordingLeds {
    fn set_primary(&mut self, on: bool) {
        self.primary.set(on);
    }

    fn set_alert(&mut self, on: bool) {
        self.alert.set(on);
        self.history.borrow_mut().push((self.primary.get(), on));
    }
}

// ── Alert line ────────────────────────────────────────────────

/// Alert line that goes low each time the scenario pulls it
#[derive(Clone)]
pub struct FakeAlertLine {
    pulled: Rc<Signal<CriticalSectionRawMutex, ()>>,
}

impl FakeAlertLine {
    pub fn new() -> Self {
        Self {
            pulled: Rc::new(Signal::new()),
        }
    }

    pub fn pull_low(&self) {
        self.pulled.signal(());
    }

    pub fn release(&self) {
        self.pulled.reset();
    }
}

impl embedded_hal::digital::ErrorType for FakeAlertLine {
    type Error = core::convert::Infallible;
}

impl Wait for FakeAlertLine {
    async fn wait_for_high(&mut self) -> Result<(), Self::Error> {
        core::future::pending().await
    }

    async fn wait_for_low(&mut self) -> Result<(), Self::Error> {
        self.pulled.wait().await;
        Ok(())
    }

    async fn wait_for_rising_edge(&mut self) -> Result<(), Self::Error> {
        core::future::pending().await
    }

    async fn wait_for_falling_edge(&mut self) -> Result<(), Self::Error> {
        self.wait_for_low().await
    }

    async fn wait_for_any_edge(&mut self) -> Result<(), Self::Error> {
        self.wait_for_low().await
    }
}

// ── I2C bus ───────────────────────────────────────────────────

/// I2C bus that logs writes and serves 16-bit registers
#[derive(Default)]
pub struct MockI2c {
    pub writes: Vec<(u8, Vec<u8>)>,
    pub registers: HashMap<u8, u16>,
    pub fail: bool,
}

impl MockI2c {
    pub fn with_registers(registers: &[(u8, u16)]) -> Self {
        Self {
            registers: registers.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn written(&self) -> Vec<Vec<u8>> {
        self.writes.iter().map(|(_, bytes)| bytes.clone()).collect()
    }
}

impl ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl I2c for MockI2c {
    async fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
        if self.fail {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        let mut pointer = 0u8;
        for operation in operations {
            match operation {
                Operation::Write(bytes) => {
                    let bytes: &[u8] = bytes;
                    self.writes.push((address, bytes.to_vec()));
                    if let [register, rest @ ..] = bytes {
                        pointer = *register;
                        if let [msb, lsb] = rest {
                            self.registers.insert(*register, u16::from_be_bytes([*msb, *lsb]));
                        }
                    }
                }
                Operation::Read(buf) => {
                    let value = self.registers.get(&pointer).copied().unwrap_or(0).to_be_bytes();
                    let len = buf.len().min(2);
                    buf[..len].copy_from_slice(&value[..len]);
                }
            }
        }
        Ok(())
    }
}
