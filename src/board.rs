//! Board Resource Management
//!
//! Assigns the Pico 2 pins and peripherals to the tasks that own them and
//! builds the shared I2C bus.
//!
//! # Resource Groups
//! - I2C bus: MCP9808 sensor and HT16K33 display (I2C0, GP4/GP5)
//! - Alert sense: MCP9808 alert output, active low (GP16)
//! - Indicator LEDs: primary (GP20) and alert (GP21)
//! - Status: on-board LED (GP25), only used to signal a failed start
//!
//! # Shared Resources
//! Sensor and display share one bus. The bus lives in a mutex and every
//! driver gets its own `I2cDevice` handle, which locks it per transaction.

use assign_resources::assign_resources;
use embassy_embedded_hal::shared_bus::asynch::i2c::I2cDevice;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::{self, Async, I2c, InterruptHandler as I2cInterruptHandler};
use embassy_rp::peripherals::{self, I2C0};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use static_cell::StaticCell;
use thermo_alert::system::ports::Indicator;

/// I2C bus frequency, fast mode
const I2C_FREQUENCY: u32 = 400_000;

/// The I2C bus shared by sensor and display
pub type I2cBus = Mutex<CriticalSectionRawMutex, I2c<'static, I2C0, Async>>;

/// One device's handle on the shared bus
pub type SharedI2c = I2cDevice<'static, CriticalSectionRawMutex, I2c<'static, I2C0, Async>>;

static I2C_BUS: StaticCell<I2cBus> = StaticCell::new();

/// Brings up I2C0 at 400 kHz and parks it in the shared bus mutex.
///
/// Must be called exactly once, before any task needing the bus is spawned.
pub fn init_i2c(r: I2cBusResources) -> &'static I2cBus {
    let mut config = i2c::Config::default();
    config.frequency = I2C_FREQUENCY;
    let i2c = I2c::new_async(r.i2c, r.scl, r.sda, Irqs, config);
    I2C_BUS.init(Mutex::new(i2c))
}

/// The primary and alert LEDs
pub struct Leds {
    primary: Output<'static>,
    alert: Output<'static>,
}

impl Leds {
    pub fn new(r: IndicatorResources) -> Self {
        Self {
            primary: Output::new(r.primary_pin, Level::Low),
            alert: Output::new(r.alert_pin, Level::Low),
        }
    }
}

impl Indicator for Leds {
    fn set_primary(&mut self, on: bool) {
        self.primary.set_level(Level::from(on));
    }

    fn set_alert(&mut self, on: bool) {
        self.alert.set_level(Level::from(on));
    }
}

assign_resources! {
    /// Shared I2C bus for sensor and display
    i2c_bus: I2cBusResources {
        i2c: I2C0,
        sda: PIN_4,
        scl: PIN_5,
    },
    /// MCP9808 alert output
    alert: AlertSenseResources {
        sense_pin: PIN_16,
    },
    /// Indicator LEDs
    leds: IndicatorResources {
        primary_pin: PIN_20,
        alert_pin: PIN_21,
    },
    /// On-board LED
    status: StatusResources {
        board_led: PIN_25,
    },
}

bind_interrupts!(pub struct Irqs {
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
});
