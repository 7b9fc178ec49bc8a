//! MCP9808 temperature sensor driver
//!
//! Register-level driver over any async I2C bus. Besides reading the ambient
//! temperature it programs the alert output that feeds the interrupt
//! boundary: interrupt mode, active low, latched until cleared.
//!
//! # Temperature format
//! T_A is 13 bits of two's complement in 1/16 °C, bit 12 being the sign. The
//! limit registers use the same layout with the two lowest bits unused
//! (0.25 °C steps).

use embedded_hal_async::i2c::I2c;

use crate::error::Error;
use crate::system::ports::TemperatureSensor;

/// Default I2C address (A0=A1=A2=low)
pub const MCP9808_ADDR: u8 = 0x18;

const REG_CONFIG: u8 = 0x01;
const REG_UPPER_LIMIT: u8 = 0x02;
const REG_LOWER_LIMIT: u8 = 0x03;
const REG_CRIT_LIMIT: u8 = 0x04;
const REG_AMBIENT: u8 = 0x05;
const REG_MANUFACTURER_ID: u8 = 0x06;
const REG_DEVICE_ID: u8 = 0x07;

const MANUFACTURER_ID: u16 = 0x0054;
const DEVICE_ID: u8 = 0x04;

/// CONFIG bits
const ALERT_MODE_INTERRUPT: u16 = 1 << 0;
const ALERT_CONTROL: u16 = 1 << 3;
const INT_CLEAR: u16 = 1 << 5;

/// Lower limit low enough never to alert indoors
const LOWER_LIMIT_C: f32 = -40.0;
/// Upper end of the sensor range
const CRIT_LIMIT_C: f32 = 125.0;

/// Decodes a T_A (or limit) register into °C
pub fn decode_temperature(raw: u16) -> f32 {
    let raw = raw & 0x1FFF;
    let signed = if raw & 0x1000 != 0 {
        raw as i16 - 0x2000
    } else {
        raw as i16
    };
    f32::from(signed) / 16.0
}

/// Encodes °C into a limit register value, truncated to 0.25 °C
pub fn encode_limit(celsius: f32) -> u16 {
    let quarters = (celsius * 4.0) as i16;
    ((quarters << 2) as u16) & 0x1FFC
}

/// MCP9808 on an I2C bus
pub struct Mcp9808<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Mcp9808<I2C> {
    /// Wraps the bus; nothing is sent until [`Self::begin`]
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Checks the sensor is present and is an MCP9808
    pub async fn begin(&mut self) -> Result<(), Error> {
        let manufacturer = self.read_register(REG_MANUFACTURER_ID).await?;
        let device = self.read_register(REG_DEVICE_ID).await?;

        if manufacturer != MANUFACTURER_ID || (device >> 8) as u8 != DEVICE_ID {
            error!("Unexpected MCP9808 identity {:x}/{:x}", manufacturer, device);
            return Err(Error::SensorUnavailable);
        }
        Ok(())
    }

    /// Programs the limits and enables the latched, active-low alert output
    pub async fn configure_alert(&mut self, upper_limit: f32) -> Result<(), Error> {
        self.write_register(REG_UPPER_LIMIT, encode_limit(upper_limit)).await?;
        self.write_register(REG_LOWER_LIMIT, encode_limit(LOWER_LIMIT_C)).await?;
        self.write_register(REG_CRIT_LIMIT, encode_limit(CRIT_LIMIT_C)).await?;
        self.write_register(REG_CONFIG, ALERT_MODE_INTERRUPT | ALERT_CONTROL).await?;
        info!("MCP9808 alert armed at {} C", upper_limit);
        Ok(())
    }

    async fn read_register(&mut self, register: u8) -> Result<u16, Error> {
        let mut buf = [0u8; 2];
        self.i2c
            .write_read(self.address, &[register], &mut buf)
            .await
            .map_err(|_| Error::SensorUnavailable)?;
        Ok(u16::from_be_bytes(buf))
    }

    async fn write_register(&mut self, register: u8, value: u16) -> Result<(), Error> {
        let [msb, lsb] = value.to_be_bytes();
        self.i2c
            .write(self.address, &[register, msb, lsb])
            .await
            .map_err(|_| Error::SensorUnavailable)
    }
}

impl<I2C: I2c> TemperatureSensor for Mcp9808<I2C> {
    async fn read_celsius(&mut self) -> Result<f32, Error> {
        let raw = self.read_register(REG_AMBIENT).await?;
        Ok(decode_temperature(raw))
    }

    async fn clear_alert(&mut self, mask_output: bool) -> Result<(), Error> {
        let mut config = self.read_register(REG_CONFIG).await? | INT_CLEAR;
        if mask_output {
            config &= !ALERT_CONTROL;
        } else {
            config |= ALERT_CONTROL;
        }
        self.write_register(REG_CONFIG, config).await
    }
}
