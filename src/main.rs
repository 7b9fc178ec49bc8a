//! Alert pipeline firmware entry point
//!
//! Brings up the board, probes the sensor, arms the alert interrupt and
//! spawns the pipeline tasks.

#![no_std]
#![no_main]

use board::{AlertSenseResources, AssignedResources, I2cBusResources, IndicatorResources, Leds, SharedI2c, StatusResources};
use defmt::{error, info};
use embassy_embedded_hal::shared_bus::asynch::i2c::I2cDevice;
use embassy_executor::{SpawnToken, Spawner};
use embassy_rp::block::ImageDef;
use embassy_rp::config::Config as RpConfig;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_time::{Duration, Timer};
use thermo_alert::{
    drivers::{
        ht16k33::{Ht16k33, HT16K33_ADDR},
        mcp9808::{Mcp9808, MCP9808_ADDR},
    },
    system::{
        debounce::ALERT_TIMER,
        event::{ALERT_CHANNEL, LED_CHANNEL},
        irq,
        startup::{arm_if_sensor_present, critical_tasks_failed},
        state::SHARED_STATE,
    },
    task::{
        alert_clear::alert_clear, alert_monitor::alert_monitor, led_flip::led_flip,
        led_indicate::led_indicate, sensor_poll::sensor_poll,
    },
    Config, Error,
};
use {defmt_rtt as _, panic_probe as _};

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// Board resources
mod board;

/// Production tunables
const CONFIG: Config = Config::DEFAULT;

/// Blink count of the fatal start-up indicator
const FATAL_BLINKS: u8 = 5;

/// On and off time of one fatal blink
const FATAL_BLINK_INTERVAL: Duration = Duration::from_millis(100);

type Sensor = Mcp9808<SharedI2c>;
type Display = Ht16k33<SharedI2c>;

#[embassy_executor::task]
async fn led_flip_task(mut display: Display) -> ! {
    led_flip(&SHARED_STATE, &LED_CHANNEL, &mut display, CONFIG.flip_period).await
}

#[embassy_executor::task]
async fn led_indicate_task(mut leds: Leds) -> ! {
    led_indicate(&SHARED_STATE, &LED_CHANNEL, &mut leds).await
}

#[embassy_executor::task]
async fn sensor_poll_task(mut sensor: Sensor) -> ! {
    sensor_poll(&SHARED_STATE, &mut sensor, CONFIG.poll_interval).await
}

#[embassy_executor::task]
async fn alert_monitor_task() -> ! {
    alert_monitor(&SHARED_STATE, &ALERT_CHANNEL, &ALERT_TIMER, CONFIG.cooldown).await
}

#[embassy_executor::task]
async fn alert_clear_task(mut sensor: Sensor) -> ! {
    alert_clear(&SHARED_STATE, &ALERT_TIMER, &mut sensor, CONFIG.alert_threshold).await
}

#[embassy_executor::task]
async fn alert_sense_task(mut pin: Input<'static>) -> ! {
    irq::alert_sense(&mut pin, &ALERT_CHANNEL, &SHARED_STATE).await
}

/// Firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(RpConfig::default());
    let r = split_resources!(p);

    info!("{} {} starting", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    // The bus must exist before any device handle is created
    let bus = board::init_i2c(r.i2c_bus);

    let mut display = Ht16k33::new(I2cDevice::new(bus), HT16K33_ADDR);
    if let Err(e) = display.init(CONFIG.display_brightness).await {
        error!("HT16K33 init failed: {}", e);
    }

    // Without a sensor the interrupt is never armed for this run
    let mut sensor = Mcp9808::new(I2cDevice::new(bus), MCP9808_ADDR);
    let _ = arm_if_sensor_present(&mut sensor, &SHARED_STATE, CONFIG.alert_threshold).await;

    let critical = [
        spawn(&spawner, led_flip_task(display)),
        spawn(&spawner, led_indicate_task(Leds::new(r.leds))),
        spawn(&spawner, sensor_poll_task(sensor)),
    ];
    let _ = spawn(&spawner, alert_monitor_task());
    let _ = spawn(&spawner, alert_clear_task(Mcp9808::new(I2cDevice::new(bus), MCP9808_ADDR)));
    let _ = spawn(&spawner, alert_sense_task(Input::new(r.alert.sense_pin, Pull::Up)));

    if critical_tasks_failed(&critical) {
        error!("No task could be started, halting");
        fatal_blink(Output::new(r.status.board_led, Level::Low)).await;
    }
}

/// Spawns a task, logging a failure instead of panicking
fn spawn<S>(spawner: &Spawner, token: SpawnToken<S>) -> Result<(), Error> {
    spawner.spawn(token).map_err(|_| {
        error!("Task spawn failed");
        Error::TaskCreation
    })
}

/// Blinks the on-board LED a few times and parks forever
async fn fatal_blink(mut led: Output<'static>) -> ! {
    for _ in 0..FATAL_BLINKS {
        led.set_high();
        Timer::after(FATAL_BLINK_INTERVAL).await;
        led.set_low();
        Timer::after(FATAL_BLINK_INTERVAL).await;
    }
    loop {
        core::future::pending::<()>().await;
    }
}
