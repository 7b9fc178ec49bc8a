//! Start-up decisions
//!
//! The alert interrupt is armed only once the sensor has answered with the
//! right identity and accepted its alert limit. A missing sensor leaves the
//! pipeline disarmed for the whole run; the display side keeps working.

use embedded_hal_async::i2c::I2c;

use crate::drivers::mcp9808::Mcp9808;
use crate::error::Error;

use super::state::SharedState;

/// Probes the sensor, programs its alert limit and arms the interrupt.
///
/// On failure the interrupt stays disabled and the error is logged once.
pub async fn arm_if_sensor_present<I2C: I2c>(
    sensor: &mut Mcp9808<I2C>,
    state: &SharedState,
    threshold: f32,
) -> Result<(), Error> {
    let probed = match sensor.begin().await {
        Ok(()) => sensor.configure_alert(threshold).await,
        Err(e) => Err(e),
    };

    match probed {
        Ok(()) => {
            state.enable_irq();
            info!("Alert interrupt armed");
            Ok(())
        }
        Err(e) => {
            error!("MCP9808 not present ({}), alert pipeline disabled", e);
            Err(e)
        }
    }
}

/// True when none of the critical tasks could be spawned
pub fn critical_tasks_failed(spawned: &[Result<(), Error>]) -> bool {
    spawned.iter().all(Result::is_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_running_critical_task_is_enough() {
        let spawned = [Err(Error::TaskCreation), Ok(()), Err(Error::TaskCreation)];
        assert!(!critical_tasks_failed(&spawned));
    }

    #[test]
    fn no_running_critical_task_is_fatal() {
        assert!(critical_tasks_failed(&[Err(Error::TaskCreation); 3]));
    }
}
