//! One-shot hardware bring-up: fixed output levels and the I2C controller.

use esp_hal::{
    gpio::{GpioPin, Level, Output, OutputConfig},
    i2c::master::{Config, ConfigError, I2c},
    peripherals::I2C0,
};
use log::info;
use thiserror::Error;

use crate::AsyncI2C;

#[derive(Error, Debug)]
pub enum BringUpError {
    #[error("I2C bus not ready: {0:?}")]
    I2cConfig(ConfigError),
    #[cfg(feature = "ble")]
    #[error("radio init failed: {0:?}")]
    Radio(esp_wifi::InitializationError),
    #[cfg(feature = "ble")]
    #[error("{0}")]
    Ble(#[from] crate::ble::BleError),
}

/// Output pins that have to stay driven for as long as the firmware runs.
pub struct FixedOutputs {
    _gpio7: Output<'static>,
    _gpio9: Output<'static>,
    _gpio10: Output<'static>,
}

/// GPIO7 high, GPIO9 and GPIO10 low. Wiring specific.
pub fn drive_fixed_outputs(
    gpio7: GpioPin<7>,
    gpio9: GpioPin<9>,
    gpio10: GpioPin<10>,
) -> FixedOutputs {
    let gpio7 = Output::new(gpio7, Level::High, OutputConfig::default());
    info!("GPIO7 set HIGH");

    let gpio9 = Output::new(gpio9, Level::Low, OutputConfig::default());
    info!("GPIO9 set LOW");

    let gpio10 = Output::new(gpio10, Level::Low, OutputConfig::default());
    info!("GPIO10 set LOW");

    FixedOutputs {
        _gpio7: gpio7,
        _gpio9: gpio9,
        _gpio10: gpio10,
    }
}

pub fn i2c_bus(
    i2c0: I2C0,
    sda: GpioPin<23>,
    scl: GpioPin<15>,
) -> Result<AsyncI2C<'static>, BringUpError> {
    let i2c = I2c::new(i2c0, Config::default())
        .map_err(BringUpError::I2cConfig)?
        .with_sda(sda)
        .with_scl(scl)
        .into_async();
    info!("I2C bus is ready");

    Ok(i2c)
}
