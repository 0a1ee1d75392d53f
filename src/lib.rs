#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod link;
pub mod poll_loop;
pub mod probe;
pub mod publish;
pub mod scan_result;
pub mod scanner;

#[cfg(all(target_arch = "riscv32", feature = "ble"))]
pub mod ble;
#[cfg(target_arch = "riscv32")]
pub mod board;

#[cfg(test)]
mod testing;

#[cfg(target_arch = "riscv32")]
pub type AsyncI2C<'d> = esp_hal::i2c::master::I2c<'d, esp_hal::Async>;
