//! Compile-time tunables. Nothing here is configurable at runtime.

/// First 7-bit address that is probed. 0x00-0x07 are reserved.
pub const SCAN_START: u8 = 0x08;
/// Last 7-bit address that is probed. 0x78-0x7F are reserved.
pub const SCAN_END: u8 = 0x77;

/// How many found addresses are stored per scan.
#[cfg(feature = "ble")]
pub const MAX_FOUND_DEVICES: usize = 10;
#[cfg(not(feature = "ble"))]
pub const MAX_FOUND_DEVICES: usize = 5;

/// Wait between bring-up and the first scan, so devices can settle.
pub const SETTLE_DELAY_MS: u32 = 100;
/// Wait between two scans.
pub const SCAN_INTERVAL_MS: u32 = 5_000;

pub const LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;

pub const SEPARATOR: &str = "-----------------------------------";

/// Custom scan-result service. Must match the uuid literal in the `gatt!` table.
pub const SERVICE_UUID: u128 = 0x6e5a1f40_8c2b_4b7e_a1d3_2f9c0e4b7a10;
pub const SCAN_RESULTS_UUID: u128 = 0x6e5a1f41_8c2b_4b7e_a1d3_2f9c0e4b7a10;

// flags (3) + 128-bit uuid list (18) + name (2 + len) must fit in 31 bytes
pub const DEVICE_NAME: &str = "i2cscan";
