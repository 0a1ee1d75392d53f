//! Full-range bus sweep and the classic `i2cdetect`-style grid.

use core::fmt::{self, Write};

use embedded_hal_async::i2c::I2c;
use log::{debug, info};

use crate::{
    config::{SCAN_END, SCAN_START},
    probe::probe,
    scan_result::ScanResult,
};

pub const GRID_HEADER: &str = "     0  1  2  3  4  5  6  7  8  9  A  B  C  D  E  F";

const ROWS: u8 = 8;
const COLUMNS: u8 = 16;

pub fn is_reserved(address: u8) -> bool {
    !(SCAN_START..=SCAN_END).contains(&address)
}

/// One three-character cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCell {
    Reserved,
    Absent,
    Found(u8),
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridCell::Reserved => f.write_str("   "),
            GridCell::Absent => f.write_str("-- "),
            GridCell::Found(address) => write!(f, "{:02X} ", address),
        }
    }
}

/// Sweeps 0x00-0x7F, probing every non-reserved address once in ascending order.
///
/// `result` is cleared first and then holds the first addresses that answered,
/// up to its capacity. The grid goes to `console` while the sweep runs. Returns
/// how many addresses answered, including the ones that did not fit.
pub async fn scan_bus<I, W>(i2c: &mut I, console: &mut W, result: &mut ScanResult) -> usize
where
    I: I2c,
    W: Write,
{
    result.clear();
    let mut found = 0usize;

    info!("Scanning I2C bus...");
    // console output is best effort
    let _ = writeln!(console, "{}", GRID_HEADER);

    for row in 0..ROWS {
        let base = row * COLUMNS;
        let _ = write!(console, "{:02X}: ", base);

        for address in base..base + COLUMNS {
            let cell = if is_reserved(address) {
                GridCell::Reserved
            } else if probe(i2c, address).await.is_present() {
                found += 1;
                if !result.push(address) {
                    debug!("0x{:02X} answered but the result is full", address);
                }
                GridCell::Found(address)
            } else {
                GridCell::Absent
            };

            let _ = write!(console, "{}", cell);
        }
        let _ = writeln!(console);
    }

    info!("Scan complete. Found {} device(s).", found);
    for (index, address) in result.addresses().iter().enumerate() {
        info!("Device[{}] -> 0x{:02X}", index, address);
    }

    found
}
