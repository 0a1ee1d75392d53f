use core::fmt::Write;

use embedded_hal_async::{delay::DelayNs, i2c::I2c};
use log::{debug, info, warn};

use crate::{
    config::{SCAN_INTERVAL_MS, SEPARATOR, SETTLE_DELAY_MS},
    publish::{Publish, PublishOutcome},
    scan_result::ScanResult,
    scanner::scan_bus,
};

/// Everything the scan cycle touches, owned in one place.
pub struct PollLoop<I, W, P> {
    bus: I,
    console: W,
    publisher: P,
    result: ScanResult,
}

impl<I, W, P> PollLoop<I, W, P>
where
    I: I2c,
    W: Write,
    P: Publish,
{
    pub fn new(bus: I, console: W, publisher: P) -> Self {
        Self {
            bus,
            console,
            publisher,
            result: ScanResult::new(),
        }
    }

    pub fn result(&self) -> &ScanResult {
        &self.result
    }

    /// One scan followed by one publish. Returns how many devices answered.
    pub async fn cycle(&mut self) -> usize {
        let found = scan_bus(&mut self.bus, &mut self.console, &mut self.result).await;

        match self.publisher.publish(&self.result) {
            Ok(PublishOutcome::Notified) => debug!("Scan result sent to BLE central"),
            Ok(PublishOutcome::NoSubscriber) => debug!("No BLE central connected"),
            Ok(PublishOutcome::ConsoleOnly) => {}
            Err(e) => warn!("Publishing scan result failed: {}", e),
        }

        found
    }

    /// Waits for devices to settle, then scans every [`SCAN_INTERVAL_MS`] forever.
    pub async fn run<D: DelayNs>(mut self, delay: &mut D) {
        delay.delay_ms(SETTLE_DELAY_MS).await;

        loop {
            self.cycle().await;

            info!("{}", SEPARATOR);
            info!("Waiting {} seconds before next scan...", SCAN_INTERVAL_MS / 1000);
            delay.delay_ms(SCAN_INTERVAL_MS).await;
        }
    }
}
