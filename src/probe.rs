use embedded_hal_async::i2c::{Error, I2c};
use log::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Present,
    Absent,
}

impl Presence {
    pub fn is_present(self) -> bool {
        self == Presence::Present
    }
}

/// Checks for a device at `address` with a single one-byte read.
///
/// Any transaction error counts as absent. Devices that ACK writes but NACK
/// reads are therefore reported absent.
pub async fn probe<I: I2c>(i2c: &mut I, address: u8) -> Presence {
    let mut scratch = [0u8; 1];

    match i2c.read(address, &mut scratch).await {
        Ok(()) => Presence::Present,
        Err(e) => {
            trace!("0x{:02X}: {:?}", address, e.kind());
            Presence::Absent
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeBus;
    use embassy_futures::block_on;

    #[test]
    fn acked_read_is_present() {
        let mut bus = FakeBus::with_devices(&[0x44]);

        assert_eq!(block_on(probe(&mut bus, 0x44)), Presence::Present);
    }

    #[test]
    fn nack_is_absent() {
        let mut bus = FakeBus::with_devices(&[0x44]);

        assert_eq!(block_on(probe(&mut bus, 0x45)), Presence::Absent);
    }

    #[test]
    fn issues_exactly_one_single_byte_read() {
        let mut bus = FakeBus::with_devices(&[0x50]);

        block_on(probe(&mut bus, 0x50));
        block_on(probe(&mut bus, 0x51));

        assert_eq!(bus.probed(), &[0x50, 0x51]);
        assert!(bus.transactions().iter().all(|t| t.is_single_byte_read()));
    }

    #[test]
    fn write_only_devices_are_missed() {
        let mut bus = FakeBus::with_devices(&[]).with_write_only(&[0x29]);

        assert_eq!(block_on(probe(&mut bus, 0x29)), Presence::Absent);
    }
}
