//! BLE link lifecycle, as seen from the scanning side.
//!
//! The radio task records [`LinkEvent`]s. Everything else only reads the
//! resulting [`LinkStatus`]. The value is observational and never gates a scan.

use core::sync::atomic::{AtomicU8, Ordering};

use log::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LinkStatus {
    Down = 0,
    Advertising = 1,
    Connected = 2,
    Failed = 3,
}

impl LinkStatus {
    fn from_bits(bits: u8) -> Self {
        match bits {
            1 => LinkStatus::Advertising,
            2 => LinkStatus::Connected,
            3 => LinkStatus::Failed,
            _ => LinkStatus::Down,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEvent {
    AdvertisingStarted,
    CentralConnected,
    CentralDisconnected,
    StackFailed,
}

pub struct LinkState {
    status: AtomicU8,
}

impl LinkState {
    pub const fn new() -> Self {
        Self {
            status: AtomicU8::new(LinkStatus::Down as u8),
        }
    }

    pub fn record(&self, event: LinkEvent) {
        let next = match event {
            LinkEvent::AdvertisingStarted => LinkStatus::Advertising,
            LinkEvent::CentralConnected => LinkStatus::Connected,
            LinkEvent::CentralDisconnected => LinkStatus::Down,
            LinkEvent::StackFailed => LinkStatus::Failed,
        };

        let previous = LinkStatus::from_bits(self.status.swap(next as u8, Ordering::AcqRel));
        if previous != next {
            info!("BLE link {:?} -> {:?}", previous, next);
        }
    }

    pub fn status(&self) -> LinkStatus {
        LinkStatus::from_bits(self.status.load(Ordering::Acquire))
    }

    pub fn is_connected(&self) -> bool {
        self.status() == LinkStatus::Connected
    }
}

impl Default for LinkState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_down() {
        let link = LinkState::new();
        assert_eq!(link.status(), LinkStatus::Down);
        assert!(!link.is_connected());
    }

    #[test]
    fn follows_a_connection_lifecycle() {
        let link = LinkState::new();

        link.record(LinkEvent::AdvertisingStarted);
        assert_eq!(link.status(), LinkStatus::Advertising);

        link.record(LinkEvent::CentralConnected);
        link.record(LinkEvent::CentralConnected);
        assert!(link.is_connected());

        link.record(LinkEvent::CentralDisconnected);
        assert_eq!(link.status(), LinkStatus::Down);

        link.record(LinkEvent::AdvertisingStarted);
        assert_eq!(link.status(), LinkStatus::Advertising);
    }

    #[test]
    fn stack_failure_sticks_until_advertising_again() {
        let link = LinkState::new();
        link.record(LinkEvent::StackFailed);
        assert_eq!(link.status(), LinkStatus::Failed);

        link.record(LinkEvent::AdvertisingStarted);
        assert_eq!(link.status(), LinkStatus::Advertising);
    }
}
