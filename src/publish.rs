use core::cell::Cell;

use embassy_sync::{
    blocking_mutex::{raw::NoopRawMutex, Mutex},
    signal::Signal,
};
use thiserror::Error;

use crate::{
    link::{LinkState, LinkStatus},
    scan_result::{ScanRecord, ScanResult, RECORD_LEN},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Handed to the GATT server while a central is connected.
    Notified,
    /// Snapshot stored, but nobody is listening right now.
    NoSubscriber,
    /// Built without a radio; the console already has everything.
    ConsoleOnly,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PublishError {
    #[error("BLE stack is down")]
    LinkDown,
}

/// Where a finished scan goes once the grid has been printed.
pub trait Publish {
    fn publish(&self, result: &ScanResult) -> Result<PublishOutcome, PublishError>;
}

impl<P: Publish + ?Sized> Publish for &P {
    fn publish(&self, result: &ScanResult) -> Result<PublishOutcome, PublishError> {
        (**self).publish(result)
    }
}

pub struct ConsoleOnly;

impl Publish for ConsoleOnly {
    fn publish(&self, _result: &ScanResult) -> Result<PublishOutcome, PublishError> {
        Ok(PublishOutcome::ConsoleOnly)
    }
}

/// Latest scan record shared between the poll loop and the GATT server.
///
/// The poll loop is the only writer. The GATT server reads the snapshot for
/// ATT reads and waits on the signal to send notifications.
pub struct ResultChannel {
    latest: Mutex<NoopRawMutex, Cell<ScanRecord>>,
    updated: Signal<NoopRawMutex, ScanRecord>,
    link: LinkState,
}

impl ResultChannel {
    pub const fn new() -> Self {
        Self {
            latest: Mutex::new(Cell::new([0u8; RECORD_LEN])),
            updated: Signal::new(),
            link: LinkState::new(),
        }
    }

    pub fn link(&self) -> &LinkState {
        &self.link
    }

    pub fn snapshot(&self) -> ScanRecord {
        self.latest.lock(|latest| latest.get())
    }

    /// Copies the snapshot starting at `offset` into `buf`, as an ATT read does.
    pub fn read_at(&self, offset: usize, buf: &mut [u8]) -> usize {
        let record = self.snapshot();
        let tail = record.get(offset..).unwrap_or(&[]);
        let len = tail.len().min(buf.len());

        buf[..len].copy_from_slice(&tail[..len]);
        len
    }

    /// Waits for the next published record.
    pub async fn next_update(&self) -> ScanRecord {
        self.updated.wait().await
    }

    /// Drops an update nobody has picked up yet.
    pub fn discard_pending(&self) {
        self.updated.reset();
    }
}

impl Default for ResultChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl Publish for ResultChannel {
    fn publish(&self, result: &ScanResult) -> Result<PublishOutcome, PublishError> {
        let record = result.to_record();
        self.latest.lock(|latest| latest.set(record));

        if self.link.status() == LinkStatus::Failed {
            return Err(PublishError::LinkDown);
        }

        self.updated.signal(record);

        if self.link.is_connected() {
            Ok(PublishOutcome::Notified)
        } else {
            Ok(PublishOutcome::NoSubscriber)
        }
    }
}
