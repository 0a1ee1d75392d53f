use crate::config::{MAX_FOUND_DEVICES, SCAN_END, SCAN_START};

/// Size of the packed record: one count byte followed by every address slot.
pub const RECORD_LEN: usize = 1 + MAX_FOUND_DEVICES;

/// Packed `{count: u8, addresses: [u8; MAX_FOUND_DEVICES]}`, unused slots zeroed.
pub type ScanRecord = [u8; RECORD_LEN];

/// Addresses found by the most recent scan, ascending, capped at [`MAX_FOUND_DEVICES`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    addresses: heapless::Vec<u8, MAX_FOUND_DEVICES>,
}

impl ScanResult {
    pub const fn new() -> Self {
        Self {
            addresses: heapless::Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.addresses.clear();
    }

    /// Stores `address` if there is room left. Returns `false` when it was dropped.
    pub fn push(&mut self, address: u8) -> bool {
        debug_assert!((SCAN_START..=SCAN_END).contains(&address));
        debug_assert!(self.addresses.last().map_or(true, |&last| last < address));

        self.addresses.push(address).is_ok()
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.addresses.is_full()
    }

    pub const fn capacity(&self) -> usize {
        MAX_FOUND_DEVICES
    }

    pub fn addresses(&self) -> &[u8] {
        &self.addresses
    }

    pub fn to_record(&self) -> ScanRecord {
        let mut record = [0u8; RECORD_LEN];
        // len <= MAX_FOUND_DEVICES, which fits in a byte
        record[0] = self.addresses.len() as u8;
        record[1..=self.addresses.len()].copy_from_slice(&self.addresses);
        record
    }
}

impl Default for ScanResult {
    fn default() -> Self {
        Self::new()
    }
}
