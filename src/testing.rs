//! Host-side stand-ins for the bus and the timer.

use embedded_hal_async::{
    delay::DelayNs,
    i2c::{self, ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Read(usize),
    Write(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub address: u8,
    pub ops: Vec<Op>,
}

impl Transaction {
    pub fn is_single_byte_read(&self) -> bool {
        self.ops == [Op::Read(1)]
    }
}

#[derive(Debug)]
pub struct Nack;

impl i2c::Error for Nack {
    fn kind(&self) -> ErrorKind {
        ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
    }
}

/// Bus where listed addresses ACK and everything else NACKs.
pub struct FakeBus {
    devices: Vec<u8>,
    write_only: Vec<u8>,
    transactions: Vec<Transaction>,
    probed: Vec<u8>,
}

impl FakeBus {
    pub fn with_devices(devices: &[u8]) -> Self {
        Self {
            devices: devices.to_vec(),
            write_only: Vec::new(),
            transactions: Vec::new(),
            probed: Vec::new(),
        }
    }

    /// Devices that ACK a write but NACK a read.
    pub fn with_write_only(mut self, addresses: &[u8]) -> Self {
        self.write_only = addresses.to_vec();
        self
    }

    /// Swaps the attached devices, as if they were plugged or unplugged.
    pub fn attach(&mut self, devices: &[u8]) {
        self.devices = devices.to_vec();
    }

    pub fn probed(&self) -> &[u8] {
        &self.probed
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn forget(&mut self) {
        self.transactions.clear();
        self.probed.clear();
    }
}

impl ErrorType for FakeBus {
    type Error = Nack;
}

impl I2c for FakeBus {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let ops: Vec<Op> = operations
            .iter()
            .map(|op| match op {
                Operation::Read(buf) => Op::Read(buf.len()),
                Operation::Write(buf) => Op::Write(buf.len()),
            })
            .collect();
        let reads = ops.iter().any(|op| matches!(op, Op::Read(_)));

        self.probed.push(address);
        self.transactions.push(Transaction { address, ops });

        let acks = self.devices.contains(&address)
            || (!reads && self.write_only.contains(&address));
        if !acks {
            return Err(Nack);
        }

        for op in operations.iter_mut() {
            if let Operation::Read(buf) = op {
                buf.fill(0xA5);
            }
        }
        Ok(())
    }
}

/// Records every sleep and returns at once until `budget` sleeps have
/// happened, then parks forever.
pub struct FakeDelay {
    budget: usize,
    pub slept_ms: Vec<u32>,
}

impl FakeDelay {
    pub fn with_budget(budget: usize) -> Self {
        Self {
            budget,
            slept_ms: Vec::new(),
        }
    }
}

impl DelayNs for FakeDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.delay_ms(ns / 1_000_000).await
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.slept_ms.push(ms);
        if self.slept_ms.len() > self.budget {
            core::future::pending::<()>().await;
        }
    }
}
