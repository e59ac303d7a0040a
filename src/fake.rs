// Copyright 2026 The pca9532-rs Authors.
// This project is dual-licensed under Apache 2.0 and MIT terms.
// See LICENSE-APACHE and LICENSE-MIT for details.

//! In-memory PCA9532 behind a [`Wire`], for driver tests.

use crate::wire::Wire;
use std::vec::Vec;

const NUM_REGISTERS: usize = 10;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct FakeError;

/// Emulates the chip's register file and records what the driver sends.
///
/// A one-byte transmission sets the register pointer, a two-byte one writes
/// a register. Register writes are logged as `(device, register, value)`.
pub struct FakeWire {
    registers: [u8; NUM_REGISTERS],
    pointer: u8,
    tx_address: u8,
    tx: Vec<u8>,
    rx: Option<u8>,
    pub begin_count: usize,
    pub writes: Vec<(u8, u8, u8)>,
    pub pointer_writes: Vec<u8>,
    pub reads: usize,
    pub fail_reads: bool,
    /// Start failing reads once this many have succeeded.
    pub fail_reads_after: Option<usize>,
    pub fail_writes: bool,
    /// Start failing register writes once this many have succeeded.
    pub fail_writes_after: Option<usize>,
}

impl FakeWire {
    pub fn new() -> Self {
        Self {
            registers: [0u8; NUM_REGISTERS],
            pointer: 0,
            tx_address: 0,
            tx: Vec::new(),
            rx: None,
            begin_count: 0,
            writes: Vec::new(),
            pointer_writes: Vec::new(),
            reads: 0,
            fail_reads: false,
            fail_reads_after: None,
            fail_writes: false,
            fail_writes_after: None,
        }
    }

    pub fn reg(&self, addr: u8) -> u8 {
        self.registers[addr as usize]
    }

    pub fn set_reg(&mut self, addr: u8, value: u8) {
        self.registers[addr as usize] = value;
    }

    pub fn registers_written_within_map(&self) -> bool {
        self.writes
            .iter()
            .all(|(_, reg, _)| (*reg as usize) < NUM_REGISTERS)
    }

    fn read_fails(&self) -> bool {
        self.fail_reads || self.fail_reads_after.map_or(false, |n| self.reads >= n)
    }
}

impl Wire for FakeWire {
    type Error = FakeError;

    fn begin(&mut self) {
        self.begin_count += 1;
    }

    fn begin_transmission(&mut self, address: u8) {
        self.tx_address = address;
        self.tx.clear();
    }

    fn write(&mut self, byte: u8) {
        self.tx.push(byte);
    }

    fn end_transmission(&mut self) -> Result<(), FakeError> {
        if self.fail_writes {
            return Err(FakeError);
        }
        match self.tx[..] {
            [pointer] => {
                self.pointer = pointer;
                self.pointer_writes.push(pointer);
            }
            [register, value] => {
                if self.fail_writes_after.map_or(false, |n| self.writes.len() >= n) {
                    return Err(FakeError);
                }
                if let Some(slot) = self.registers.get_mut(register as usize) {
                    *slot = value;
                }
                self.writes.push((self.tx_address, register, value));
            }
            _ => panic!("unexpected transmission {:?}", self.tx),
        }
        Ok(())
    }

    fn request_from(&mut self, _address: u8, count: usize) -> Result<usize, FakeError> {
        assert_eq!(count, 1);
        if self.read_fails() {
            self.rx = None;
            return Ok(0);
        }
        self.reads += 1;
        self.rx = Some(self.reg(self.pointer));
        Ok(1)
    }

    fn available(&self) -> usize {
        self.rx.map_or(0, |_| 1)
    }

    fn read(&mut self) -> Option<u8> {
        self.rx.take()
    }
}
