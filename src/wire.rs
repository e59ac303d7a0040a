// Copyright 2026 The pca9532-rs Authors.
// This project is dual-licensed under Apache 2.0 and MIT terms.
// See LICENSE-APACHE and LICENSE-MIT for details.

//! Two-wire bus transport used by the driver.
//!
//! [`Wire`] is the byte-at-a-time transaction interface the driver talks to.
//! [`HalWire`] implements it on top of any `embedded-hal` blocking I2C bus, so
//! e.g. an MCP2221 `Handle` or a microcontroller I2C peripheral can be used.

use core::fmt::Display;
use embedded_hal::blocking::i2c;

/// Bytes buffered per transaction by [`HalWire`].
pub const BUFFER_LENGTH: usize = 32;

/// A two-wire bus master.
pub trait Wire {
    type Error;

    /// One-time bus initialization.
    fn begin(&mut self);

    /// Starts queueing a write transaction to `address`.
    fn begin_transmission(&mut self, address: u8);

    /// Queues one byte for the current transaction.
    fn write(&mut self, byte: u8);

    /// Sends the queued bytes and finishes the transaction.
    fn end_transmission(&mut self) -> Result<(), Self::Error>;

    /// Reads up to `count` bytes from `address`. Returns the number received.
    fn request_from(&mut self, address: u8, count: usize) -> Result<usize, Self::Error>;

    /// Number of received bytes not yet consumed by [`Wire::read`].
    fn available(&self) -> usize;

    /// Consumes one received byte.
    fn read(&mut self) -> Option<u8>;
}

impl<W: Wire + ?Sized> Wire for &mut W {
    type Error = W::Error;

    fn begin(&mut self) {
        (**self).begin()
    }

    fn begin_transmission(&mut self, address: u8) {
        (**self).begin_transmission(address)
    }

    fn write(&mut self, byte: u8) {
        (**self).write(byte)
    }

    fn end_transmission(&mut self) -> Result<(), Self::Error> {
        (**self).end_transmission()
    }

    fn request_from(&mut self, address: u8, count: usize) -> Result<usize, Self::Error> {
        (**self).request_from(address, count)
    }

    fn available(&self) -> usize {
        (**self).available()
    }

    fn read(&mut self) -> Option<u8> {
        (**self).read()
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[non_exhaustive]
pub enum WireError<E> {
    /// The underlying I2C bus failed.
    I2c(E),
    /// More than [`BUFFER_LENGTH`] bytes were queued; the excess was dropped.
    BufferOverflow,
}

/// [`Wire`] over an `embedded-hal` blocking I2C bus.
pub struct HalWire<I2C> {
    i2c: I2C,
    address: u8,
    tx: [u8; BUFFER_LENGTH],
    tx_len: usize,
    overflow: bool,
    rx: [u8; BUFFER_LENGTH],
    rx_len: usize,
    rx_pos: usize,
}

impl<I2C> HalWire<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            address: 0,
            tx: [0u8; BUFFER_LENGTH],
            tx_len: 0,
            overflow: false,
            rx: [0u8; BUFFER_LENGTH],
            rx_len: 0,
            rx_pos: 0,
        }
    }

    /// Gives back the I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> Wire for HalWire<I2C>
where
    I2C: i2c::Write<Error = E> + i2c::Read<Error = E>,
{
    type Error = WireError<E>;

    // The HAL bus is already configured by whoever constructed it.
    fn begin(&mut self) {}

    fn begin_transmission(&mut self, address: u8) {
        self.address = address;
        self.tx_len = 0;
        self.overflow = false;
    }

    fn write(&mut self, byte: u8) {
        if self.tx_len < BUFFER_LENGTH {
            self.tx[self.tx_len] = byte;
            self.tx_len += 1;
        } else {
            self.overflow = true;
        }
    }

    fn end_transmission(&mut self) -> Result<(), Self::Error> {
        let len = self.tx_len;
        self.tx_len = 0;
        if self.overflow {
            self.overflow = false;
            return Err(WireError::BufferOverflow);
        }
        self.i2c
            .write(self.address, &self.tx[..len])
            .map_err(WireError::I2c)
    }

    fn request_from(&mut self, address: u8, count: usize) -> Result<usize, Self::Error> {
        let count = count.min(BUFFER_LENGTH);
        self.rx_len = 0;
        self.rx_pos = 0;
        self.i2c
            .read(address, &mut self.rx[..count])
            .map_err(WireError::I2c)?;
        self.rx_len = count;
        Ok(count)
    }

    fn available(&self) -> usize {
        self.rx_len - self.rx_pos
    }

    fn read(&mut self) -> Option<u8> {
        if self.rx_pos < self.rx_len {
            let byte = self.rx[self.rx_pos];
            self.rx_pos += 1;
            Some(byte)
        } else {
            None
        }
    }
}

impl<E: core::fmt::Debug> Display for WireError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            WireError::I2c(inner) => write!(f, "I2C error: {:?}", inner),
            WireError::BufferOverflow => write!(f, "Transmit buffer overflow"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug> std::error::Error for WireError<E> {}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
    use embedded_hal_mock::MockError;
    use std::io::ErrorKind;
    use std::vec;

    const ADDR: u8 = 0x60;

    #[test]
    fn transmission_is_sent_as_one_write() {
        let i2c = I2cMock::new(&[I2cTransaction::write(ADDR, vec![0x06, 0x55])]);
        let mut wire = HalWire::new(i2c);
        wire.begin();
        wire.begin_transmission(ADDR);
        wire.write(0x06);
        wire.write(0x55);
        assert_eq!(wire.end_transmission(), Ok(()));
        wire.release().done();
    }

    #[test]
    fn overflowing_transmission_is_not_sent() {
        let i2c = I2cMock::new(&[]);
        let mut wire = HalWire::new(i2c);
        wire.begin_transmission(ADDR);
        for byte in 0..=BUFFER_LENGTH as u8 {
            wire.write(byte);
        }
        assert_eq!(wire.end_transmission(), Err(WireError::BufferOverflow));
        wire.release().done();
    }

    #[test]
    fn received_bytes_are_consumed_in_order() {
        let i2c = I2cMock::new(&[I2cTransaction::read(ADDR, vec![0xA5, 0x5A])]);
        let mut wire = HalWire::new(i2c);
        assert_eq!(wire.request_from(ADDR, 2), Ok(2));
        assert_eq!(wire.available(), 2);
        assert_eq!(wire.read(), Some(0xA5));
        assert_eq!(wire.available(), 1);
        assert_eq!(wire.read(), Some(0x5A));
        assert_eq!(wire.available(), 0);
        assert_eq!(wire.read(), None);
        wire.release().done();
    }

    #[test]
    fn failed_read_leaves_nothing_available() {
        let i2c = I2cMock::new(&[
            I2cTransaction::read(ADDR, vec![0x00]).with_error(MockError::Io(ErrorKind::Other))
        ]);
        let mut wire = HalWire::new(i2c);
        assert_eq!(
            wire.request_from(ADDR, 1),
            Err(WireError::I2c(MockError::Io(ErrorKind::Other)))
        );
        assert_eq!(wire.available(), 0);
        assert_eq!(wire.read(), None);
        wire.release().done();
    }

    fn send_pwm<W: Wire>(mut wire: W) -> Result<(), W::Error> {
        wire.begin_transmission(ADDR);
        wire.write(0x03);
        wire.write(0x80);
        wire.end_transmission()
    }

    #[test]
    fn borrowed_wire_forwards_to_owner() {
        let i2c = I2cMock::new(&[I2cTransaction::write(ADDR, vec![0x03, 0x80])]);
        let mut owner = HalWire::new(i2c);
        assert!(send_pwm(&mut owner).is_ok());
        owner.release().done();
    }
}
