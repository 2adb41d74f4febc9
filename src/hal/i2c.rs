//! I2C Bus Abstractions
//!
//! Bus access for the board's I2C peripherals. All transfers are blocking:
//! both bring-up sequences run step by step, each transaction finishing
//! before the next begins.

use embassy_stm32::i2c::{Error as I2cError, I2c};
use embassy_stm32::mode::Async;

/// I2C operation result
pub type I2cResult<T> = Result<T, I2cError>;

/// I2C device address wrapper
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct I2cAddress(u8);

impl I2cAddress {
    /// ST7032 character LCD address
    pub const LCD: Self = Self(crate::config::LCD_I2C_ADDR);

    /// Clock generator address
    pub const CLOCKGEN: Self = Self(crate::config::CLOCKGEN_I2C_ADDR);

    /// Create from 7-bit address
    #[must_use]
    pub const fn new(addr: u8) -> Self {
        Self(addr & 0x7F)
    }

    /// Get the 7-bit address
    #[must_use]
    pub const fn addr(self) -> u8 {
        self.0
    }
}

impl defmt::Format for I2cAddress {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "0x{:02X}", self.0);
    }
}

/// I2C bus wrapper owning one bus peripheral
pub struct I2cBus<'d> {
    i2c: I2c<'d, Async>,
}

impl<'d> I2cBus<'d> {
    /// Create a new I2C bus wrapper
    #[must_use]
    pub fn new(i2c: I2c<'d, Async>) -> Self {
        Self { i2c }
    }

    /// Write bytes to a device, blocking
    pub fn blocking_write(&mut self, addr: I2cAddress, data: &[u8]) -> I2cResult<()> {
        self.i2c.blocking_write(addr.addr(), data)
    }

    /// Write then read in one combined transaction, blocking
    pub fn blocking_write_read(
        &mut self,
        addr: I2cAddress,
        write: &[u8],
        read: &mut [u8],
    ) -> I2cResult<()> {
        self.i2c.blocking_write_read(addr.addr(), write, read)
    }

    /// Write a single register, blocking
    pub fn blocking_write_reg(&mut self, addr: I2cAddress, reg: u8, value: u8) -> I2cResult<()> {
        self.i2c.blocking_write(addr.addr(), &[reg, value])
    }

    /// Read a single register, blocking
    pub fn blocking_read_reg(&mut self, addr: I2cAddress, reg: u8) -> I2cResult<u8> {
        let mut buf = [0u8];
        self.i2c.blocking_write_read(addr.addr(), &[reg], &mut buf)?;
        Ok(buf[0])
    }
}
