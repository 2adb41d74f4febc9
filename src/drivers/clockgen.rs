//! Clock Generator Driver
//!
//! Implements the [`PllControl`] primitives for the board's I2C clock
//! generator. Register access is blocking: clock bring-up runs exactly once
//! at boot, before anything else needs the bus, and every step must finish
//! before the next begins.

use crate::clock::{PllControl, PllPreset};
use crate::hal::i2c::{I2cAddress, I2cBus};
use embassy_stm32::i2c::{Error as I2cError, I2c};
use embassy_stm32::mode::Async;

/// Clock generator register addresses
mod reg {
    /// Device status (bit 7: self-test in progress)
    pub const STATUS: u8 = 0x00;
    /// Control register, see the `CTRL_*` bits
    pub const CONTROL: u8 = 0x01;
    /// Feedback multiplier, high byte first
    pub const MULTIPLIER: u8 = 0x02;
    /// Reference divider
    pub const DIVIDER: u8 = 0x04;
    /// Clock mode
    pub const CLOCK_MODE: u8 = 0x06;
    /// Output post-divider
    pub const POST_DIVIDER: u8 = 0x08;
}

/// Control register: reset the PLL block
const CTRL_RESET: u8 = 0x80;
/// Control register: route the reference clock straight to the output
const CTRL_BYPASS: u8 = 0x02;
/// Control register: drive the output from the PLL
const CTRL_ENABLE: u8 = 0x01;

/// Clock generator driver
pub struct ClockGen<'d> {
    bus: I2cBus<'d>,
    control: u8,
}

impl<'d> ClockGen<'d> {
    /// Create a new clock generator driver owning its bus
    #[must_use]
    pub fn new(i2c: I2c<'d, Async>) -> Self {
        Self {
            bus: I2cBus::new(i2c),
            control: 0,
        }
    }

    fn write_control(&mut self, control: u8) -> Result<(), I2cError> {
        self.bus
            .blocking_write_reg(I2cAddress::CLOCKGEN, reg::CONTROL, control)?;
        self.control = control;
        Ok(())
    }

    fn write_field(&mut self, base: u8, value: u16) -> Result<(), I2cError> {
        let [hi, lo] = value.to_be_bytes();
        self.bus
            .blocking_write(I2cAddress::CLOCKGEN, &[base, hi, lo])
    }

    fn read_field(&mut self, base: u8) -> Result<u16, I2cError> {
        let mut buf = [0u8; 2];
        self.bus
            .blocking_write_read(I2cAddress::CLOCKGEN, &[base], &mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }
}

impl PllControl for ClockGen<'_> {
    type Error = I2cError;

    fn init(&mut self) -> Result<(), I2cError> {
        // reading the status register doubles as a presence check
        let _ = self
            .bus
            .blocking_read_reg(I2cAddress::CLOCKGEN, reg::STATUS)?;
        Ok(())
    }

    fn reset(&mut self) -> Result<(), I2cError> {
        self.write_control(CTRL_RESET)?;
        self.write_control(0)
    }

    fn bypass(&mut self) -> Result<(), I2cError> {
        self.write_control(self.control | CTRL_BYPASS)
    }

    fn configure(&mut self, preset: &PllPreset) -> Result<(), I2cError> {
        self.write_field(reg::MULTIPLIER, preset.multiplier)?;
        self.write_field(reg::DIVIDER, preset.divider)?;
        self.write_field(reg::CLOCK_MODE, preset.clock_mode)?;
        self.write_field(reg::POST_DIVIDER, preset.post_divider)
    }

    fn read_config(&mut self) -> Result<PllPreset, I2cError> {
        Ok(PllPreset {
            multiplier: self.read_field(reg::MULTIPLIER)?,
            divider: self.read_field(reg::DIVIDER)?,
            clock_mode: self.read_field(reg::CLOCK_MODE)?,
            post_divider: self.read_field(reg::POST_DIVIDER)?,
        })
    }

    fn enable(&mut self) -> Result<(), I2cError> {
        self.write_control((self.control | CTRL_ENABLE) & !CTRL_BYPASS)
    }
}
