//! Character LCD Driver
//!
//! Drives the board's I2C 16x2 character LCD with the transactions planned
//! by [`crate::lcd`]. Writes are blocking and best-effort: the controller
//! exposes no readable busy flag on this board, so a fixed settle delay
//! follows every transfer, and only a failed power-up sequence is reported.

use crate::config::{LCD_SETTLE_DELAY_US, TEXT_BUFFER_LEN};
use crate::hal::i2c::{I2cAddress, I2cBus};
use crate::lcd::{self, LcdBus};
use core::fmt;
use embassy_stm32::i2c::{Error as I2cError, I2c};
use embassy_stm32::mode::Async;
use embassy_time::{block_for, Duration};
use heapless::String;

impl LcdBus for I2cBus<'_> {
    type Error = I2cError;

    fn write(&mut self, bytes: &[u8]) -> Result<(), I2cError> {
        self.blocking_write(I2cAddress::LCD, bytes)
    }
}

/// 16x2 character LCD driver
pub struct Lcd<'d> {
    bus: I2cBus<'d>,
}

impl<'d> Lcd<'d> {
    /// Create a new LCD driver owning its bus
    #[must_use]
    pub fn new(i2c: I2c<'d, Async>) -> Self {
        Self {
            bus: I2cBus::new(i2c),
        }
    }

    /// Probe the controller and bring it up
    ///
    /// An unresponsive controller gets the full power-up sequence and a
    /// failure there is logged; a responsive one is only cleared.
    pub fn init(&mut self) {
        if let Err(e) = lcd::run_init(&mut self.bus, settle) {
            defmt::error!(
                "LCD power-up sequence failed: {}",
                defmt::Debug2Format(&e)
            );
        }
    }

    /// Clear the display
    ///
    /// Equivalent to re-running initialization.
    pub fn clear(&mut self) {
        self.init();
    }

    /// Write already-formatted text, wrapped across the two lines
    ///
    /// Reinitializes the controller first, which clears prior content.
    /// Bus failures past initialization are ignored.
    pub fn write_text(&mut self, text: &str) {
        self.init();
        for txn in lcd::plan_write(text) {
            let _ = self.bus.write(txn.bytes());
            settle();
        }
    }

    /// Format into the bounded text buffer and write it
    ///
    /// Text beyond the buffer capacity is dropped.
    pub fn write_fmt(&mut self, args: fmt::Arguments<'_>) {
        let mut text: String<TEXT_BUFFER_LEN> = String::new();
        // a full buffer truncates, it does not fail the write
        let _ = fmt::write(&mut text, args);
        self.write_text(&text);
    }
}

fn settle() {
    block_for(Duration::from_micros(LCD_SETTLE_DELAY_US));
}
