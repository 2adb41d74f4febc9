//! System configuration and hardware constants
//!
//! Compile-time constants for the VirtualSense controller board. All device
//! addresses, timing values, and the static clock preset selection are
//! centralized here; nothing is negotiated at runtime.

use crate::clock::{ChipRev, ClockRate};

/// I2C bus frequency shared by the LCD and clock generator buses
pub const I2C_FREQUENCY_HZ: u32 = 100_000;

/// ST7032 character LCD I2C address
pub const LCD_I2C_ADDR: u8 = 0x3E;

/// Clock generator I2C address
pub const CLOCKGEN_I2C_ADDR: u8 = 0x65;

/// Display width in characters
pub const LCD_COLS: usize = 16;

/// Display height in lines
pub const LCD_ROWS: usize = 2;

/// Formatted-text buffer capacity in bytes
pub const TEXT_BUFFER_LEN: usize = 80;

/// Settle delay after each LCD transaction, in microseconds
///
/// The controller exposes no readable busy flag on this board, so a fixed
/// delay stands in for polling one. The longest instruction (clear) needs
/// just over a millisecond at the nominal oscillator frequency.
pub const LCD_SETTLE_DELAY_US: u64 = 2_000;

/// Busy-wait cycle count for PLL stabilization after configuration
pub const PLL_STABILIZE_CYCLES: u32 = 10_000;

/// Target system clock applied at boot
pub const DEFAULT_CLOCK_RATE: ClockRate = ClockRate::Mhz100;

/// Register encoding revision of the clock generator fitted to this board
pub const CLOCKGEN_REV: ChipRev = ChipRev::RevB;

/// I2C device address width
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AddressMode {
    /// 7-bit addressing (every device on this board)
    #[default]
    SevenBit,
    /// 10-bit addressing
    TenBit,
}

/// Flat I2C bus configuration record
///
/// Constructed once at startup and handed to bus bring-up; there is no
/// process-wide setup state behind it. Only `bus_freq_hz` reaches the
/// hardware on this MCU; the bus controller has no loopback, repeat, or
/// 10-bit knobs, so the remaining fields record the intended bus setup for
/// boards whose controller does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct I2cBusConfig {
    /// Device address width used on the bus (record of intent, the
    /// controller is fixed at 7-bit)
    pub addr_mode: AddressMode,
    /// Bus clock frequency in Hz
    pub bus_freq_hz: u32,
    /// Loop transmitted data back to the receiver (test mode; no knob on
    /// this MCU)
    pub loopback: bool,
    /// Restart automatically after each transfer (repeat mode; no knob on
    /// this MCU)
    pub repeat_mode: bool,
}

impl Default for I2cBusConfig {
    fn default() -> Self {
        Self {
            addr_mode: AddressMode::SevenBit,
            bus_freq_hz: I2C_FREQUENCY_HZ,
            loopback: false,
            repeat_mode: false,
        }
    }
}

/// Build the preset for the configured boot clock
#[must_use]
pub const fn default_clock_preset() -> crate::clock::PllPreset {
    crate::clock::PllPreset::for_rate(DEFAULT_CLOCK_RATE, CLOCKGEN_REV)
}
