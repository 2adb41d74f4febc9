//! Character LCD transaction planner
//!
//! Computes the raw I2C transactions for the board's ST7032-class 16x2
//! character LCD. Planning is pure so the wire contract can be checked on
//! the host; [`crate::drivers::display`] sends the planned bytes.
//!
//! Every transfer starts with a control byte: `0x00` introduces commands,
//! `0x40` introduces character data. Text longer than one line continues on
//! line 2 after a cursor move; anything past the second line is dropped.

use crate::config::LCD_COLS;
use heapless::Vec;

/// Control byte introducing a command transfer
pub const CTRL_COMMAND: u8 = 0x00;

/// Control byte introducing a character-data transfer
pub const CTRL_DATA: u8 = 0x40;

/// ST7032 command bytes
pub mod cmd {
    /// Clear the display and home the cursor
    pub const CLEAR: u8 = 0x01;
    /// 8-bit bus, two lines, instruction table 0
    pub const FUNCTION_SET: u8 = 0x38;
    /// 8-bit bus, two lines, instruction table 1
    pub const FUNCTION_SET_EXT: u8 = 0x39;
    /// Internal oscillator bias and frequency
    pub const OSC_FREQUENCY: u8 = 0x14;
    /// Contrast, low bits
    pub const CONTRAST_LOW: u8 = 0x74;
    /// Booster on, contrast high bits
    pub const POWER_ICON_CONTRAST: u8 = 0x54;
    /// Voltage follower on, amplifier gain
    pub const FOLLOWER: u8 = 0x6F;
    /// Display on, cursor on, blink on
    pub const DISPLAY_ON: u8 = 0x0F;
    /// DDRAM address of the first character of line 2
    pub const SET_DDRAM_LINE2: u8 = 0xC0;
}

/// Full controller power-up sequence, control prefix included
pub const INIT_SEQUENCE: [u8; 9] = [
    CTRL_COMMAND,
    cmd::FUNCTION_SET,
    cmd::FUNCTION_SET_EXT,
    cmd::OSC_FREQUENCY,
    cmd::CONTRAST_LOW,
    cmd::POWER_ICON_CONTRAST,
    cmd::FOLLOWER,
    cmd::DISPLAY_ON,
    cmd::CLEAR,
];

/// Largest planned transfer: control byte plus one line of characters
pub const MAX_TRANSACTION: usize = LCD_COLS + 1;

/// One planned bus write to the display
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    bytes: Vec<u8, MAX_TRANSACTION>,
}

impl Transaction {
    fn with_prefix(prefix: u8, payload: &[u8]) -> Self {
        let mut bytes = Vec::new();
        // payload is capped at one line by the planners below
        let _ = bytes.push(prefix);
        let _ = bytes.extend_from_slice(&payload[..payload.len().min(LCD_COLS)]);
        Self { bytes }
    }

    fn command(payload: &[u8]) -> Self {
        Self::with_prefix(CTRL_COMMAND, payload)
    }

    fn data(payload: &[u8]) -> Self {
        Self::with_prefix(CTRL_DATA, payload)
    }

    /// The raw bytes to put on the wire
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Plan the controller power-up sequence as a single transaction
#[must_use]
pub fn plan_init() -> Transaction {
    let mut bytes = Vec::new();
    let _ = bytes.extend_from_slice(&INIT_SEQUENCE);
    Transaction { bytes }
}

/// Plan a clear-display transaction
#[must_use]
pub fn plan_clear() -> Transaction {
    Transaction::command(&[cmd::CLEAR])
}

/// One write seam to the display controller
///
/// Implemented by the board's I2C bus; host tests substitute a recorder so
/// the probe branch can be exercised without hardware.
pub trait LcdBus {
    /// Error produced by the underlying bus
    type Error;

    /// Put one transaction's bytes on the wire
    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}

/// Probe the controller and bring it up
///
/// A bare command-prefix write checks whether the controller answers at
/// all. An unresponsive controller gets the full power-up sequence, sent
/// exactly once; a responsive one is only cleared. `settle` runs after
/// every transfer in place of polling a busy flag.
///
/// # Errors
///
/// Only a failed power-up sequence is reported; a failed clear on the
/// responsive path is swallowed like every later best-effort write.
pub fn run_init<B: LcdBus>(bus: &mut B, mut settle: impl FnMut()) -> Result<(), B::Error> {
    let probe = bus.write(&[CTRL_COMMAND]);
    settle();

    let result = if probe.is_err() {
        bus.write(plan_init().bytes())
    } else {
        let _ = bus.write(plan_clear().bytes());
        Ok(())
    };
    settle();
    result
}

/// Plan the transactions for one text write
///
/// Up to three transfers: line 1 data, the cursor move to line 2, line 2
/// data. The first line carries at most [`LCD_COLS`] characters; the
/// remainder is truncated to another [`LCD_COLS`]. Empty text plans nothing.
#[must_use]
pub fn plan_write(text: &str) -> Vec<Transaction, 3> {
    let mut plan = Vec::new();
    let bytes = text.as_bytes();
    if bytes.is_empty() {
        return plan;
    }

    let first = &bytes[..bytes.len().min(LCD_COLS)];
    let _ = plan.push(Transaction::data(first));

    if bytes.len() > LCD_COLS {
        let rest = &bytes[LCD_COLS..];
        let rest = &rest[..rest.len().min(LCD_COLS)];
        let _ = plan.push(Transaction::command(&[cmd::SET_DDRAM_LINE2]));
        let _ = plan.push(Transaction::data(rest));
    }

    plan
}
