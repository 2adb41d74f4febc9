//! VirtualSense Board Bring-Up Firmware
//!
//! Bring-up drivers for the VirtualSense controller board: a 16x2 I2C
//! character LCD (ST7032-class controller) and the board clock generator
//! (PLL). Both are thin, fixed sequences of bus writes; neither holds state
//! between calls and neither talks to the other.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION LAYER                         │
//! │        main: clock bring-up, display greeting                │
//! ├─────────────────────────────────────────────────────────────┤
//! │                     DRIVER LAYER                             │
//! │        Lcd (display)      │      ClockGen (PLL)              │
//! ├─────────────────────────────────────────────────────────────┤
//! │                      PURE LOGIC                              │
//! │   lcd transaction planner │ clock presets + apply sequence   │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    HAL / RUNTIME                             │
//! │        I2cBus  │  embassy-rs (async/await executor)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Pure planning, thin transport**: wire sequences are computed by
//!   host-testable modules; the drivers only move the bytes
//! - **No global handles**: configuration records and driver structs are
//!   passed by value into each call
//! - **Explicit error handling**: the clock path fails fast through
//!   `Result`; the display path is best-effort by contract
//! - **No unsafe in application code**: all unsafe isolated in HAL layers

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;

/// Hardware Abstraction Layer
///
/// Safe abstractions over the MCU peripherals the bring-up drivers touch.
#[cfg(feature = "embedded")]
pub mod hal;

/// Peripheral Drivers
///
/// High-level drivers for the external ICs (character LCD, clock generator).
#[cfg(feature = "embedded")]
pub mod drivers;

/// Character LCD Transaction Planning
///
/// Pure computation of the LCD wire sequences (init, clear, wrapped text).
pub mod lcd;

/// Clock Generator Configuration
///
/// Frequency presets and the fail-fast PLL bring-up sequence.
pub mod clock;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
#[cfg(feature = "embedded")]
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::clock::{ChipRev, ClockRate, PllControl, PllPreset};
    pub use crate::config::*;

    // Common traits
    pub use embedded_hal::digital::OutputPin;
    pub use embedded_hal_async::i2c::I2c;

    // Embassy
    pub use embassy_time::{Duration, Instant, Timer};

    // Error handling
    pub use core::result::Result;

    // Logging
    pub use defmt::{debug, error, info, trace, warn};
}
