//! Peripheral Drivers
//!
//! High-level drivers for the external ICs on the board.
//! These provide domain-specific abstractions over the HAL layer.

pub mod clockgen;
pub mod display;
