//! Hardware Abstraction Layer
//!
//! Safe abstractions over the MCU peripherals the bring-up drivers touch.
//! This module isolates hardware-specific code; everything above it deals
//! in planned byte sequences and register values.

pub mod i2c;
