//! Configuration and Constants Tests
//!
//! Tests to verify configuration values are valid and consistent.
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test config_tests

use vsense_bringup::clock::ClockRate;
use vsense_bringup::config::*;

// =============================================================================
// I2C Configuration Tests
// =============================================================================

#[test]
fn i2c_frequency_standard() {
    // Standard I2C speeds: 100kHz, 400kHz, 1MHz
    assert!(
        I2C_FREQUENCY_HZ == 100_000 || I2C_FREQUENCY_HZ == 400_000 || I2C_FREQUENCY_HZ == 1_000_000
    );
}

#[test]
fn lcd_address_valid() {
    // ST7032 responds at fixed address 0x3E
    assert_eq!(LCD_I2C_ADDR, 0x3E);
}

#[test]
fn device_addresses_are_7bit() {
    assert!(LCD_I2C_ADDR < 0x80);
    assert!(CLOCKGEN_I2C_ADDR < 0x80);
}

#[test]
fn device_addresses_distinct() {
    assert_ne!(LCD_I2C_ADDR, CLOCKGEN_I2C_ADDR);
}

// =============================================================================
// Bus Configuration Record
// =============================================================================

#[test]
fn bus_config_defaults() {
    let cfg = I2cBusConfig::default();
    assert_eq!(cfg.addr_mode, AddressMode::SevenBit);
    assert_eq!(cfg.bus_freq_hz, I2C_FREQUENCY_HZ);
    assert!(!cfg.loopback);
    assert!(!cfg.repeat_mode);
}

#[test]
fn address_mode_defaults_to_7bit() {
    assert_eq!(AddressMode::default(), AddressMode::SevenBit);
}

// =============================================================================
// Display Configuration Tests
// =============================================================================

#[test]
fn display_geometry() {
    assert_eq!(LCD_COLS, 16);
    assert_eq!(LCD_ROWS, 2);
}

#[test]
fn text_buffer_holds_both_lines() {
    assert!(TEXT_BUFFER_LEN >= LCD_COLS * LCD_ROWS);
}

#[test]
fn settle_delay_covers_clear_instruction() {
    // Clear needs just over 1ms at the nominal oscillator frequency
    assert!(LCD_SETTLE_DELAY_US >= 1_100);
    assert!(LCD_SETTLE_DELAY_US <= 10_000);
}

// =============================================================================
// Clock Configuration Tests
// =============================================================================

#[test]
fn stabilize_wait_nonzero() {
    assert!(PLL_STABILIZE_CYCLES > 0);
}

#[test]
fn default_clock_rate_is_100mhz() {
    assert_eq!(DEFAULT_CLOCK_RATE, ClockRate::Mhz100);
    assert_eq!(DEFAULT_CLOCK_RATE.hz(), 100_000_000);
}

#[test]
fn default_preset_matches_table() {
    use vsense_bringup::clock::PllPreset;
    let preset = default_clock_preset();
    assert_eq!(preset, PllPreset::for_rate(DEFAULT_CLOCK_RATE, CLOCKGEN_REV));
}
