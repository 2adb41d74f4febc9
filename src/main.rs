//! VirtualSense Board Bring-Up
//!
//! Entry point: configures the system clock generator, brings up the
//! character LCD with a greeting, and blinks the status LED.

#![no_std]
#![no_main]

use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_stm32::i2c::I2c;
use embassy_stm32::time::Hertz;
use embassy_stm32::{bind_interrupts, peripherals};
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use vsense_bringup::clock::apply_clock_config;
use vsense_bringup::drivers::clockgen::ClockGen;
use vsense_bringup::drivers::display::Lcd;
use vsense_bringup::prelude::*;

// Bind interrupt handlers
bind_interrupts!(struct Irqs {
    I2C1_EV => embassy_stm32::i2c::EventInterruptHandler<peripherals::I2C1>;
    I2C1_ER => embassy_stm32::i2c::ErrorInterruptHandler<peripherals::I2C1>;
    I2C2_EV => embassy_stm32::i2c::EventInterruptHandler<peripherals::I2C2>;
    I2C2_ER => embassy_stm32::i2c::ErrorInterruptHandler<peripherals::I2C2>;
});

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("VirtualSense bring-up firmware v{}", env!("CARGO_PKG_VERSION"));

    let p = embassy_stm32::init(embassy_stm32::Config::default());

    info!("Peripherals initialized");

    // Status LED
    let led = Output::new(p.PA5, Level::Low, Speed::Low);

    let bus_cfg = I2cBusConfig::default();

    // I2C1 carries the character LCD
    let i2c_lcd = I2c::new(
        p.I2C1,
        p.PB8, // SCL
        p.PB9, // SDA
        Irqs,
        p.DMA1_CH1,
        p.DMA1_CH2,
        Hertz(bus_cfg.bus_freq_hz),
        Default::default(),
    );

    // I2C2 carries the clock generator
    let i2c_clk = I2c::new(
        p.I2C2,
        p.PA9, // SCL
        p.PA8, // SDA
        Irqs,
        p.DMA1_CH3,
        p.DMA1_CH4,
        Hertz(bus_cfg.bus_freq_hz),
        Default::default(),
    );

    info!("I2C buses initialized at {} Hz", bus_cfg.bus_freq_hz);

    // Clock bring-up comes first, the rest of the board runs from its output
    let preset = default_clock_preset();
    let mut clockgen = ClockGen::new(i2c_clk);
    match apply_clock_config(&mut clockgen, &preset, || {
        cortex_m::asm::delay(PLL_STABILIZE_CYCLES);
    }) {
        Ok(applied) if applied == preset => {
            info!("Clock configured: {} ({})", DEFAULT_CLOCK_RATE, CLOCKGEN_REV);
        }
        Ok(applied) => {
            warn!("Clock read-back mismatch: wrote [{}], read [{}]", preset, applied);
        }
        Err(e) => {
            warn!("Clock bring-up failed: {}", defmt::Debug2Format(&e));
        }
    }

    // Display greeting
    let mut display = Lcd::new(i2c_lcd);
    display.init();
    display.write_fmt(format_args!(
        "VirtualSense ACI {} MHz",
        DEFAULT_CLOCK_RATE.hz() / 1_000_000
    ));

    spawner.spawn(heartbeat_task(led)).unwrap();

    info!("Bring-up complete, entering main loop");

    loop {
        Timer::after(Duration::from_secs(10)).await;
        info!("Main loop tick");
    }
}

/// Heartbeat task - blinks LED to show system is running
#[embassy_executor::task]
async fn heartbeat_task(mut led: Output<'static>) {
    loop {
        led.set_high();
        Timer::after(Duration::from_millis(100)).await;
        led.set_low();
        Timer::after(Duration::from_millis(900)).await;
    }
}
