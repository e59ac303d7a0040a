// Copyright 2026 The pca9532-rs Authors.
// This project is dual-licensed under Apache 2.0 and MIT terms.
// See LICENSE-APACHE and LICENSE-MIT for details.

//! Drives a PCA9532 from a PC through an MCP2221 USB-I2C bridge.
//!
//! LEDs 0..=7 blink on PWM0 at 1 Hz, LEDs 8..=15 breathe dimly on PWM1, then
//! everything is switched off and back on.

use pca9532::{Config, HalWire, LedSelect, LedState, Pca9532, Prescaler, Pwm};
use std::error::Error;
use std::time::Duration;

fn main() {
    if let Err(error) = run() {
        println!("Error: {}", error);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut mcp_config = mcp2221::Config::default();
    mcp_config.i2c_speed_hz = 400_000;
    let mut bus = mcp2221::Handle::open_first(&mcp_config)?;

    // SDA and SCL must idle high, otherwise nothing on the bus will answer.
    bus.check_bus()?;
    println!("{}", bus.get_device_info()?);

    let mut led = Pca9532::initialize(HalWire::new(bus), &Config::default());

    led.set_blink_period(Prescaler::Psc0, pca9532::BLINK_PERIOD_1_S)?;
    led.set_pwm(Pwm::Pwm0, 128)?;
    led.set_blink_period(Prescaler::Psc1, 0)?;
    led.set_pwm(Pwm::Pwm1, 32)?;

    for select in [LedSelect::Ls0, LedSelect::Ls1] {
        for offset in pca9532::ChannelOffset::ALL {
            led.set_channel_state(LedState::Blink0, select, offset)?;
        }
    }
    for number in 8..pca9532::NUM_LEDS {
        led.set_led_state(number, LedState::Blink1)?;
    }
    std::thread::sleep(Duration::from_secs(5));

    led.turn_off()?;
    println!("off, saved {:02x?}", led.saved_led_select());
    std::thread::sleep(Duration::from_secs(2));
    led.turn_on()?;

    for number in 0..pca9532::NUM_LEDS {
        print!("{:?} ", led.led_state(number)?);
    }
    println!();

    Ok(())
}
