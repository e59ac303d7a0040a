// Copyright 2026 The pca9532-rs Authors.
// This project is dual-licensed under Apache 2.0 and MIT terms.
// See LICENSE-APACHE and LICENSE-MIT for details.

//! Driver for the PCA9532 16-channel I2C LED dimmer. Each LED can be off, on,
//! or follow one of two PWM/blink generators.
//!
//! The bus is anything implementing [`Wire`]. Use [`HalWire`] to drive the
//! chip from an `embedded-hal` blocking I2C bus.

#![no_std]

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod register;
pub mod wire;

#[cfg(test)]
mod fake;

use core::fmt::Display;
use log::{debug, trace, warn};

pub use register::{
    prescaler_for_period_ms, ChannelOffset, LedSelect, LedState, Prescaler, Pwm, Register,
    BLINK_PERIOD_125_MS, BLINK_PERIOD_1_S, BLINK_PERIOD_250_MS, BLINK_PERIOD_500_MS,
    BLINK_PERIOD_MAX, NUM_LEDS, OSCILLATOR_HZ,
};
pub use wire::{HalWire, Wire, WireError};

/// Address with A2, A1 and A0 all tied low.
pub const DEFAULT_ADDRESS: u8 = 0x60;

pub type Result<T, E> = core::result::Result<T, Error<E>>;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[non_exhaustive]
pub enum Error<E> {
    /// The bus transport failed.
    Bus(E),
    /// A register read finished without exactly one byte to read.
    NoData,
    InvalidLed(u8),
}

#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub struct Config {
    pub address: u8,
    /// PWM group used by `set_pwm_a` and `set_blink_a`.
    pub pwm_a: Pwm,
    /// PWM group used by `set_pwm_b` and `set_blink_b`.
    pub pwm_b: Pwm,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            pwm_a: Pwm::Pwm0,
            pwm_b: Pwm::Pwm1,
        }
    }
}

/// I2C address for the given levels of the A2, A1 and A0 pins.
pub const fn address_from_pins(a2: bool, a1: bool, a0: bool) -> u8 {
    DEFAULT_ADDRESS | (a2 as u8) << 2 | (a1 as u8) << 1 | a0 as u8
}

/// An initialized PCA9532.
///
/// The handle remembers the LED selector registers captured by
/// [`turn_off`](Self::turn_off) so that [`turn_on`](Self::turn_on) can put
/// them back. Nothing else is cached; every other operation goes to the chip.
pub struct Pca9532<W> {
    wire: W,
    address: u8,
    pwm_a: Pwm,
    pwm_b: Pwm,
    saved: [Option<u8>; 4],
    off: bool,
}

impl<W: Wire> Pca9532<W> {
    /// Takes the bus (or a `&mut` borrow of it), runs its one-time
    /// initialization and binds the driver to `config.address`.
    pub fn initialize(mut wire: W, config: &Config) -> Self {
        wire.begin();
        debug!(
            "PCA9532 at 0x{:02x}, groups {:?}/{:?}",
            config.address, config.pwm_a, config.pwm_b
        );
        Self {
            wire,
            address: config.address,
            pwm_a: config.pwm_a,
            pwm_b: config.pwm_b,
            saved: [None; 4],
            off: false,
        }
    }

    /// Gives back the bus.
    pub fn release(self) -> W {
        self.wire
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn pwm_groups(&self) -> (Pwm, Pwm) {
        (self.pwm_a, self.pwm_b)
    }

    /// Selector contents captured by the last [`turn_off`](Self::turn_off),
    /// `None` for registers never captured.
    pub fn saved_led_select(&self) -> [Option<u8>; 4] {
        self.saved
    }

    /// Writes the selector registers saved by [`turn_off`](Self::turn_off)
    /// back to LS0..LS3.
    ///
    /// Registers that were never saved are written as all-off. Calling
    /// `turn_off` twice without `turn_on` in between saves the all-off
    /// pattern, so this then restores all-off as well.
    pub fn turn_on(&mut self) -> Result<(), W::Error> {
        if self.saved.iter().any(Option::is_none) {
            warn!("turn_on without a saved LED state, unsaved registers restore as off");
        }
        debug!("turn on, restoring {:?}", self.saved);
        for ls in LedSelect::ALL {
            let value = self.saved[ls.index()].unwrap_or(LedState::Off.replicated());
            self.write_register(ls.into(), value)?;
        }
        self.off = false;
        Ok(())
    }

    /// Saves each selector register then switches its LEDs off, LS0 to LS3.
    ///
    /// Anything saved by an earlier call is forgotten first, so if this stops
    /// part way the registers it didn't reach report `None`.
    pub fn turn_off(&mut self) -> Result<(), W::Error> {
        if self.off {
            warn!("turn_off while already off, the saved LED state is overwritten with off");
        }
        self.saved = [None; 4];
        for ls in LedSelect::ALL {
            let value = self.read_register(ls.into())?;
            self.saved[ls.index()] = Some(value);
            self.write_register(ls.into(), LedState::Off.replicated())?;
        }
        debug!("turn off, saved {:?}", self.saved);
        self.off = true;
        Ok(())
    }

    /// Sets the duty cycle of one PWM group. 0 is always off, 255 always on.
    pub fn set_pwm(&mut self, pwm: Pwm, duty: u8) -> Result<(), W::Error> {
        self.write_register(pwm.into(), duty)
    }

    /// Sets both PWM groups to the same duty cycle, PWM0 first.
    pub fn set_group_pwm(&mut self, duty: u8) -> Result<(), W::Error> {
        self.write_register(Register::Pwm0, duty)?;
        self.write_register(Register::Pwm1, duty)
    }

    /// Sets the raw blink prescaler. The period is `(period + 1) / 152` seconds,
    /// see [`prescaler_for_period_ms`].
    pub fn set_blink_period(&mut self, prescaler: Prescaler, period: u8) -> Result<(), W::Error> {
        self.write_register(prescaler.into(), period)
    }

    pub fn set_pwm_a(&mut self, duty: u8) -> Result<(), W::Error> {
        self.set_pwm(self.pwm_a, duty)
    }

    pub fn set_pwm_b(&mut self, duty: u8) -> Result<(), W::Error> {
        self.set_pwm(self.pwm_b, duty)
    }

    pub fn set_blink_a(&mut self, period: u8) -> Result<(), W::Error> {
        self.set_blink_period(self.pwm_a.prescaler(), period)
    }

    pub fn set_blink_b(&mut self, period: u8) -> Result<(), W::Error> {
        self.set_blink_period(self.pwm_b.prescaler(), period)
    }

    /// Changes the state of the LED at `offset` in `select`, leaving the other
    /// three LEDs of that register untouched. If the register can't be read,
    /// nothing is written.
    pub fn set_channel_state(
        &mut self,
        state: LedState,
        select: LedSelect,
        offset: ChannelOffset,
    ) -> Result<(), W::Error> {
        let prev = self.read_register(select.into())?;
        self.write_register(select.into(), state.apply(prev, offset))
    }

    /// Puts all sixteen LEDs in `state`. Overwrites LS0..LS3 without reading them.
    pub fn set_all_channels_state(&mut self, state: LedState) -> Result<(), W::Error> {
        let value = state.replicated();
        for ls in LedSelect::ALL {
            self.write_register(ls.into(), value)?;
        }
        Ok(())
    }

    /// Like [`set_channel_state`](Self::set_channel_state), addressing the LED
    /// by its number (0..=15).
    pub fn set_led_state(&mut self, led: u8, state: LedState) -> Result<(), W::Error> {
        let (select, offset) = locate(led)?;
        self.set_channel_state(state, select, offset)
    }

    /// Reads back the state of one LED.
    pub fn led_state(&mut self, led: u8) -> Result<LedState, W::Error> {
        let (select, offset) = locate(led)?;
        let value = self.read_register(select.into())?;
        Ok(LedState::extract(value, offset))
    }

    fn write_register(&mut self, register: Register, data: u8) -> Result<(), W::Error> {
        trace!("write {:?} <- 0x{:02x}", register, data);
        self.wire.begin_transmission(self.address);
        self.wire.write(register.addr());
        self.wire.write(data);
        self.wire.end_transmission().map_err(Error::Bus)
    }

    fn read_register(&mut self, register: Register) -> Result<u8, W::Error> {
        // Set the register pointer, then read one byte from it.
        self.wire.begin_transmission(self.address);
        self.wire.write(register.addr());
        self.wire.end_transmission().map_err(Error::Bus)?;

        self.wire.request_from(self.address, 1).map_err(Error::Bus)?;
        if self.wire.available() == 1 {
            if let Some(value) = self.wire.read() {
                trace!("read {:?} -> 0x{:02x}", register, value);
                return Ok(value);
            }
        }
        warn!("no data reading {:?} from 0x{:02x}", register, self.address);
        Err(Error::NoData)
    }
}

fn locate<E>(led: u8) -> Result<(LedSelect, ChannelOffset), E> {
    match (LedSelect::for_led(led), ChannelOffset::for_led(led)) {
        (Some(select), Some(offset)) => Ok((select, offset)),
        _ => Err(Error::InvalidLed(led)),
    }
}

impl<E: core::fmt::Debug> Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Bus(inner) => write!(f, "Bus error: {:?}", inner),
            Error::NoData => write!(f, "No data available"),
            Error::InvalidLed(led) => write!(f, "Invalid LED {}", led),
        }
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug> std::error::Error for Error<E> {}
