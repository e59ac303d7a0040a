// Copyright 2026 The pca9532-rs Authors.
// This project is dual-licensed under Apache 2.0 and MIT terms.
// See LICENSE-APACHE and LICENSE-MIT for details.

//! PCA9532 register map and the typed values stored in it.

/// Internal oscillator frequency the blink prescalers divide.
pub const OSCILLATOR_HZ: u32 = 152;

pub const BLINK_PERIOD_125_MS: u8 = 18;
pub const BLINK_PERIOD_250_MS: u8 = 37;
pub const BLINK_PERIOD_500_MS: u8 = 75;
pub const BLINK_PERIOD_1_S: u8 = 151;
/// Slowest blink, roughly 1.69 s.
pub const BLINK_PERIOD_MAX: u8 = 255;

/// Number of LED outputs on the chip.
pub const NUM_LEDS: u8 = 16;

const LEDS_PER_SELECT: u8 = 4;
const STATE_MASK: u8 = 0b11;

/// Every register the chip exposes. Addresses are fixed by the datasheet.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(u8)]
pub enum Register {
    Input0 = 0x00,
    Input1 = 0x01,
    Psc0 = 0x02,
    Pwm0 = 0x03,
    Psc1 = 0x04,
    Pwm1 = 0x05,
    Ls0 = 0x06,
    Ls1 = 0x07,
    Ls2 = 0x08,
    Ls3 = 0x09,
}

impl Register {
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

/// Duty cycle registers. 0 is always off, 255 always on.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Pwm {
    Pwm0,
    Pwm1,
}

impl Pwm {
    /// Prescaler that sets the blink period for this PWM group.
    pub const fn prescaler(self) -> Prescaler {
        match self {
            Pwm::Pwm0 => Prescaler::Psc0,
            Pwm::Pwm1 => Prescaler::Psc1,
        }
    }
}

/// Blink frequency prescaler registers.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Prescaler {
    Psc0,
    Psc1,
}

/// LED selector registers, four LEDs each.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LedSelect {
    Ls0,
    Ls1,
    Ls2,
    Ls3,
}

impl LedSelect {
    pub const ALL: [LedSelect; 4] = [LedSelect::Ls0, LedSelect::Ls1, LedSelect::Ls2, LedSelect::Ls3];

    /// Selector register holding `led`, or `None` if `led` is not 0..=15.
    pub const fn for_led(led: u8) -> Option<LedSelect> {
        if led >= NUM_LEDS {
            return None;
        }
        Some(Self::ALL[(led / LEDS_PER_SELECT) as usize])
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// Position of a 2-bit LED field inside a selector register.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(u8)]
pub enum ChannelOffset {
    First = 0,
    Second = 2,
    Third = 4,
    Fourth = 6,
}

impl ChannelOffset {
    pub const ALL: [ChannelOffset; 4] = [
        ChannelOffset::First,
        ChannelOffset::Second,
        ChannelOffset::Third,
        ChannelOffset::Fourth,
    ];

    /// Field holding `led` within its selector register.
    pub const fn for_led(led: u8) -> Option<ChannelOffset> {
        if led >= NUM_LEDS {
            return None;
        }
        Some(Self::ALL[(led % LEDS_PER_SELECT) as usize])
    }

    pub const fn shift(self) -> u8 {
        self as u8
    }

    /// Bits of this field set, all others clear.
    pub const fn mask(self) -> u8 {
        STATE_MASK << self.shift()
    }
}

/// Output state of a single LED.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(u8)]
pub enum LedState {
    /// High impedance, LED off. Power-on default.
    Off = 0b00,
    /// Driven low, LED on.
    On = 0b01,
    /// Follows PWM0 duty cycle at PSC0 rate.
    Blink0 = 0b10,
    /// Follows PWM1 duty cycle at PSC1 rate.
    Blink1 = 0b11,
}

impl LedState {
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Decodes the low two bits of `value`.
    pub const fn from_bits(value: u8) -> LedState {
        match value & STATE_MASK {
            0b00 => LedState::Off,
            0b01 => LedState::On,
            0b10 => LedState::Blink0,
            _ => LedState::Blink1,
        }
    }

    /// A selector byte with this state in all four fields.
    pub const fn replicated(self) -> u8 {
        let s = self.bits();
        s | s << 2 | s << 4 | s << 6
    }

    /// Returns `register` with the field at `offset` replaced by this state.
    pub const fn apply(self, register: u8, offset: ChannelOffset) -> u8 {
        (register & !offset.mask()) | (self.bits() << offset.shift())
    }

    /// Extracts the state stored at `offset` in `register`.
    pub const fn extract(register: u8, offset: ChannelOffset) -> LedState {
        LedState::from_bits(register >> offset.shift())
    }
}

impl From<Pwm> for Register {
    fn from(pwm: Pwm) -> Self {
        match pwm {
            Pwm::Pwm0 => Register::Pwm0,
            Pwm::Pwm1 => Register::Pwm1,
        }
    }
}

impl From<Prescaler> for Register {
    fn from(psc: Prescaler) -> Self {
        match psc {
            Prescaler::Psc0 => Register::Psc0,
            Prescaler::Psc1 => Register::Psc1,
        }
    }
}

impl From<LedSelect> for Register {
    fn from(ls: LedSelect) -> Self {
        match ls {
            LedSelect::Ls0 => Register::Ls0,
            LedSelect::Ls1 => Register::Ls1,
            LedSelect::Ls2 => Register::Ls2,
            LedSelect::Ls3 => Register::Ls3,
        }
    }
}

/// Prescaler value for a blink period, `period_ms / (1 / 152Hz) - 1`.
/// Periods shorter than one oscillator tick give 0, longer than ~1.69 s give 255.
pub fn prescaler_for_period_ms(period_ms: u32) -> u8 {
    let ticks = period_ms.saturating_mul(OSCILLATOR_HZ) / 1000;
    ticks.saturating_sub(1).min(u8::MAX as u32) as u8
}
