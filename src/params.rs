//! Strongly typed parameter enumerations for the HX711 driver.
//!
//! The HX711 selects the input channel and programmable gain of the *next*
//! conversion from the number of clock pulses issued after the 24 data bits.
//! [`Gain`] names the three legal combinations so callers never deal with raw
//! pulse counts.
//!
//! # Examples
//!
//! ```rust
//! use hx711_spi::params::{Channel, Gain};
//!
//! let gain = Gain::A64;
//! assert_eq!(gain.channel(), Channel::A);
//! assert_eq!(gain.factor(), 64);
//! assert_eq!(gain.clock_pulses(), 27);
//! ```

use crate::protocol::{WAVEFORM_LEN, WAVEFORMS};

/// Gain and input channel selections.
///
/// The discriminant indexes [`WAVEFORMS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Gain {
    /// Channel B, gain 32.
    B32 = 0,
    /// Channel A, gain 64.
    A64 = 1,
    /// Channel A, gain 128 (power-on default).
    A128 = 2,
}

impl Gain {
    /// Position of this selection in the waveform table.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Input channel routed to the ADC.
    pub const fn channel(self) -> Channel {
        match self {
            Self::B32 => Channel::B,
            Self::A64 | Self::A128 => Channel::A,
        }
    }

    /// Programmable amplifier gain factor.
    pub const fn factor(self) -> u8 {
        match self {
            Self::B32 => 32,
            Self::A64 => 64,
            Self::A128 => 128,
        }
    }

    /// Total clock pulses per conversion read, data bits included.
    pub const fn clock_pulses(self) -> u8 {
        match self {
            Self::A128 => 25,
            Self::B32 => 26,
            Self::A64 => 27,
        }
    }

    /// SPI payload that clocks out one conversion and selects this gain.
    pub fn waveform(self) -> &'static [u8; WAVEFORM_LEN] {
        &WAVEFORMS[self.index()]
    }
}

impl Default for Gain {
    fn default() -> Self {
        Self::A128
    }
}

/// Differential input channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// Channel A, gain 128 or 64.
    A,
    /// Channel B, fixed gain 32.
    B,
}
