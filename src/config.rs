//! Configuration primitives for the HX711 driver.

use embedded_hal::spi::{MODE_0, Mode};

use crate::params::Gain;

/// Default SPI clock. One byte spans four HX711 clock periods, keeping each
/// PD_SCK phase well inside the datasheet's 0.2–50 µs window.
pub const DEFAULT_FREQUENCY_HZ: u32 = 115_200;
/// Word size required by the byte-oriented waveforms.
pub const BITS_PER_WORD: u8 = 8;

/// Electrical settings applied to the bus when the driver is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusSettings {
    /// SPI clock frequency in hertz.
    pub frequency_hz: u32,
    /// Clock polarity and phase.
    pub mode: Mode,
    /// Bits per transferred word.
    pub bits_per_word: u8,
}

impl Default for BusSettings {
    fn default() -> Self {
        Self {
            frequency_hz: DEFAULT_FREQUENCY_HZ,
            mode: MODE_0,
            bits_per_word: BITS_PER_WORD,
        }
    }
}

/// User-facing configuration for the HX711 driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    /// Bus settings applied at construction.
    pub bus: BusSettings,
    /// Gain and channel used for the next reads.
    pub gain: Gain,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Checks whether the bus settings can carry the HX711 waveforms.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.bus.bits_per_word != BITS_PER_WORD {
            return Err(ConfigError::UnsupportedWordSize);
        }

        // An idle-high clock powers the HX711 down after 60 µs.
        if self.bus.mode != MODE_0 {
            return Err(ConfigError::UnsupportedMode);
        }

        if self.bus.frequency_hz == 0 {
            return Err(ConfigError::ZeroFrequency);
        }

        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for BusSettings {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "BusSettings {{ frequency_hz: {}, cpol_high: {}, cpha_second: {}, bits_per_word: {} }}",
            self.frequency_hz,
            matches!(self.mode.polarity, embedded_hal::spi::Polarity::IdleHigh),
            matches!(
                self.mode.phase,
                embedded_hal::spi::Phase::CaptureOnSecondTransition
            ),
            self.bits_per_word
        );
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Config {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Config {{ bus: {}, gain: {} }}", self.bus, self.gain);
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::default()`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Overrides the SPI clock frequency.
    pub fn frequency_hz(mut self, frequency_hz: u32) -> Self {
        self.config.bus.frequency_hz = frequency_hz;
        self
    }

    /// Overrides the SPI mode.
    pub fn mode(mut self, mode: Mode) -> Self {
        self.config.bus.mode = mode;
        self
    }

    /// Overrides the word size.
    pub fn bits_per_word(mut self, bits_per_word: u8) -> Self {
        self.config.bus.bits_per_word = bits_per_word;
        self
    }

    /// Sets the gain and channel selection.
    pub fn gain(mut self, gain: Gain) -> Self {
        self.config.gain = gain;
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Validation errors generated while verifying a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Word size other than eight bits.
    UnsupportedWordSize,
    /// SPI mode other than mode 0.
    UnsupportedMode,
    /// Clock frequency of zero.
    ZeroFrequency,
}
