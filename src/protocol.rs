//! Bit-level HX711 protocol emulated over SPI.
//!
//! The HX711 clock input (PD_SCK) is driven from MOSI and its data output
//! (DOUT) is sampled on MISO. Each transmitted byte therefore carries four
//! clock periods: odd bit positions are the clock-high phases and even bit
//! positions are the clock-low phases. The chip's data bit is picked up from
//! the even positions of the received byte, which arrives inverted.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

/// Bytes in every transmitted waveform and received response.
pub const WAVEFORM_LEN: usize = 7;
/// Leading response bytes carrying the 24-bit conversion result.
pub const DATA_BYTES: usize = 6;
/// Width of a conversion result in bits.
pub const DATA_BITS: u32 = 24;

/// Smallest value the ADC reports (`0x800000` sign-extended).
pub const HX711_MINIMUM: i32 = -(1 << (DATA_BITS - 1));
/// Largest value the ADC reports (`0x7FFFFF`).
pub const HX711_MAXIMUM: i32 = (1 << (DATA_BITS - 1)) - 1;

const DATA_MASK: u32 = (1 << DATA_BITS) - 1;
const SIGN_BIT: u32 = 1 << (DATA_BITS - 1);

/// Clock-pulse waveforms indexed by [`Gain::index`](crate::params::Gain::index).
///
/// Six `0xAA` bytes clock out the 24 data bits. The pulses in the trailing
/// byte select the gain of the next conversion:
/// `0xA0` = 26 pulses (B/32), `0xA8` = 27 pulses (A/64), `0x80` = 25 pulses (A/128).
pub static WAVEFORMS: [[u8; WAVEFORM_LEN]; 3] = [
    [0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xA0],
    [0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xA8],
    [0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0x80],
];

/// One inverted response byte split into its four sampled data bits.
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleWindow {
    // Fourth data bit of the window (bit 0).
    pub d0: bool,
    #[skip]
    __: B1,
    // Third data bit of the window (bit 2).
    pub d1: bool,
    #[skip]
    __: B1,
    // Second data bit of the window (bit 4).
    pub d2: bool,
    #[skip]
    __: B1,
    // First data bit of the window (bit 6).
    pub d3: bool,
    #[skip]
    __: B1,
}

impl SampleWindow {
    /// Builds a window from a byte as received on MISO.
    pub fn from_response(raw: u8) -> Self {
        Self::from(!raw)
    }

    /// Packs the four data bits MSB first.
    pub fn nibble(self) -> u8 {
        (u8::from(self.d3()) << 3)
            | (u8::from(self.d2()) << 2)
            | (u8::from(self.d1()) << 1)
            | u8::from(self.d0())
    }
}

impl From<u8> for SampleWindow {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<SampleWindow> for u8 {
    fn from(value: SampleWindow) -> Self {
        value.into_bytes()[0]
    }
}

/// Decodes a single received byte into its four data bits.
pub fn decode_nibble(raw: u8) -> u8 {
    SampleWindow::from_response(raw).nibble()
}

/// Reassembles the unsigned 24-bit conversion code from the data bytes of a
/// response. The gain-selection tail is not part of the input.
pub fn decode_response(response: &[u8; DATA_BYTES]) -> u32 {
    response
        .iter()
        .fold(0u32, |value, &raw| (value << 4) | u32::from(decode_nibble(raw)))
}

/// Interprets a 24-bit two's complement code as a signed value.
pub fn sign_extend(raw: u32) -> i32 {
    let raw = raw & DATA_MASK;
    if raw & SIGN_BIT != 0 {
        (raw | !DATA_MASK) as i32
    } else {
        raw as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Gain;

    #[test]
    fn waveforms_match_reference_bytes() {
        assert_eq!(
            Gain::B32.waveform(),
            &[0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xA0]
        );
        assert_eq!(
            Gain::A64.waveform(),
            &[0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xA8]
        );
        assert_eq!(
            Gain::A128.waveform(),
            &[0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA, 0x80]
        );
    }

    /// Every set bit is one clock pulse; the totals must select the right gain.
    #[test]
    fn waveform_pulse_counts_select_gain() {
        for gain in [Gain::B32, Gain::A64, Gain::A128] {
            let pulses: u32 = gain.waveform().iter().map(|b| b.count_ones()).sum();
            assert_eq!(pulses, u32::from(gain.clock_pulses()));

            let data_pulses: u32 = gain.waveform()[..DATA_BYTES]
                .iter()
                .map(|b| b.count_ones())
                .sum();
            assert_eq!(data_pulses, DATA_BITS);
        }
    }

    #[test]
    fn nibble_extraction_table() {
        let cases: [(u8, u8); 12] = [
            (0xFF, 0x0),
            (0x00, 0xF),
            (0x55, 0x0),
            (0xAA, 0xF),
            (0xBF, 0x8),
            (0xEF, 0x4),
            (0xFB, 0x2),
            (0xFE, 0x1),
            (0xAB, 0xE),
            (0xEA, 0x7),
            (0xBB, 0xA),
            (0x7F, 0x0),
        ];

        for (raw, nibble) in cases {
            assert_eq!(decode_nibble(raw), nibble, "raw byte {raw:#04x}");
        }
    }

    #[test]
    fn clock_phase_bits_are_ignored() {
        // Odd positions only differ; data positions stay inverted-zero.
        assert_eq!(decode_nibble(0b0101_0101), decode_nibble(0b1111_1111));
    }

    #[test]
    fn sample_window_layout() {
        let window = SampleWindow::from(0b0100_0001);
        assert!(window.d3());
        assert!(!window.d2());
        assert!(!window.d1());
        assert!(window.d0());
        assert_eq!(window.nibble(), 0b1001);
    }

    #[test]
    fn decode_packs_nibbles_msb_first() {
        let response = [0xFE, 0xFB, 0xFA, 0xEF, 0xEE, 0xEB];
        assert_eq!(decode_response(&response), 0x12_3456);
    }

    #[test]
    fn decode_uses_only_data_prefix_of_response() {
        let response: [u8; WAVEFORM_LEN] = [0xFE, 0xFB, 0xFA, 0xEF, 0xEE, 0xEB, 0x00];
        let data = response.first_chunk::<DATA_BYTES>().expect("response holds data bytes");
        assert_eq!(decode_response(data), 0x12_3456);
    }

    #[test]
    fn decode_repeated_pattern() {
        let response = [0b1010_1011; DATA_BYTES];
        assert_eq!(decode_response(&response), 0xEE_EEEE);
        assert_eq!(sign_extend(0xEE_EEEE), -1_118_482);
    }

    #[test]
    fn sign_extension_boundaries() {
        assert_eq!(sign_extend(0x00_0000), 0);
        assert_eq!(sign_extend(0x7F_FFFF), HX711_MAXIMUM);
        assert_eq!(sign_extend(0x80_0000), HX711_MINIMUM);
        assert_eq!(sign_extend(0xFF_FFFF), -1);
    }

    #[test]
    fn decode_extremes() {
        let max = [0xEA, 0xAA, 0xAA, 0xAA, 0xAA, 0xAA];
        assert_eq!(sign_extend(decode_response(&max)), 8_388_607);

        let min = [0xBF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];
        assert_eq!(sign_extend(decode_response(&min)), -8_388_608);
    }
}
