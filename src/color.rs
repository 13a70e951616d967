//! Color derivation: hue and saturation come from a rehash of the digest, so
//! an avatar's color and its shape vary independently.

use image::Rgb;
use log::debug;

use crate::bits::BitCursor;
use crate::digest::Digest;

const HUE_BITS: u32 = 8;
const SAT_BITS: u32 = 4;
const SAT_SPAN: f64 = 0.8;
const SAT_FLOOR: f64 = 0.2;

const ONE_THIRD: f64 = 1.0 / 3.0;
const ONE_SIXTH: f64 = 1.0 / 6.0;
const TWO_THIRDS: f64 = 2.0 / 3.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HueSat {
    pub hue: f64,
    pub saturation: f64,
}

impl HueSat {
    /// The color at `lightness`, hue rotated by `hue_offset` turns.
    pub fn rgb(&self, lightness: f64, hue_offset: f64) -> Rgb<u8> {
        to_rgb8(hls_to_rgb(self.hue + hue_offset, lightness, self.saturation))
    }
}

fn max_value(bits: u32) -> f64 {
    ((1u64 << bits) - 1) as f64
}

pub fn derive_hue_sat(digest: &Digest) -> HueSat {
    let rehashed = digest.rehash();
    // A SHA-1 rehash always has the 12 bits needed here.
    let mut bits = BitCursor::cyclic(rehashed.as_bytes());
    let hue_raw = bits.take_bits(HUE_BITS).unwrap_or_default();
    let sat_raw = bits.take_bits(SAT_BITS).unwrap_or_default();

    let hue_sat = HueSat {
        hue: hue_raw as f64 / max_value(HUE_BITS),
        saturation: sat_raw as f64 / max_value(SAT_BITS) * SAT_SPAN + SAT_FLOOR,
    };
    debug!("derived color from {}: {:?}", rehashed, hue_sat);
    hue_sat
}

/// HLS to RGB, all components in `[0, 1]`. Hue wraps.
pub fn hls_to_rgb(hue: f64, lightness: f64, saturation: f64) -> (f64, f64, f64) {
    if saturation == 0.0 {
        return (lightness, lightness, lightness);
    }
    let m2 = if lightness <= 0.5 {
        lightness * (1.0 + saturation)
    } else {
        lightness + saturation - lightness * saturation
    };
    let m1 = 2.0 * lightness - m2;
    (
        channel(m1, m2, hue + ONE_THIRD),
        channel(m1, m2, hue),
        channel(m1, m2, hue - ONE_THIRD),
    )
}

fn channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < ONE_SIXTH {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < TWO_THIRDS {
        m1 + (m2 - m1) * (TWO_THIRDS - hue) * 6.0
    } else {
        m1
    }
}

/// Scale to 8-bit channels, truncating.
pub fn to_rgb8((r, g, b): (f64, f64, f64)) -> Rgb<u8> {
    Rgb([(255.0 * r) as u8, (255.0 * g) as u8, (255.0 * b) as u8])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: (f64, f64, f64), b: (f64, f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9 && (a.2 - b.2).abs() < 1e-9
    }

    #[test]
    fn test_hls_primaries() {
        assert!(close(hls_to_rgb(0.0, 0.5, 1.0), (1.0, 0.0, 0.0)));
        assert!(close(hls_to_rgb(ONE_THIRD, 0.5, 1.0), (0.0, 1.0, 0.0)));
        assert!(close(hls_to_rgb(TWO_THIRDS, 0.5, 1.0), (0.0, 0.0, 1.0)));
        assert!(close(hls_to_rgb(1.0, 0.5, 1.0), (1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_hls_grey_and_extremes() {
        assert!(close(hls_to_rgb(0.3, 0.25, 0.0), (0.25, 0.25, 0.25)));
        assert!(close(hls_to_rgb(0.7, 1.0, 0.6), (1.0, 1.0, 1.0)));
        assert!(close(hls_to_rgb(0.7, 0.0, 0.6), (0.0, 0.0, 0.0)));
    }

    #[test]
    fn test_to_rgb8_truncates() {
        assert_eq!(to_rgb8((1.0, 0.5, 0.0)), Rgb([255, 127, 0]));
    }

    #[test]
    fn test_hue_sat_in_range_and_stable() {
        for text in ["a1", "b2", "c3", "d4", "e5", "f6"] {
            let digest = Digest::of(text.as_bytes());
            let hs = derive_hue_sat(&digest);
            assert!((0.0..=1.0).contains(&hs.hue));
            assert!((SAT_FLOOR..=1.0).contains(&hs.saturation));
            assert_eq!(hs, derive_hue_sat(&digest));
        }
    }

    #[test]
    fn test_hue_from_rehash() {
        let digest = Digest::of(b"color");
        let rehashed = digest.rehash();
        let first = rehashed.as_bytes()[0];
        let second = rehashed.as_bytes()[1];
        let hs = derive_hue_sat(&digest);
        assert_eq!(hs.hue, f64::from(first) / 255.0);
        assert_eq!(hs.saturation, f64::from(second >> 4) / 15.0 * 0.8 + 0.2);
    }

    #[test]
    fn test_hue_varies_between_digests() {
        let hues: std::collections::HashSet<u64> = (0..32)
            .map(|i| derive_hue_sat(&Digest::of(format!("input {i}").as_bytes())).hue.to_bits())
            .collect();
        assert!(hues.len() > 1);
    }
}
