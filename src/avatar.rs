use image::{Rgb, RgbImage};
use log::debug;
use rand::Rng;

use crate::ascii::{self, AsciiStyle};
use crate::color::{HueSat, derive_hue_sat};
use crate::digest::Digest;
use crate::error::Result;
use crate::raster::{self, RasterStyle};
use crate::walk::{Atrium, WalkConfig, walk};

/// A randomart avatar: the digest, the walk it produced and its color.
///
/// The walk runs once at construction. Rendering never recomputes it.
#[derive(Clone, Debug)]
pub struct Bvatar {
    digest: Digest,
    config: WalkConfig,
    atrium: Atrium,
    hue_sat: HueSat,
}

impl Bvatar {
    pub fn new(digest: Digest, config: WalkConfig) -> Result<Self> {
        let atrium = walk(digest.as_bytes(), &config)?;
        let hue_sat = derive_hue_sat(&digest);
        debug!(
            "bvatar {}: {}x{} mirror={} king={}",
            digest,
            config.side(),
            config.side(),
            config.mirror,
            config.king
        );
        Ok(Bvatar {
            digest,
            config,
            atrium,
            hue_sat,
        })
    }

    /// Avatar for the SHA-1 of `source`.
    pub fn from_source(source: &[u8], config: WalkConfig) -> Result<Self> {
        Self::new(Digest::of(source), config)
    }

    /// Avatar for a hex-encoded digest, used without re-hashing.
    pub fn from_hex(encoded: &str, config: WalkConfig) -> Result<Self> {
        Self::new(Digest::from_hex(encoded)?, config)
    }

    pub fn random<R: Rng>(rng: &mut R, config: WalkConfig) -> Result<Self> {
        Self::new(Digest::random(rng), config)
    }

    pub fn digest(&self) -> &Digest {
        &self.digest
    }

    pub fn config(&self) -> &WalkConfig {
        &self.config
    }

    pub fn atrium(&self) -> &Atrium {
        &self.atrium
    }

    pub fn hue_sat(&self) -> HueSat {
        self.hue_sat
    }

    /// The avatar's color at `lightness`, hue rotated by `hue_offset`.
    pub fn color(&self, lightness: f64, hue_offset: f64) -> Rgb<u8> {
        self.hue_sat.rgb(lightness, hue_offset)
    }

    pub fn ascii(&self, style: &AsciiStyle) -> String {
        ascii::render(&self.atrium, style)
    }

    pub fn image(&self, style: &RasterStyle) -> Result<RgbImage> {
        raster::render(&self.atrium, self.hue_sat, style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_hex_matches_source() {
        let config = WalkConfig::default();
        let from_text = Bvatar::from_source(b"hello world", config).unwrap();
        let hex = from_text.digest().to_hex();
        let from_hex = Bvatar::from_hex(&hex.to_uppercase(), config).unwrap();
        assert_eq!(from_text.atrium(), from_hex.atrium());
        assert_eq!(from_text.hue_sat(), from_hex.hue_sat());
    }

    #[test]
    fn test_bad_hex() {
        assert!(matches!(
            Bvatar::from_hex("not hex", WalkConfig::default()),
            Err(Error::InvalidDigestEncoding(_))
        ));
    }

    #[test]
    fn test_color_independent_of_shape_config() {
        let plain = Bvatar::from_source(b"x", WalkConfig::default()).unwrap();
        let mirrored = Bvatar::from_source(
            b"x",
            WalkConfig {
                bits: 4,
                mirror: true,
                king: false,
                ..WalkConfig::default()
            },
        )
        .unwrap();
        assert_eq!(plain.hue_sat(), mirrored.hue_sat());
        assert_eq!(plain.color(0.5, 0.0), mirrored.color(0.5, 0.0));
    }

    #[test]
    fn test_renders_repeatably() {
        let bvatar = Bvatar::from_source(b"again", WalkConfig::default()).unwrap();
        let style = AsciiStyle::default();
        assert_eq!(bvatar.ascii(&style), bvatar.ascii(&style));
        let raster_style = RasterStyle::default();
        assert_eq!(
            bvatar.image(&raster_style).unwrap(),
            bvatar.image(&raster_style).unwrap()
        );
    }
}
