//! Raster rendering: visit weights become lightness, the digest's hue and
//! saturation supply the color.

use std::io::Cursor;

use image::{ImageBuffer, ImageFormat, Rgb, RgbImage};
use log::trace;
use serde::{Deserialize, Serialize};

use crate::color::{HueSat, hls_to_rgb, to_rgb8};
use crate::error::{Error, Result};
use crate::walk::Atrium;

pub const MIN_LIGHTNESS: f64 = 0.1;
pub const COLOR_MAX_LIGHTNESS: f64 = 0.75;
pub const GREY_MAX_LIGHTNESS: f64 = 1.0;
pub const DEFAULT_SATURATION: f64 = 0.75;
pub const DEFAULT_PIXEL_SCALE: u32 = 16;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterStyle {
    /// Multiplier on the derived saturation. Zero renders greyscale.
    pub saturation: f64,
    /// Paint unvisited cells with the avatar's lightest color instead of white.
    pub fill: bool,
    /// Output pixels per cell along each side.
    pub pixel_scale: u32,
    /// Busier cells get lighter instead of darker.
    pub invert: bool,
}

impl Default for RasterStyle {
    fn default() -> Self {
        RasterStyle {
            saturation: DEFAULT_SATURATION,
            fill: false,
            pixel_scale: DEFAULT_PIXEL_SCALE,
            invert: false,
        }
    }
}

impl RasterStyle {
    pub fn validate(&self) -> Result<()> {
        if self.pixel_scale == 0 {
            return Err(Error::InvalidPixelScale);
        }
        if !self.saturation.is_finite() || self.saturation < 0.0 {
            return Err(Error::Config(format!(
                "saturation must be a non-negative number, got {}",
                self.saturation
            )));
        }
        Ok(())
    }
}

/// Render `atrium` as an RGB image of `side * pixel_scale` pixels square.
pub fn render(atrium: &Atrium, hue_sat: HueSat, style: &RasterStyle) -> Result<RgbImage> {
    style.validate()?;

    let (hue, saturation, max_lightness) = if style.saturation > 0.0 {
        (hue_sat.hue, hue_sat.saturation * style.saturation, COLOR_MAX_LIGHTNESS)
    } else {
        (1.0, 0.0, GREY_MAX_LIGHTNESS)
    };
    let background = if style.fill {
        hue_sat.rgb(max_lightness, 0.0)
    } else {
        WHITE
    };

    let side = atrium.side() as u32;
    let mut img: RgbImage = ImageBuffer::from_pixel(side, side, background);
    let span = max_lightness - MIN_LIGHTNESS;

    for column in 0..atrium.columns() {
        for row in 0..atrium.rows() {
            if atrium.get(row, column) == 0 {
                continue;
            }
            let weight = atrium.weight(row, column);
            let shade = if style.invert { weight } else { 1.0 - weight };
            let lightness = MIN_LIGHTNESS + shade * span;
            let pixel = to_rgb8(hls_to_rgb(hue, lightness, saturation));

            let (x, y) = (column as u32, row as u32);
            img.put_pixel(x, y, pixel);
            if atrium.mirror() {
                img.put_pixel(side - 1 - x, y, pixel);
            }
        }
    }

    trace!(
        "rendered {side}x{side} raster avatar (hue={hue:.3} sat={saturation:.3} fill={})",
        style.fill
    );
    Ok(upscale(&img, style.pixel_scale))
}

/// Nearest-neighbour upscale: every pixel becomes a `scale x scale` block.
pub fn upscale(img: &RgbImage, scale: u32) -> RgbImage {
    if scale <= 1 {
        return img.clone();
    }
    let (width, height) = img.dimensions();
    ImageBuffer::from_fn(width * scale, height * scale, |x, y| {
        *img.get_pixel(x / scale, y / scale)
    })
}

pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}
