//! Contact sheets: a grid of avatars for short labels such as `a1` .. `f6`,
//! handy for eyeballing how distinct neighbouring inputs look.

use image::{ImageBuffer, Rgb, RgbImage, imageops};
use log::debug;

use crate::avatar::Bvatar;
use crate::error::{Error, Result};
use crate::raster::RasterStyle;
use crate::walk::WalkConfig;

pub const DEFAULT_COLUMNS: &str = "abcdef";
pub const DEFAULT_ROWS: &str = "123456";
pub const DEFAULT_MULTIPLIER: u32 = 8;

const BACKGROUND: Rgb<u8> = Rgb([0x33, 0x33, 0x33]);

#[derive(Clone, Debug)]
pub struct ContactSheet {
    /// One column per character.
    pub columns: String,
    /// One row per character.
    pub rows: String,
    /// Pixels per avatar cell.
    pub multiplier: u32,
}

impl Default for ContactSheet {
    fn default() -> Self {
        ContactSheet {
            columns: DEFAULT_COLUMNS.to_string(),
            rows: DEFAULT_ROWS.to_string(),
            multiplier: DEFAULT_MULTIPLIER,
        }
    }
}

impl ContactSheet {
    /// Labels in paste order: column-major, `a1, a2, .., b1, ..`.
    pub fn labels(&self) -> Vec<String> {
        self.columns
            .chars()
            .flat_map(|c| self.rows.chars().map(move |r| format!("{c}{r}")))
            .collect()
    }

    /// Gap around and between tiles.
    pub fn border(&self) -> u32 {
        self.multiplier * 3 / 2
    }

    pub fn render(&self, config: &WalkConfig, style: &RasterStyle) -> Result<RgbImage> {
        if self.multiplier == 0 {
            return Err(Error::InvalidPixelScale);
        }
        let style = RasterStyle {
            pixel_scale: self.multiplier,
            ..*style
        };
        let border = self.border();
        let tile = config.side() as u32 * self.multiplier;
        let offset = border + tile;
        let width = offset * self.columns.chars().count() as u32 + border;
        let height = offset * self.rows.chars().count() as u32 + border;

        let mut sheet: RgbImage = ImageBuffer::from_pixel(width, height, BACKGROUND);
        for (x, column) in self.columns.chars().enumerate() {
            for (y, row) in self.rows.chars().enumerate() {
                let label = format!("{column}{row}");
                let avatar = Bvatar::from_source(label.as_bytes(), *config)?.image(&style)?;
                imageops::replace(
                    &mut sheet,
                    &avatar,
                    i64::from(x as u32 * offset + border),
                    i64::from(y as u32 * offset + border),
                );
            }
        }

        debug!(
            "rendered {}x{} contact sheet ({}x{} px)",
            self.columns.chars().count(),
            self.rows.chars().count(),
            width,
            height
        );
        Ok(sheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_order() {
        let sheet = ContactSheet {
            columns: "ab".into(),
            rows: "12".into(),
            multiplier: 2,
        };
        assert_eq!(sheet.labels(), vec!["a1", "a2", "b1", "b2"]);
    }

    #[test]
    fn test_default_geometry() {
        let sheet = ContactSheet::default();
        let img = sheet
            .render(&WalkConfig::default(), &RasterStyle::default())
            .unwrap();
        // border 12, tile 64, offset 76: 76 * 6 + 12.
        assert_eq!(img.dimensions(), (468, 468));
        assert_eq!(*img.get_pixel(0, 0), BACKGROUND);
        assert_eq!(*img.get_pixel(467, 467), BACKGROUND);
        assert_eq!(*img.get_pixel(80, 5), BACKGROUND);
    }

    #[test]
    fn test_tiles_match_single_avatars() {
        let sheet = ContactSheet {
            columns: "ab".into(),
            rows: "1".into(),
            multiplier: 2,
        };
        let config = WalkConfig::default();
        let style = RasterStyle::default();
        let img = sheet.render(&config, &style).unwrap();
        let b1 = Bvatar::from_source(b"b1", config)
            .unwrap()
            .image(&RasterStyle { pixel_scale: 2, ..style })
            .unwrap();
        // border 3, tile 16, offset 19: b1 starts at (22, 3).
        for y in 0..16 {
            for x in 0..16 {
                assert_eq!(img.get_pixel(22 + x, 3 + y), b1.get_pixel(x, y));
            }
        }
    }
}
