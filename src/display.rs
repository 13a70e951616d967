use image::RgbImage;
use log::info;
use minifb::{Key, Window, WindowOptions};

use crate::error::{Error, Result};

/// Pack RGB pixels into the `0RGB` words minifb draws.
pub fn pack_buffer(img: &RgbImage) -> Vec<u32> {
    img.pixels()
        .map(|p| (u32::from(p[0]) << 16) | (u32::from(p[1]) << 8) | u32::from(p[2]))
        .collect()
}

/// Show `img` in a window until it is closed or Escape is pressed.
pub fn show(img: &RgbImage, title: &str) -> Result<()> {
    let (width, height) = (img.width() as usize, img.height() as usize);
    let buffer = pack_buffer(img);

    let mut window = Window::new(title, width, height, WindowOptions::default())
        .map_err(|e| Error::Display(e.to_string()))?;
    window.set_target_fps(30);
    info!("showing {width}x{height} window, press Escape to close");

    while window.is_open() && !window.is_key_down(Key::Escape) {
        window
            .update_with_buffer(&buffer, width, height)
            .map_err(|e| Error::Display(e.to_string()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_pack_buffer() {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([0x12, 0x34, 0x56]));
        img.put_pixel(1, 0, Rgb([0xFF, 0x00, 0x01]));
        assert_eq!(pack_buffer(&img), vec![0x123456, 0xFF0001]);
    }
}
