use anyhow::Context;
use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{ImageFormat, Rgb, RgbImage};
use std::path::{Path, PathBuf};

pub const SAMPLE_IMAGE_PATH: &str = "sample_text.png";
pub const WIDTH: u32 = 200;
pub const HEIGHT: u32 = 100;
pub const TEXT: &str = "Hello World";
pub const TEXT_ORIGIN: (u32, u32) = (10, 10);
pub const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
pub const FOREGROUND: Rgb<u8> = Rgb([0, 0, 0]);

const GLYPH_SIZE: u32 = 8;

/// Render the fixed sample canvas: white background, black "Hello World".
pub fn render_sample_image() -> RgbImage {
    let mut img = RgbImage::from_pixel(WIDTH, HEIGHT, BACKGROUND);
    draw_text(&mut img, TEXT_ORIGIN, TEXT, FOREGROUND);
    img
}

/// Draw `text` with its top-left corner at `origin` using the 8x8 bitmap font.
/// Pixels falling outside the canvas are clipped.
pub fn draw_text(img: &mut RgbImage, origin: (u32, u32), text: &str, color: Rgb<u8>) {
    let (mut pen_x, pen_y) = origin;

    for ch in text.chars() {
        // Unknown characters still advance the pen
        if let Some(glyph) = BASIC_FONTS.get(ch) {
            for (row, bits) in glyph.iter().enumerate() {
                for col in 0..GLYPH_SIZE {
                    if bits & (1 << col) == 0 {
                        continue;
                    }
                    let x = pen_x + col;
                    let y = pen_y + row as u32;
                    if x < img.width() && y < img.height() {
                        img.put_pixel(x, y, color);
                    }
                }
            }
        }
        pen_x += GLYPH_SIZE;
    }
}

/// Write the sample image as PNG to `path`, replacing any existing file.
pub fn generate_sample_image(path: &Path) -> anyhow::Result<PathBuf> {
    let img = render_sample_image();

    img.save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("Failed to write sample image to {}", path.display()))?;

    log::debug!("Wrote {}x{} sample image to {}", WIDTH, HEIGHT, path.display());

    Ok(path.to_path_buf())
}
