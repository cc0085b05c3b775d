use image::{DynamicImage, codecs::png::PngEncoder};
use std::io::BufWriter;
use std::path::Path;

use crate::WatermarkError;

/// Save image as PNG, replacing any existing file at `path`.
pub fn save(image: &DynamicImage, path: &Path) -> Result<(), WatermarkError> {
    let output = BufWriter::new(std::fs::File::create(path)?);
    let encoder = PngEncoder::new(output);
    image.write_with_encoder(encoder)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;

    #[test]
    fn test_save_writes_png_under_any_name() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("holiday.jpg");
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 3, Rgb([1, 2, 3])));

        save(&img, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[0..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!(
            image::guess_format(&bytes).unwrap(),
            image::ImageFormat::Png
        );
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.png");
        std::fs::write(&path, b"stale contents that are not a png").unwrap();

        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([9, 9, 9])));
        save(&img, &path).unwrap();

        let reloaded = image::open(&path).unwrap();
        assert_eq!(reloaded.width(), 2);
        assert_eq!(reloaded.height(), 2);
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("out.png");
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([9, 9, 9])));

        let err = save(&img, &path).unwrap_err();
        assert!(matches!(err, WatermarkError::IoError(_)));
    }
}
