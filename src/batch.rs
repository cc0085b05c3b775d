use ab_glyph::Font;
use image::{DynamicImage, ImageReader};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::startup_checks::{self, StartupCheckError};
use crate::watermark::{add_watermark, load_font};
use crate::{WatermarkConfig, WatermarkError, png, scan};

/// Outcome of a batch run. Per-image failures are counted, never fatal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.processed + self.failed
    }
}

/// Watermark every image directly inside `input_dir`, writing PNGs into `output_dir`.
///
/// Fails only when the input directory is unusable or the output directory
/// cannot be created; nothing is written in that case.
pub fn run(input_dir: &Path, output_dir: &Path) -> Result<BatchSummary, StartupCheckError> {
    startup_checks::validate_input_directory(input_dir)?;
    startup_checks::ensure_output_directory(output_dir)?;

    let images = scan::list_images(input_dir)?;
    if images.is_empty() {
        println!("No images found in the directory.");
        return Ok(BatchSummary::default());
    }

    let config = WatermarkConfig::default();
    let font = match load_font() {
        Ok(font) => Some(font),
        Err(e) => {
            warn!("Watermark font unavailable: {}", e);
            None
        }
    };

    let mut summary = BatchSummary::default();
    for image_path in &images {
        let Some(file_name) = image_path.file_name() else {
            continue;
        };
        let output_path = output_dir.join(file_name);

        let result = match &font {
            Some(font) => process_image(image_path, &output_path, &config, font),
            None => Err(WatermarkError::InvalidFont),
        };

        let name = file_name.to_string_lossy();
        match result {
            Ok(()) => {
                println!("Processed: {}", name);
                summary.processed += 1;
            }
            Err(e) => {
                eprintln!("Error processing image {}: {}", name, e);
                summary.failed += 1;
            }
        }
    }

    info!(
        "Batch finished: {} processed, {} failed",
        summary.processed, summary.failed
    );
    println!(
        "✅ Watermark added to all images. Processed files are in: {}",
        output_dir.display()
    );

    Ok(summary)
}

/// Decode `input`, burn in the watermark and write the result to `output` as PNG.
pub fn process_image(
    input: &Path,
    output: &Path,
    config: &WatermarkConfig,
    font: &impl Font,
) -> Result<(), WatermarkError> {
    let image = ImageReader::open(input)?.with_guessed_format()?.decode()?;
    let has_alpha = image.color().has_alpha();
    debug!(
        "Decoded {:?}: {}x{} ({:?})",
        input,
        image.width(),
        image.height(),
        image.color()
    );

    let watermarked = DynamicImage::ImageRgba8(add_watermark(image.to_rgba8(), config, font));

    // Sources without alpha stay opaque RGB
    let encoded = if has_alpha {
        watermarked
    } else {
        DynamicImage::ImageRgb8(watermarked.to_rgb8())
    };

    png::save(&encoded, output)?;
    debug!("Wrote {:?}", output);
    Ok(())
}
