use image::Rgba;

pub mod batch;
pub mod error;
pub mod png;
pub mod scan;
pub mod startup_checks;
pub mod watermark;

pub use batch::{BatchSummary, process_image, run};
pub use error::WatermarkError;
pub use startup_checks::StartupCheckError;

/// Directory, relative to the working directory, that receives watermarked images.
pub const OUTPUT_DIR: &str = "Ex5_3_pictures";

/// Text burned into every output image.
pub const WATERMARK_TEXT: &str = "Matan Nahmany 206435737 && Osher Arbili 207372152";

/// Bundled bold face used for the watermark, so rendering never depends on host fonts.
pub static WATERMARK_FONT: &[u8] = include_bytes!("../static/DejaVuSans-Bold.ttf");

/// Appearance of the watermark. Every field is fixed; `Default` is the only
/// constructor the binary uses.
#[derive(Debug, Clone)]
pub struct WatermarkConfig {
    pub text: String,
    /// Font size in points, rendered at one pixel per point.
    pub font_size: f32,
    pub text_color: Rgba<u8>,
    pub backing_color: Rgba<u8>,
    /// Applied to the alpha of every draw operation.
    pub opacity: f32,
    /// Distance between the top of the image and the top of the text line.
    pub top_margin: i32,
    /// Horizontal padding of the backing rectangle on each side of the text.
    pub padding: i32,
    /// Height the backing rectangle extends past the text line.
    pub box_extra_height: i32,
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            text: WATERMARK_TEXT.to_string(),
            font_size: 20.0,
            text_color: Rgba([255, 0, 0, 255]),
            backing_color: Rgba([255, 255, 255, 150]),
            opacity: 0.8,
            top_margin: 10,
            padding: 10,
            box_extra_height: 5,
        }
    }
}
