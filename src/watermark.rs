use ab_glyph::{Font, FontRef, GlyphId, PxScale, ScaleFont, point};
use image::{Pixel, Rgba, RgbaImage};
use imageproc::drawing::{Blend, draw_filled_rect_mut};
use imageproc::rect::Rect;

use crate::{WATERMARK_FONT, WatermarkConfig, WatermarkError};

/// Parse the bundled watermark font.
pub fn load_font() -> Result<FontRef<'static>, WatermarkError> {
    FontRef::try_from_slice(WATERMARK_FONT).map_err(|_| WatermarkError::InvalidFont)
}

/// Pixel scale for a point size at one pixel per point, so the em box is
/// `font_size` pixels tall.
pub fn font_scale(font: &impl Font, font_size: f32) -> PxScale {
    match font.units_per_em() {
        Some(units_per_em) => PxScale::from(font_size * font.height_unscaled() / units_per_em),
        None => PxScale::from(font_size),
    }
}

/// Measured size of the watermark text under a given font and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Sum of glyph advances, including kerning.
    pub width: i32,
    /// Full line height: ascent, descent and line gap.
    pub height: i32,
    pub ascent: f32,
}

/// Caret position of every character, left to right, with kerning applied.
/// Returns the glyphs and the total advance.
fn layout_line(font: &impl Font, scale: PxScale, text: &str) -> (Vec<(GlyphId, f32)>, f32) {
    let scaled = font.as_scaled(scale);
    let mut caret = 0.0f32;
    let mut last: Option<GlyphId> = None;
    let mut glyphs = Vec::with_capacity(text.len());

    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = last {
            caret += scaled.kern(prev, id);
        }
        glyphs.push((id, caret));
        caret += scaled.h_advance(id);
        last = Some(id);
    }

    (glyphs, caret)
}

pub fn measure_text(font: &impl Font, scale: PxScale, text: &str) -> TextMetrics {
    let (_, advance) = layout_line(font, scale, text);
    let scaled = font.as_scaled(scale);
    let line_height = (scaled.height() + scaled.line_gap()).ceil();

    TextMetrics {
        width: advance.round() as i32,
        height: line_height as i32,
        ascent: scaled.ascent(),
    }
}

/// Where the text and its backing rectangle land on an image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatermarkLayout {
    /// Left edge of the text, may be negative on images narrower than the text.
    pub text_x: i32,
    pub baseline_y: i32,
    pub backing: Rect,
}

impl WatermarkLayout {
    /// Top of the text line box, as `draw_text_blended` expects it.
    pub fn text_top(&self, metrics: &TextMetrics) -> i32 {
        self.baseline_y - metrics.ascent.round() as i32
    }
}

/// Center the text horizontally and hang it from the top margin, with the
/// backing rectangle padded around it.
pub fn compute_layout(
    image_width: u32,
    metrics: &TextMetrics,
    config: &WatermarkConfig,
) -> WatermarkLayout {
    let text_x = (image_width as i32 - metrics.width) / 2;
    let baseline_y = metrics.height + config.top_margin;

    let box_width = (metrics.width + 2 * config.padding).max(1) as u32;
    let box_height = (metrics.height + config.box_extra_height).max(1) as u32;
    let backing = Rect::at(text_x - config.padding, baseline_y - metrics.height)
        .of_size(box_width, box_height);

    WatermarkLayout {
        text_x,
        baseline_y,
        backing,
    }
}

/// Scale a color's alpha by the layer opacity.
pub fn with_opacity(color: Rgba<u8>, opacity: f32) -> Rgba<u8> {
    let alpha = (color[3] as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
    Rgba([color[0], color[1], color[2], alpha])
}

/// Draw `text` with its line box top-left at `(x, top)`. Each pixel is
/// source-over blended once, with the glyph coverage folded into the color's
/// alpha, so anti-aliased edges never pick up extra background.
pub fn draw_text_blended(
    image: &mut RgbaImage,
    color: Rgba<u8>,
    x: i32,
    top: i32,
    scale: PxScale,
    font: &impl Font,
    text: &str,
) {
    let (glyphs, _) = layout_line(font, scale, text);
    let ascent = font.as_scaled(scale).ascent();
    let (width, height) = (image.width() as i32, image.height() as i32);

    for (id, caret) in glyphs {
        let glyph = id.with_scale_and_position(scale, point(caret, ascent));
        let Some(outlined) = font.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outlined.px_bounds();

        outlined.draw(|gx, gy, coverage| {
            let px = x + bounds.min.x as i32 + gx as i32;
            let py = top + bounds.min.y as i32 + gy as i32;
            if !(0..width).contains(&px) || !(0..height).contains(&py) {
                return;
            }

            let alpha = (color[3] as f32 * coverage.clamp(0.0, 1.0)).round() as u8;
            let source = Rgba([color[0], color[1], color[2], alpha]);
            image.get_pixel_mut(px as u32, py as u32).blend(&source);
        });
    }
}

/// Draw the backing rectangle and the text onto `image`, alpha-blending both.
pub fn add_watermark(
    image: RgbaImage,
    config: &WatermarkConfig,
    font: &impl Font,
) -> RgbaImage {
    let scale = font_scale(font, config.font_size);
    let metrics = measure_text(font, scale, &config.text);
    let layout = compute_layout(image.width(), &metrics, config);

    let mut canvas = Blend(image);

    draw_filled_rect_mut(
        &mut canvas,
        layout.backing,
        with_opacity(config.backing_color, config.opacity),
    );

    let mut image = canvas.0;
    draw_text_blended(
        &mut image,
        with_opacity(config.text_color, config.opacity),
        layout.text_x,
        layout.text_top(&metrics),
        scale,
        font,
        &config.text,
    );

    image
}
