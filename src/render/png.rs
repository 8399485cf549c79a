use crate::font::Font;
use crate::label::{Composition, LabelStyle};
use crate::units::Pt;
use crate::LabelError;
use ab_glyph::{Font as _, ScaleFont};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect as PxRect;
use std::io::Cursor;
use tracing::debug;

/// Largest canvas the rasterizer will allocate, in pixels
pub const MAX_CANVAS_PIXELS: u64 = 100_000_000;

fn rgba(colour: &crate::Colour) -> Rgba<u8> {
    let [r, g, b] = colour.to_rgb8();
    Rgba([r, g, b, 255])
}

/// Draw a composition onto a new RGBA canvas at the style's resolution.
///
/// Module edges are rounded to whole pixels independently, so neighbouring modules
/// never leave hairline gaps. The caption needs `font`. A resolution that is not a
/// positive number, or that would need more than [`MAX_CANVAS_PIXELS`], fails with
/// [`LabelError::InvalidConfig`].
pub fn rasterize(
    composition: &Composition,
    style: &LabelStyle,
    font: Option<&Font>,
) -> Result<RgbaImage, LabelError> {
    if !(style.dpi.is_finite() && style.dpi > 0.0) {
        return Err(LabelError::InvalidConfig(format!(
            "dpi must be a positive number (got {})",
            style.dpi
        )));
    }

    let px = |length: Pt| length.to_px(style.dpi);
    let (sheet_w, sheet_h) = composition.sheet;
    let width = px(sheet_w).round().max(1.0) as f64;
    let height = px(sheet_h).round().max(1.0) as f64;
    if width * height > MAX_CANVAS_PIXELS as f64 {
        return Err(LabelError::InvalidConfig(format!(
            "a {width} x {height} pixel canvas at {} dpi is too large",
            style.dpi
        )));
    }
    let (width, height) = (width as u32, height as u32);

    let mut img = RgbaImage::from_pixel(width, height, rgba(&style.background));
    let foreground = rgba(&style.foreground);

    let plan = &composition.plan;
    let symbol = &composition.symbol;
    let (x0, y0) = (px(plan.code_offset_x), px(plan.code_offset_y));
    let module_w = px(plan.code_side) / symbol.columns.max(1) as f32;
    let module_h = px(plan.code_side) / symbol.rows.max(1) as f32;

    for (row, column, length) in symbol.dark_runs() {
        let left = (x0 + column as f32 * module_w).round() as i32;
        let right = (x0 + (column + length) as f32 * module_w).round() as i32;
        let top = (y0 + row as f32 * module_h).round() as i32;
        let bottom = (y0 + (row + 1) as f32 * module_h).round() as i32;
        if right > left && bottom > top {
            let rect = PxRect::at(left, top).of_size((right - left) as u32, (bottom - top) as u32);
            draw_filled_rect_mut(&mut img, rect, foreground);
        }
    }

    if let Some(caption) = &composition.caption {
        let font = font.ok_or(LabelError::MissingFont)?;
        let raster = font.raster();
        let scale = raster
            .pt_to_px_scale(px(caption.size))
            .ok_or(LabelError::MissingFont)?;
        // imageproc positions text by the top of the line, not the baseline
        let ascent = raster.as_scaled(scale).ascent();
        let x = px(caption.x).round() as i32;
        let y = (px(caption.baseline) - ascent).round() as i32;
        draw_text_mut(&mut img, foreground, x, y, scale, raster, &caption.text);
    }

    debug!(width, height, dpi = style.dpi, "rasterized label");
    Ok(img)
}

/// Render a composition as PNG bytes
pub fn render_png(
    composition: &Composition,
    style: &LabelStyle,
    font: Option<&Font>,
) -> Result<Vec<u8>, LabelError> {
    let img = rasterize(composition, style, font)?;
    let mut out = Vec::new();
    DynamicImage::ImageRgba8(img).write_to(&mut Cursor::new(&mut out), ImageFormat::Png)?;
    Ok(out)
}
