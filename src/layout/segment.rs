//! Laying out a single story paragraph inside its half page.
//!
//! A paragraph is an optional photo above a block of centred text. The photo is
//! scaled to the text width, then clamped to a maximum height; the whole block
//! is centred vertically in the half page.

use super::wrap::{estimate_line_break_width, measure_exact_rendered_width, wrap_text};
use super::SkippedImage;
use crate::sinks::{BookletConfig, LoadedImage, Surface};
use crate::story::Segment;
use crate::units::{Pt, Rect};
use std::path::Path;

/// Scale an image with the given `aspect` (height over width) for display.
///
/// The image takes the full `max_width` unless that would make it taller than
/// `max_height`, in which case it is shrunk to exactly `max_height` keeping
/// its aspect ratio. This is the only scaling rule; images are never distorted.
pub fn fit_image(aspect: f32, max_width: Pt, max_height: Pt) -> (Pt, Pt) {
    let width = max_width;
    let height = width * aspect;
    if height > max_height {
        (max_height / aspect, max_height)
    } else {
        (width, height)
    }
}

/// Draw `segment` centred in `slot`.
///
/// A photo that cannot be loaded is logged and reported back; the paragraph is
/// then laid out as if it had no photo.
pub fn layout_segment<S: Surface + ?Sized>(
    surface: &mut S,
    slot: Rect,
    index: usize,
    segment: &Segment,
    image_dir: &Path,
    config: &BookletConfig,
) -> Option<SkippedImage> {
    let font_size = config.font_size();
    let line_height = config.line_height();
    let spacing = config.image_text_spacing();

    let mut skipped = None;
    let image = segment.image.as_ref().and_then(|name| {
        let path = image_dir.join(name);
        match LoadedImage::load(&path) {
            Ok(image) => Some(image),
            Err(e) => {
                log::warn!("Error loading image {}: {e}", path.display());
                skipped = Some(SkippedImage {
                    segment: index,
                    path,
                    reason: e.to_string(),
                });
                None
            }
        }
    });

    let max_image_width = config
        .image_max_width()
        .min(slot.width() - config.margin() * 2.0);
    let image = image.map(|image| {
        let size = fit_image(
            image.aspect_ratio(),
            max_image_width,
            config.image_max_height(),
        );
        (image, size)
    });

    let max_chars = estimate_line_break_width(
        config.content_width(),
        font_size,
        config.average_char_width_factor,
    );
    let lines = wrap_text(&segment.text, max_chars);

    let mut content_height = line_height * lines.len() as f32;
    if let Some((_, (_, image_height))) = &image {
        content_height += *image_height + spacing;
    }

    // top of the content block
    let mut y = slot.y1 + (slot.height() + content_height) / 2.0;

    if let Some((image, (width, height))) = image {
        let x = slot.x1 + (slot.width() - width) / 2.0;
        surface.draw_image(
            image,
            Rect {
                x1: x,
                y1: y - height,
                x2: x + width,
                y2: y,
            },
        );
        y -= height + spacing;
    }

    for line in lines.iter() {
        let width = measure_exact_rendered_width(&*surface, line, font_size);
        let x = slot.x1 + (slot.width() - width) / 2.0;
        surface.draw_text(line, x, y - font_size, font_size);
        y -= line_height;
    }

    skipped
}
