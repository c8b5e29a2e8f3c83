//! The booklet layout engine.
//!
//! Takes a story's paragraphs in order and draws them two per sheet onto a
//! [`Surface`]. The engine is a single synchronous pass: sheets are filled in
//! sequence and a new page is only started when another sheet has content, so
//! the booklet never ends with a blank page.
//!
//! Missing or unreadable photos never stop a run. They are logged, collected in
//! the [`LayoutReport`], and the affected paragraph is printed as text only.

mod segment;
mod sheets;
mod wrap;

use segment::layout_segment;
use sheets::{calculate_sheets, slot_rect};

#[cfg(test)]
use sheets::Side;

use crate::sinks::{BookletConfig, Surface};
use crate::story::Segment;
use std::path::{Path, PathBuf};

/// A photo that was left out of the booklet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedImage {
    /// Index of the paragraph the photo belonged to
    pub segment: usize,
    pub path: PathBuf,
    pub reason: String,
}

/// What a layout pass produced.
#[derive(Debug, Clone, Default)]
pub struct LayoutReport {
    /// Physical sheets with content
    pub sheets: usize,
    /// Paragraphs placed
    pub segments: usize,
    pub skipped_images: Vec<SkippedImage>,
}

/// Lay out every paragraph onto `surface`, two per sheet.
///
/// Image file names are resolved against `image_dir`.
pub fn layout<S: Surface + ?Sized>(
    surface: &mut S,
    segments: &[Segment],
    image_dir: &Path,
    config: &BookletConfig,
) -> LayoutReport {
    let sheets = calculate_sheets(segments.len());
    let mut report = LayoutReport {
        sheets: sheets.len(),
        segments: segments.len(),
        skipped_images: Vec::new(),
    };

    for (sheet_idx, sheet) in sheets.iter().enumerate() {
        for (side, index) in sheet.slots() {
            let Some(index) = index else {
                continue;
            };
            let slot = slot_rect(config, side);
            if let Some(skipped) =
                layout_segment(surface, slot, index, &segments[index], image_dir, config)
            {
                report.skipped_images.push(skipped);
            }
        }

        if sheet_idx + 1 < sheets.len() {
            surface.new_page();
        }
    }

    log::info!(
        "Laid out {} paragraph(s) on {} sheet(s)",
        report.segments,
        report.sheets
    );
    report
}
