//! Rendering one story into a print-ready booklet.
//!
//! A run reads the story once, lays it out into an in-memory document and
//! writes the finished PDF in one go. Input and output failures abort the run
//! before anything is written; missing photos only cost the photo.

use crate::layout::{layout, LayoutReport};
use crate::sinks::{BookletConfig, PdfDocument, RenderStats};
use crate::story::{Segment, Story};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Lay out `segments` into a new booklet document.
pub fn build_booklet(
    segments: &[Segment],
    image_dir: &Path,
    config: &BookletConfig,
) -> (PdfDocument, LayoutReport) {
    let mut doc = PdfDocument::new(config.sheet_size());
    let report = layout(&mut doc, segments, image_dir, config);
    log::debug!("Booklet document has {} page(s)", doc.page_count());
    (doc, report)
}

/// Where a story's booklet goes when no output path is given.
pub fn default_outfile(story_path: &Path) -> PathBuf {
    story_path.with_extension("pdf")
}

/// Render the story at `story_path` to `outfile`.
///
/// Photos are looked up in `image_dir` if given, otherwise in the account
/// folder derived from the story's file name.
pub fn render_story(
    story_path: &Path,
    outfile: &Path,
    image_dir: Option<&Path>,
    config: &BookletConfig,
) -> Result<RenderStats> {
    let story = Story::load(story_path, &config.segment_prefix)
        .with_context(|| format!("Failed to load story {}", story_path.display()))?;

    let image_dir = match image_dir {
        Some(dir) => dir.to_path_buf(),
        None => story.image_dir(&config.image_root),
    };
    log::debug!(
        "Rendering {} with images from {}",
        story_path.display(),
        image_dir.display()
    );

    let (mut doc, report) = build_booklet(&story.segments, &image_dir, config);
    doc.set_title(story.title());
    doc.save(outfile)
        .with_context(|| format!("Failed to write booklet {}", outfile.display()))?;

    Ok(RenderStats {
        outfile: outfile.to_path_buf(),
        sheets: report.sheets,
        segments: report.segments,
        skipped_images: report
            .skipped_images
            .into_iter()
            .map(|skipped| (skipped.path, skipped.reason))
            .collect(),
    })
}
