//! Loading generated stories from the story store.
//!
//! A story file is a JSON document written by the kiosk after the language
//! model call. Its `story` object maps paragraph keys (`absatz1`, `absatz2`, ...)
//! to `{ "text": ..., "image": ... }` records. Only keys with the configured
//! prefix are paragraphs; anything else in the object (titles, moral of the
//! story, ...) is ignored.
//!
//! Paragraph order is the lexicographic order of the keys. Note that this puts
//! `absatz10` before `absatz2`, exactly as the stories have always been printed.
//!
//! Records are validated here so the layout engine only ever sees well-formed
//! [`Segment`]s.

mod segment;
pub use segment::*;

use crate::error::StoryError;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A story loaded from disk, reduced to its ordered paragraphs.
#[derive(Debug, Clone)]
pub struct Story {
    /// Where the story was loaded from
    pub path: PathBuf,

    /// The paragraphs in print order
    pub segments: Vec<Segment>,
}

impl Story {
    /// Read and validate a story file.
    pub fn load<P: AsRef<Path>>(path: P, segment_prefix: &str) -> Result<Story, StoryError> {
        let path = path.as_ref().to_path_buf();
        let contents = std::fs::read_to_string(&path).map_err(|source| StoryError::Read {
            path: path.clone(),
            source,
        })?;
        Story::parse(path, &contents, segment_prefix)
    }

    /// Validate story JSON that has already been read into memory.
    pub fn parse(path: PathBuf, contents: &str, segment_prefix: &str) -> Result<Story, StoryError> {
        let mut document: Map<String, Value> =
            serde_json::from_str(contents).map_err(|source| StoryError::Json {
                path: path.clone(),
                source,
            })?;

        let story = match document.remove("story") {
            Some(Value::Object(story)) => story,
            _ => return Err(StoryError::MissingStory { path }),
        };

        // BTreeMap gives us the lexicographic key order directly
        let paragraphs: BTreeMap<String, Value> = story
            .into_iter()
            .filter(|(key, _)| key.starts_with(segment_prefix))
            .collect();

        let segments = paragraphs
            .into_iter()
            .map(|(key, value)| {
                serde_json::from_value::<SegmentRecord>(value)
                    .map(Segment::from)
                    .map_err(|source| StoryError::Segment {
                        path: path.clone(),
                        key,
                        source,
                    })
            })
            .collect::<Result<Vec<Segment>, StoryError>>()?;

        log::debug!(
            "Loaded {} segment(s) from {}",
            segments.len(),
            path.display()
        );
        Ok(Story { path, segments })
    }

    /// The directory the story's photos live in.
    ///
    /// Stories are named after the account that created them
    /// (`star_generated_story_20250716_080332.json`), and each account keeps
    /// its photos in `<image_root>/<account>`.
    pub fn image_dir<P: AsRef<Path>>(&self, image_root: P) -> PathBuf {
        image_dir_for(&self.path, image_root)
    }

    /// A human readable title for document metadata.
    pub fn title(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| "story".to_string())
    }
}

/// Derive the image directory for a story file from the account prefix of its name.
pub fn image_dir_for<P: AsRef<Path>, R: AsRef<Path>>(story_path: P, image_root: R) -> PathBuf {
    let file_name = story_path
        .as_ref()
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    let account = file_name.split('_').next().unwrap_or_default();
    image_root.as_ref().join(account)
}
