//! Rendering every story in a batch folder.
//!
//! Stories are collected into batch folders for printing. Each story in the
//! folder is rendered as its own independent run, so one broken story does not
//! hold up the rest of the batch.

use crate::booklet::{default_outfile, render_story};
use crate::sinks::{BookletConfig, RenderStats};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

/// Outcome of rendering a batch folder.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub rendered: Vec<RenderStats>,
    /// Stories that failed, with the full error chain
    pub failed: Vec<(PathBuf, String)>,
}

/// All `*.json` files directly inside `dir`, sorted by name.
pub fn find_stories(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read batch directory {}", dir.display()))?;

    let mut stories = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        let path = entry.path();
        let is_json = path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json && path.is_file() {
            stories.push(path);
        }
    }
    stories.sort();
    Ok(stories)
}

/// Render every story in `dir`, writing booklets into `out_dir` (or next to
/// each story).
pub fn run(dir: &Path, out_dir: Option<&Path>, config: &BookletConfig) -> Result<BatchSummary> {
    let stories = find_stories(dir)?;
    if let Some(out_dir) = out_dir {
        std::fs::create_dir_all(out_dir)
            .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;
    }

    let progress = ProgressBar::new(stories.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("can parse progress style")
            .progress_chars("#>-"),
    );

    let mut summary = BatchSummary::default();
    for story in stories.iter() {
        let file_name = story
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| story.display().to_string());
        progress.set_message(file_name);

        let outfile = match out_dir {
            Some(out_dir) => out_dir.join(default_outfile(story).file_name().unwrap_or_default()),
            None => default_outfile(story),
        };

        match render_story(story, &outfile, None, config) {
            Ok(stats) => summary.rendered.push(stats),
            Err(e) => {
                log::error!("Failed to render {}: {e:#}", story.display());
                summary.failed.push((story.clone(), format!("{e:#}")));
            }
        }
        progress.inc(1);
    }
    progress.finish_with_message("Batch rendered");

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_only_json_files_in_order() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        for name in ["b_story.json", "a_story.json", "notes.txt", "c.JSON"] {
            std::fs::write(dir.path().join(name), "{}").expect("can write file");
        }
        std::fs::create_dir(dir.path().join("nested.json")).expect("can create dir");

        let stories = find_stories(dir.path()).expect("can list stories");
        let names: Vec<String> = stories
            .iter()
            .map(|p| p.file_name().unwrap_or_default().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a_story.json", "b_story.json", "c.JSON"]);
    }

    #[test]
    fn broken_story_does_not_stop_the_batch() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let out = dir.path().join("out");
        std::fs::write(
            dir.path().join("owl_story.json"),
            r#"{ "story": { "absatz1": { "text": "Eine Eule." } } }"#,
        )
        .expect("can write story");
        std::fs::write(dir.path().join("panda_story.json"), "not json").expect("can write story");

        let config = BookletConfig {
            image_root: dir.path().join("accounts"),
            ..BookletConfig::default()
        };
        let summary = run(dir.path(), Some(&out), &config).expect("batch runs");

        assert_eq!(summary.rendered.len(), 1);
        assert_eq!(summary.failed.len(), 1);
        assert!(summary.failed[0].0.ends_with("panda_story.json"));
        assert!(out.join("owl_story.pdf").is_file());
        assert!(!out.join("panda_story.pdf").exists());
    }

    #[test]
    fn missing_batch_directory_is_an_error() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        assert!(run(&dir.path().join("nope"), None, &BookletConfig::default()).is_err());
    }
}
