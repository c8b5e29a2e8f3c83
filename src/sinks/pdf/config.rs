use crate::error::StoryError;
use crate::units::{pagesize, Cm, Pt};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file picked up from the working directory.
pub const CONFIG_FILE_NAME: &str = "booklet.toml";

/// Booklet layout configuration.
///
/// The physical format is fixed: two portrait A5 pages side by side on a
/// landscape A4 sheet. Everything that decides how a story paragraph sits
/// inside its half of the sheet is tunable here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookletConfig {
    /// Body text size in points
    #[serde(default = "default_font_size")]
    pub font_size_pt: f32,
    /// Distance between baselines, as a multiple of the font size
    #[serde(default = "default_line_height_factor")]
    pub line_height_factor: f32,
    /// Estimated glyph width, as a multiple of the font size, used when wrapping
    #[serde(default = "default_average_char_width_factor")]
    pub average_char_width_factor: f32,
    /// Left and right margin of each half page, in centimetres
    #[serde(default = "default_margin")]
    pub margin_cm: f32,
    /// Images are never taller than the half page height divided by this
    #[serde(default = "default_image_max_height_divisor")]
    pub image_max_height_divisor: f32,
    /// Gap between an image and the text below it, in centimetres
    #[serde(default = "default_image_text_spacing")]
    pub image_text_spacing_cm: f32,
    /// Only story keys starting with this become booklet pages
    #[serde(default = "default_segment_prefix")]
    pub segment_prefix: String,
    /// Directory holding one photo folder per account
    #[serde(default = "default_image_root")]
    pub image_root: PathBuf,
}

fn default_font_size() -> f32 {
    12.0
}
fn default_line_height_factor() -> f32 {
    1.2
}
fn default_average_char_width_factor() -> f32 {
    0.6
}
fn default_margin() -> f32 {
    1.0
}
fn default_image_max_height_divisor() -> f32 {
    2.5
}
fn default_image_text_spacing() -> f32 {
    1.2
}
fn default_segment_prefix() -> String {
    "absatz".to_string()
}
fn default_image_root() -> PathBuf {
    PathBuf::from("accounts")
}

impl Default for BookletConfig {
    fn default() -> Self {
        BookletConfig {
            font_size_pt: default_font_size(),
            line_height_factor: default_line_height_factor(),
            average_char_width_factor: default_average_char_width_factor(),
            margin_cm: default_margin(),
            image_max_height_divisor: default_image_max_height_divisor(),
            image_text_spacing_cm: default_image_text_spacing(),
            segment_prefix: default_segment_prefix(),
            image_root: default_image_root(),
        }
    }
}

impl BookletConfig {
    /// Parse a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<BookletConfig, StoryError> {
        let path = path.as_ref().to_path_buf();
        let contents = std::fs::read_to_string(&path).map_err(|source| StoryError::Read {
            path: path.clone(),
            source,
        })?;
        let config: BookletConfig =
            toml::from_str(&contents).map_err(|source| StoryError::Config {
                path: path.clone(),
                source,
            })?;
        config
            .validate()
            .map_err(|reason| StoryError::InvalidConfig { path, reason })?;
        Ok(config)
    }

    /// Check that the settings describe a drawable half page.
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("font_size_pt", self.font_size_pt),
            ("line_height_factor", self.line_height_factor),
            ("average_char_width_factor", self.average_char_width_factor),
            ("image_max_height_divisor", self.image_max_height_divisor),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("`{name}` must be greater than zero, got {value}"));
            }
        }

        let non_negative = [
            ("margin_cm", self.margin_cm),
            ("image_text_spacing_cm", self.image_text_spacing_cm),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(format!("`{name}` must not be negative, got {value}"));
            }
        }

        if self.content_width() <= Pt(0.0) {
            return Err(format!(
                "`margin_cm` of {} leaves no room for content on a half page",
                self.margin_cm
            ));
        }
        Ok(())
    }

    /// Resolve the configuration for a run: an explicit file must exist,
    /// otherwise `booklet.toml` in the working directory is used if present.
    pub fn discover(explicit: Option<&Path>) -> Result<BookletConfig, StoryError> {
        match explicit {
            Some(path) => BookletConfig::load(path),
            None => {
                let local = Path::new(CONFIG_FILE_NAME);
                if local.is_file() {
                    log::info!("Using configuration from {}", local.display());
                    BookletConfig::load(local)
                } else {
                    Ok(BookletConfig::default())
                }
            }
        }
    }

    pub fn font_size(&self) -> Pt {
        Pt(self.font_size_pt)
    }

    pub fn line_height(&self) -> Pt {
        Pt(self.font_size_pt * self.line_height_factor)
    }

    pub fn margin(&self) -> Pt {
        Cm(self.margin_cm).into()
    }

    pub fn image_text_spacing(&self) -> Pt {
        Cm(self.image_text_spacing_cm).into()
    }

    /// (width, height) of the physical sheet.
    pub fn sheet_size(&self) -> (Pt, Pt) {
        pagesize::landscape(pagesize::a4())
    }

    /// (width, height) of one half-page slot.
    pub fn slot_size(&self) -> (Pt, Pt) {
        pagesize::a5()
    }

    /// Width available to text and images inside a slot.
    pub fn content_width(&self) -> Pt {
        self.slot_size().0 - self.margin() * 2.0
    }

    pub fn image_max_width(&self) -> Pt {
        self.content_width()
    }

    pub fn image_max_height(&self) -> Pt {
        self.slot_size().1 / self.image_max_height_divisor
    }
}

/// Statistics from rendering a booklet, used for user feedback.
#[derive(Debug)]
pub struct RenderStats {
    /// Where the booklet was written
    pub outfile: PathBuf,
    /// Number of physical sheets in the booklet
    pub sheets: usize,
    /// Number of story paragraphs placed
    pub segments: usize,
    /// Images that could not be used, with the reason
    pub skipped_images: Vec<(PathBuf, String)>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn can_serialize_config() {
        let config = BookletConfig::default();
        let text = toml::to_string(&config).expect("can serialize config to TOML");
        let back: BookletConfig = toml::from_str(&text).expect("can parse serialized config");
        assert_eq!(back, config);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: BookletConfig =
            toml::from_str("font_size_pt = 14.0").expect("can parse partial config");
        assert_eq!(config.font_size_pt, 14.0);
        assert_eq!(config.segment_prefix, "absatz");
        assert_eq!(config.margin_cm, 1.0);
    }

    #[test]
    fn invalid_config_is_an_input_error() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "font_size_pt = \"large\"").expect("can write config");
        let err = BookletConfig::load(&path).expect_err("wrong type");
        assert!(matches!(err, StoryError::Config { .. }));
    }

    #[test]
    fn can_validate_default_config() {
        assert_eq!(BookletConfig::default().validate(), Ok(()));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        for contents in [
            "margin_cm = 20.0",
            "margin_cm = 10.5",
            "margin_cm = -1.0",
            "image_max_height_divisor = 0.0",
            "font_size_pt = -12.0",
            "line_height_factor = 0.0",
            "average_char_width_factor = nan",
            "image_text_spacing_cm = -0.5",
        ] {
            std::fs::write(&path, contents).expect("can write config");
            let err = BookletConfig::load(&path).expect_err(contents);
            assert!(
                matches!(err, StoryError::InvalidConfig { .. }),
                "{contents}: {err:?}"
            );
        }
    }

    #[test]
    fn can_load_narrow_but_valid_margins() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "margin_cm = 7.0\nimage_text_spacing_cm = 0.0")
            .expect("can write config");
        let config = BookletConfig::load(&path).expect("margins leave room for text");
        assert!(config.content_width() > Pt(0.0));
    }

    #[test]
    fn image_limits_follow_the_half_page() {
        let config = BookletConfig::default();
        let (slot_w, slot_h) = config.slot_size();
        assert!((config.image_max_height().0 - slot_h.0 / 2.5).abs() < 1e-4);
        assert!((config.content_width().0 - (slot_w.0 - 2.0 * 28.346_457)).abs() < 1e-3);
    }
}
