use serde::Deserialize;

/// One paragraph of a story, optionally illustrated by a photo.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Segment {
    /// The paragraph text; `\n` marks a hard line break
    pub text: String,

    /// File name of the illustrating image, relative to the story's image directory
    pub image: Option<String>,
}

#[cfg(test)]
impl Segment {
    pub fn text<S: ToString>(text: S) -> Segment {
        Segment {
            text: text.to_string(),
            image: None,
        }
    }

    pub fn with_image<S: ToString>(mut self, image: S) -> Segment {
        self.image = Some(image.to_string());
        self
    }
}

/// The on-disk shape of a segment, before normalisation.
#[derive(Deserialize)]
pub(super) struct SegmentRecord {
    text: String,
    #[serde(default)]
    image: Option<String>,
}

impl From<SegmentRecord> for Segment {
    fn from(record: SegmentRecord) -> Segment {
        // the kiosk writes "" when a paragraph has no photo
        let image = record.image.filter(|image| !image.trim().is_empty());
        Segment {
            text: record.text,
            image,
        }
    }
}
