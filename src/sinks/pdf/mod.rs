//! PDF output for booklets.
//!
//! [`PdfDocument`] is the drawing surface the layout engine renders onto. It
//! buffers every page in memory and only turns into a file in [`PdfDocument::save`],
//! which writes to a temporary file next to the destination and moves it into
//! place once it is complete. A run that fails never leaves a half-written
//! booklet behind.

mod config;
pub use config::*;

pub mod fonts;

mod images;
pub use images::*;

#[cfg(test)]
pub(crate) use images::test_images;

use crate::error::OutputError;
use crate::sinks::Surface;
use crate::units::{Pt, Rect};
use chrono::{Datelike, Local, Timelike};
use pdf_writer::{Content, Date, Filter, Name, Pdf, Ref, Str, TextStr};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// The drawing operations and image usage of one page.
struct PageContent {
    content: Content,
    images: Vec<usize>,
}

impl PageContent {
    fn new() -> PageContent {
        PageContent {
            content: Content::new(),
            images: Vec::new(),
        }
    }
}

/// An in-memory PDF built page by page.
///
/// Like a printing canvas, the document always has one open page, so a
/// document nobody drew on still finishes as a single blank page.
pub struct PdfDocument {
    page_size: (Pt, Pt),
    /// Pages closed by [`Surface::new_page`]
    finished: Vec<PageContent>,
    current: PageContent,
    images: Vec<LoadedImage>,
    title: Option<String>,
}

impl PdfDocument {
    pub fn new(page_size: (Pt, Pt)) -> PdfDocument {
        PdfDocument {
            page_size,
            finished: Vec::new(),
            current: PageContent::new(),
            images: Vec::new(),
            title: None,
        }
    }

    pub fn set_title<S: ToString>(&mut self, title: S) -> &mut Self {
        self.title = Some(title.to_string());
        self
    }

    /// Number of pages, including the one currently open.
    pub fn page_count(&self) -> usize {
        self.finished.len() + 1
    }

    /// Serialize the document.
    pub fn finish(self) -> Vec<u8> {
        let mut alloc = Ref::new(1);
        let catalog_id = alloc.bump();
        let page_tree_id = alloc.bump();
        let info_id = alloc.bump();
        let font_id = alloc.bump();

        let mut pdf = Pdf::new();

        {
            let mut info = pdf.document_info(info_id);
            if let Some(title) = &self.title {
                info.title(TextStr(title));
            }
            info.creator(TextStr(concat!("story-booklet v", env!("CARGO_PKG_VERSION"))));
            info.creation_date(pdf_date(Local::now()));
        }

        pdf.type1_font(font_id)
            .base_font(Name(fonts::BASE_FONT))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        let image_ids: Vec<Ref> = self
            .images
            .iter()
            .map(|image| write_image(&mut pdf, &mut alloc, image))
            .collect();

        let (width, height) = self.page_size;
        let mut pages = self.finished;
        pages.push(self.current);
        let mut page_ids = Vec::with_capacity(pages.len());
        for page in pages.into_iter() {
            let page_id = alloc.bump();
            let content_id = alloc.bump();
            page_ids.push(page_id);

            let raw = page.content.finish();
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
            pdf.stream(content_id, &compressed)
                .filter(Filter::FlateDecode);

            let mut pdf_page = pdf.page(page_id);
            pdf_page
                .media_box(pdf_writer::Rect::new(0.0, 0.0, *width, *height))
                .parent(page_tree_id)
                .contents(content_id);
            let mut resources = pdf_page.resources();
            resources
                .fonts()
                .pair(Name(fonts::RESOURCE_NAME), font_id);
            if !page.images.is_empty() {
                let mut x_objects = resources.x_objects();
                for index in page.images.iter() {
                    let name = image_name(*index);
                    x_objects.pair(Name(name.as_bytes()), image_ids[*index]);
                }
            }
        }

        pdf.catalog(catalog_id).pages(page_tree_id);
        let page_count = page_ids.len() as i32;
        pdf.pages(page_tree_id)
            .kids(page_ids)
            .count(page_count);

        pdf.finish()
    }

    /// Serialize the document and atomically write it to `path`.
    pub fn save<P: AsRef<Path>>(self, path: P) -> Result<(), OutputError> {
        let path = path.as_ref();
        let dir = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let bytes = self.finish();

        let mut file = NamedTempFile::new_in(dir).map_err(|source| OutputError::Create {
            dir: dir.to_path_buf(),
            source,
        })?;
        file.write_all(&bytes).map_err(OutputError::Write)?;
        file.flush().map_err(OutputError::Write)?;
        file.persist(path).map_err(|source| OutputError::Persist {
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}

impl Surface for PdfDocument {
    fn text_width(&self, text: &str, size: Pt) -> Pt {
        fonts::width_of_text(text, size)
    }

    fn draw_text(&mut self, text: &str, x: Pt, y: Pt, size: Pt) {
        let encoded = fonts::encode(text);
        self.current
            .content
            .begin_text()
            .set_font(Name(fonts::RESOURCE_NAME), *size)
            .next_line(*x, *y)
            .show(Str(&encoded))
            .end_text();
    }

    fn draw_image(&mut self, image: LoadedImage, rect: Rect) {
        log::trace!("Placing {} at {rect:?}", image.path.display());
        let index = self.images.len();
        self.images.push(image);

        let name = image_name(index);
        let page = &mut self.current;
        page.images.push(index);
        page.content
            .save_state()
            .transform([
                *rect.width(),
                0.0,
                0.0,
                *rect.height(),
                *rect.x1,
                *rect.y1,
            ])
            .x_object(Name(name.as_bytes()))
            .restore_state();
    }

    fn new_page(&mut self) {
        let page = std::mem::replace(&mut self.current, PageContent::new());
        self.finished.push(page);
    }
}

fn image_name(index: usize) -> String {
    format!("Im{}", index + 1)
}

fn write_image(pdf: &mut Pdf, alloc: &mut Ref, image: &LoadedImage) -> Ref {
    let id = alloc.bump();
    let width = image.width as i32;
    let height = image.height as i32;

    match &image.data {
        ImageData::Jpeg { data, grey } => {
            let mut xobj = pdf.image_xobject(id, data);
            xobj.filter(Filter::DctDecode);
            xobj.width(width);
            xobj.height(height);
            if *grey {
                xobj.color_space().device_gray();
            } else {
                xobj.color_space().device_rgb();
            }
            xobj.bits_per_component(8);
        }
        ImageData::Flate { rgb, alpha } => {
            let mask_id = alpha.as_ref().map(|alpha| {
                let mask_id = alloc.bump();
                let mut mask = pdf.image_xobject(mask_id, alpha);
                mask.filter(Filter::FlateDecode);
                mask.width(width);
                mask.height(height);
                mask.color_space().device_gray();
                mask.bits_per_component(8);
                mask_id
            });

            let mut xobj = pdf.image_xobject(id, rgb);
            xobj.filter(Filter::FlateDecode);
            xobj.width(width);
            xobj.height(height);
            xobj.color_space().device_rgb();
            xobj.bits_per_component(8);
            if let Some(mask_id) = mask_id {
                xobj.s_mask(mask_id);
            }
        }
    }

    id
}

fn pdf_date(now: chrono::DateTime<Local>) -> Date {
    Date::new(now.year().clamp(0, 9999) as u16)
        .month(now.month() as u8)
        .day(now.day() as u8)
        .hour(now.hour() as u8)
        .minute(now.minute() as u8)
        .second(now.second().min(59) as u8)
}

#[cfg(test)]
mod tests {
    use super::test_images::write_rgb;
    use super::*;
    use crate::units::pagesize;

    fn sheet() -> (Pt, Pt) {
        pagesize::landscape(pagesize::a4())
    }

    #[test]
    fn empty_document_is_one_blank_page() {
        let doc = PdfDocument::new(sheet());
        assert_eq!(doc.page_count(), 1);
        let bytes = doc.finish();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn new_page_adds_pages() {
        let mut doc = PdfDocument::new(sheet());
        doc.draw_text("Hallo", Pt(10.0), Pt(10.0), Pt(12.0));
        doc.new_page();
        doc.draw_text("Welt", Pt(10.0), Pt(10.0), Pt(12.0));
        assert_eq!(doc.page_count(), 2);
    }

    #[test]
    fn every_page_is_written_including_the_open_one() {
        let mut doc = PdfDocument::new(sheet());
        doc.new_page();
        doc.new_page();
        assert_eq!(doc.page_count(), 3);
        let bytes = doc.finish();
        assert!(bytes.windows(8).any(|w| w == b"/Count 3"));
    }

    #[test]
    fn can_save_document_with_image() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let photo = write_rgb(dir.path(), "photo.jpg", 16, 12);
        let image = LoadedImage::load(&photo).expect("can load photo");

        let mut doc = PdfDocument::new(sheet());
        doc.set_title("star_generated_story");
        doc.draw_image(
            image,
            Rect {
                x1: Pt(10.0),
                y1: Pt(10.0),
                x2: Pt(170.0),
                y2: Pt(130.0),
            },
        );
        doc.draw_text("Ein Fuchs", Pt(10.0), Pt(5.0), Pt(12.0));

        let out = dir.path().join("booklet.pdf");
        doc.save(&out).expect("can save booklet");

        let bytes = std::fs::read(&out).expect("can read booklet back");
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(bytes.windows(9).any(|w| w == b"Helvetica"));
        assert!(bytes.windows(9).any(|w| w == b"DCTDecode"));
    }

    #[test]
    fn failed_save_leaves_nothing_behind() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let out = dir.path().join("missing").join("booklet.pdf");
        let err = PdfDocument::new(sheet()).save(&out).expect_err("parent is missing");
        assert!(matches!(err, OutputError::Create { .. }));
        assert!(!out.exists());
    }
}
