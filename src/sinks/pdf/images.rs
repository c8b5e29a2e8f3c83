//! Raster images for story photos.
//!
//! Photos come off the kiosk camera as JPEGs, which PDF can carry as-is. Any
//! other format is decoded and re-embedded as Flate-compressed RGB, with a soft
//! mask when the image has transparency.

use crate::error::AssetError;
use image::{
    DynamicImage, ExtendedColorType, GenericImageView, ImageDecoder, ImageFormat, ImageReader,
};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Pixel data ready to be written as an image XObject.
#[derive(Debug, Clone)]
pub enum ImageData {
    /// JPEG bytes that can be embedded directly with DCTDecode
    Jpeg { data: Vec<u8>, grey: bool },
    /// zlib-compressed RGB samples, plus zlib-compressed alpha if any pixel is translucent
    Flate {
        rgb: Vec<u8>,
        alpha: Option<Vec<u8>>,
    },
}

/// A decoded image and where it came from.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub data: ImageData,
}

impl LoadedImage {
    /// Load and decode an image from disk.
    ///
    /// The whole file is decoded even for JPEGs so a truncated or corrupt photo
    /// is caught here rather than producing a broken page.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<LoadedImage, AssetError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(AssetError::Missing);
        }
        let bytes = std::fs::read(path)?;

        let reader = ImageReader::new(Cursor::new(bytes.as_slice())).with_guessed_format()?;
        let format = reader.format();
        let decoder = reader.into_decoder()?;
        // the colour layout stored in the file, before any conversion on decode
        let original = decoder.original_color_type();
        let decoded = DynamicImage::from_decoder(decoder)?;
        let (width, height) = decoded.dimensions();
        if width == 0 || height == 0 {
            return Err(AssetError::Empty);
        }

        let data = match direct_jpeg(format, original) {
            Some(grey) => ImageData::Jpeg { data: bytes, grey },
            None => {
                let rgba = decoded.to_rgba8();
                let rgb: Vec<u8> = rgba
                    .pixels()
                    .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
                    .collect();
                let alpha = if rgba.pixels().any(|p| p.0[3] < 255) {
                    let alpha: Vec<u8> = rgba.pixels().map(|p| p.0[3]).collect();
                    Some(miniz_oxide::deflate::compress_to_vec_zlib(&alpha, 6))
                } else {
                    None
                };
                ImageData::Flate {
                    rgb: miniz_oxide::deflate::compress_to_vec_zlib(&rgb, 6),
                    alpha,
                }
            }
        };

        Ok(LoadedImage {
            path: path.to_path_buf(),
            width,
            height,
            data,
        })
    }

    /// Height over width.
    pub fn aspect_ratio(&self) -> f32 {
        self.height as f32 / self.width as f32
    }
}

/// Whether a file can be embedded as-is with DCTDecode, and if so whether it
/// is greyscale. Only one and three component JPEGs qualify; CMYK and YCCK
/// files are decoded and re-encoded instead.
fn direct_jpeg(format: Option<ImageFormat>, original: ExtendedColorType) -> Option<bool> {
    match (format, original) {
        (Some(ImageFormat::Jpeg), ExtendedColorType::Rgb8) => Some(false),
        (Some(ImageFormat::Jpeg), ExtendedColorType::L8) => Some(true),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) mod test_images {
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use std::path::{Path, PathBuf};

    /// Write a solid-colour image of the given size and return its path.
    pub fn write_rgb(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        RgbImage::from_pixel(width, height, Rgb([200, 120, 40]))
            .save(&path)
            .expect("can write test image");
        path
    }

    pub fn write_translucent_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 128]))
            .save(&path)
            .expect("can write test image");
        path
    }
}
