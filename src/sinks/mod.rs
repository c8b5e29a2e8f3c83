use crate::units::{Pt, Rect};

mod pdf;
pub use pdf::*;

/// A drawing surface the layout engine renders onto.
///
/// Coordinates are PDF points with the origin at the bottom left of the
/// current page. A surface always has a current page; `new_page` closes it and
/// starts the next one.
pub trait Surface {
    /// Exact width of `text` as it will be rendered at `size`.
    fn text_width(&self, text: &str, size: Pt) -> Pt;

    /// Draw a single line of text with its baseline starting at `(x, y)`.
    fn draw_text(&mut self, text: &str, x: Pt, y: Pt, size: Pt);

    /// Draw an image stretched to fill `rect`.
    fn draw_image(&mut self, image: LoadedImage, rect: Rect);

    /// Finish the current page and start a new, empty one.
    fn new_page(&mut self);
}
