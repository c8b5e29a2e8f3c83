//! Two-up sheet allocation.
//!
//! Each physical sheet is a landscape A4 page carrying two A5 half pages. Story
//! paragraphs fill the halves strictly in order: paragraph `2k` goes on the left
//! of sheet `k`, paragraph `2k + 1` on its right. Only the last sheet can have
//! an empty right half.

use crate::sinks::BookletConfig;
use crate::units::Rect;

/// Which half of a sheet a paragraph is placed on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// The paragraphs placed on one physical sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    /// Paragraph index on the left half (None for blank)
    pub left: Option<usize>,
    /// Paragraph index on the right half (None for blank)
    pub right: Option<usize>,
}

impl Sheet {
    pub fn slots(&self) -> [(Side, Option<usize>); 2] {
        [(Side::Left, self.left), (Side::Right, self.right)]
    }
}

/// Allocate `segment_count` paragraphs to sheets, two per sheet.
///
/// Returns `ceil(segment_count / 2)` sheets; no paragraphs means no sheets.
pub fn calculate_sheets(segment_count: usize) -> Vec<Sheet> {
    let sheet_count = segment_count.div_ceil(2);
    (0..sheet_count)
        .map(|sheet_idx| {
            let left = sheet_idx * 2;
            let right = left + 1;
            Sheet {
                left: Some(left),
                right: (right < segment_count).then_some(right),
            }
        })
        .collect()
}

/// The rectangle a half page occupies on the sheet.
///
/// The two halves are centred horizontally as a pair and vertically on the
/// sheet.
pub fn slot_rect(config: &BookletConfig, side: Side) -> Rect {
    let (sheet_width, sheet_height) = config.sheet_size();
    let (slot_width, slot_height) = config.slot_size();

    let left_x = (sheet_width - slot_width * 2.0) / 2.0;
    let x1 = match side {
        Side::Left => left_x,
        Side::Right => left_x + slot_width,
    };
    let y1 = (sheet_height - slot_height) / 2.0;

    Rect {
        x1,
        y1,
        x2: x1 + slot_width,
        y2: y1 + slot_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_count_is_half_rounded_up() {
        for n in 0..12 {
            assert_eq!(calculate_sheets(n).len(), n.div_ceil(2), "n = {n}");
        }
    }

    #[test]
    fn paragraphs_fill_left_then_right() {
        let sheets = calculate_sheets(5);
        assert_eq!(
            sheets,
            vec![
                Sheet {
                    left: Some(0),
                    right: Some(1)
                },
                Sheet {
                    left: Some(2),
                    right: Some(3)
                },
                Sheet {
                    left: Some(4),
                    right: None
                },
            ]
        );
    }

    #[test]
    fn single_paragraph_uses_left_half_only() {
        let sheets = calculate_sheets(1);
        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].left, Some(0));
        assert_eq!(sheets[0].right, None);
    }

    #[test]
    fn halves_sit_side_by_side_on_the_sheet() {
        let config = BookletConfig::default();
        let (sheet_width, _) = config.sheet_size();
        let left = slot_rect(&config, Side::Left);
        let right = slot_rect(&config, Side::Right);

        assert_eq!(left.x2, right.x1);
        assert_eq!(left.y1, right.y1);
        // equal gutters either side of the pair
        assert!((left.x1.0 - (sheet_width.0 - right.x2.0)).abs() < 1e-3);
        assert!(left.x1.0 >= 0.0);
    }
}
