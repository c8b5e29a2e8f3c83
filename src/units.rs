//! Typographic units and the fixed page sizes used by the booklet.
//!
//! All layout happens in PDF points (1/72 inch). Metric units convert into
//! points so configuration can stay in the centimetres a print shop talks in.

use std::ops::{Add, AddAssign, Deref, Div, Mul, Sub, SubAssign};

/// A length in PDF points.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
pub struct Pt(pub f32);

/// A length in millimetres.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Mm(pub f32);

/// A length in centimetres.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cm(pub f32);

const POINTS_PER_MM: f32 = 72.0 / 25.4;

impl From<Mm> for Pt {
    fn from(mm: Mm) -> Pt {
        Pt(mm.0 * POINTS_PER_MM)
    }
}

impl From<Cm> for Pt {
    fn from(cm: Cm) -> Pt {
        Pt(cm.0 * 10.0 * POINTS_PER_MM)
    }
}

impl Deref for Pt {
    type Target = f32;

    fn deref(&self) -> &f32 {
        &self.0
    }
}

impl Add for Pt {
    type Output = Pt;

    fn add(self, rhs: Pt) -> Pt {
        Pt(self.0 + rhs.0)
    }
}

impl AddAssign for Pt {
    fn add_assign(&mut self, rhs: Pt) {
        self.0 += rhs.0;
    }
}

impl Sub for Pt {
    type Output = Pt;

    fn sub(self, rhs: Pt) -> Pt {
        Pt(self.0 - rhs.0)
    }
}

impl SubAssign for Pt {
    fn sub_assign(&mut self, rhs: Pt) {
        self.0 -= rhs.0;
    }
}

impl Mul<f32> for Pt {
    type Output = Pt;

    fn mul(self, rhs: f32) -> Pt {
        Pt(self.0 * rhs)
    }
}

impl Div<f32> for Pt {
    type Output = Pt;

    fn div(self, rhs: f32) -> Pt {
        Pt(self.0 / rhs)
    }
}

impl Pt {
    pub fn min(self, other: Pt) -> Pt {
        Pt(self.0.min(other.0))
    }
}

/// An axis-aligned rectangle in PDF space (origin bottom-left, y up).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    pub x1: Pt,
    pub y1: Pt,
    pub x2: Pt,
    pub y2: Pt,
}

impl Rect {
    pub fn width(&self) -> Pt {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Pt {
        self.y2 - self.y1
    }
}

pub mod pagesize {
    use super::{Mm, Pt};

    /// Portrait A4, (width, height).
    pub fn a4() -> (Pt, Pt) {
        (Mm(210.0).into(), Mm(297.0).into())
    }

    /// Portrait A5, (width, height).
    pub fn a5() -> (Pt, Pt) {
        (Mm(148.0).into(), Mm(210.0).into())
    }

    /// Swaps a portrait size into landscape.
    pub fn landscape(size: (Pt, Pt)) -> (Pt, Pt) {
        (size.1, size.0)
    }
}
