//! Typed lengths used throughout layout and rendering.
//!
//! Layout is always carried out in [`Pt`] (PDF points, 1/72 of an inch). Sheet
//! formats are usually quoted in millimetres, so [`Mm`] and [`In`] convert into
//! points, and [`Pt::to_px`] converts into device pixels for raster output.

use derive_more::{Add, AddAssign, Deref, Display, From, Sub, SubAssign, Sum};
use std::ops::{Div, Mul, Neg};

const MM_PER_INCH: f32 = 25.4;
const PT_PER_INCH: f32 = 72.0;

/// A length in PDF points
#[derive(
    Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, Sub, AddAssign, SubAssign, Sum, Deref, From, Display,
)]
#[display("{_0}pt")]
pub struct Pt(pub f32);

/// A length in millimetres
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, Sub, Deref, From, Display)]
#[display("{_0}mm")]
pub struct Mm(pub f32);

/// A length in inches
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, Sub, Deref, From, Display)]
#[display("{_0}in")]
pub struct In(pub f32);

impl Pt {
    pub const ZERO: Pt = Pt(0.0);

    pub fn min(self, other: Pt) -> Pt {
        Pt(self.0.min(other.0))
    }

    pub fn max(self, other: Pt) -> Pt {
        Pt(self.0.max(other.0))
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Convert to device pixels at the given resolution (dots per inch)
    pub fn to_px(self, dpi: f32) -> f32 {
        self.0 * dpi / PT_PER_INCH
    }
}

impl Mul<f32> for Pt {
    type Output = Pt;

    fn mul(self, rhs: f32) -> Pt {
        Pt(self.0 * rhs)
    }
}

impl Mul<Pt> for f32 {
    type Output = Pt;

    fn mul(self, rhs: Pt) -> Pt {
        Pt(self * rhs.0)
    }
}

impl Div<f32> for Pt {
    type Output = Pt;

    fn div(self, rhs: f32) -> Pt {
        Pt(self.0 / rhs)
    }
}

/// The ratio between two lengths
impl Div<Pt> for Pt {
    type Output = f32;

    fn div(self, rhs: Pt) -> f32 {
        self.0 / rhs.0
    }
}

impl Neg for Pt {
    type Output = Pt;

    fn neg(self) -> Pt {
        Pt(-self.0)
    }
}

impl From<Mm> for Pt {
    fn from(mm: Mm) -> Pt {
        Pt(mm.0 * PT_PER_INCH / MM_PER_INCH)
    }
}

impl From<In> for Pt {
    fn from(inches: In) -> Pt {
        Pt(inches.0 * PT_PER_INCH)
    }
}

impl From<Pt> for Mm {
    fn from(pt: Pt) -> Mm {
        Mm(pt.0 * MM_PER_INCH / PT_PER_INCH)
    }
}

impl From<Pt> for f32 {
    fn from(pt: Pt) -> f32 {
        pt.0
    }
}
