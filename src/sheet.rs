//! Pre-defined sheet sizes for labels and common paper formats.
//!
//! All sizes are provided in portrait orientation (width, height) where width ≤ height.
//! Use the [`SheetOrientation`](crate::sheet::SheetOrientation) trait to convert between
//! portrait and landscape.
//!
//! # Example
//!
//! ```
//! use label_gen::sheet::{Orientation, SheetOrientation, LABEL_MEDIUM};
//!
//! // a 100 x 50 mm label, printed wide
//! let size = LABEL_MEDIUM.oriented(Orientation::Landscape);
//! assert!(size.0 > size.1);
//! ```

use crate::units::*;

/// Sheet dimensions as (width, height) in points.
pub type SheetSize = (Pt, Pt);

// adhesive labels (converted from mm to points)
pub const LABEL_SMALL: SheetSize = (Pt(30.0 * 72.0 / 25.4), Pt(50.0 * 72.0 / 25.4));
pub const LABEL_MEDIUM: SheetSize = (Pt(50.0 * 72.0 / 25.4), Pt(100.0 * 72.0 / 25.4));

// iso a-series
pub const A4: SheetSize = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));
pub const A5: SheetSize = (Pt(148.0 * 72.0 / 25.4), Pt(210.0 * 72.0 / 25.4));
pub const A6: SheetSize = (Pt(105.0 * 72.0 / 25.4), Pt(148.0 * 72.0 / 25.4));

// north american
pub const LETTER: SheetSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));

/// Every named format, keyed by the short name accepted by [`by_name`]
pub const FORMATS: &[(&str, SheetSize)] = &[
    ("label-small", LABEL_SMALL),
    ("label-medium", LABEL_MEDIUM),
    ("a6", A6),
    ("a5", A5),
    ("a4", A4),
    ("letter", LETTER),
];

/// Look up a named format, ignoring case
pub fn by_name(name: &str) -> Option<SheetSize> {
    FORMATS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, size)| size)
}

/// Which way round the sheet is printed
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Orientation {
    /// Tall: width ≤ height
    #[default]
    Portrait,
    /// Wide: width ≥ height
    Landscape,
}

/// Swap a base (width, height) pair into the requested orientation. Whatever order the
/// pair is given in, `horizontal` yields `(max, min)` and otherwise `(min, max)`.
pub fn oriented_dims(base_w: Pt, base_h: Pt, horizontal: bool) -> SheetSize {
    let (short, long) = (base_w.min(base_h), base_w.max(base_h));
    if horizontal {
        (long, short)
    } else {
        (short, long)
    }
}

/// Convert sheet sizes between portrait and landscape orientations.
pub trait SheetOrientation {
    /// Returns the size in portrait orientation (width ≤ height).
    fn portrait(self) -> Self;
    /// Returns the size in landscape orientation (width ≥ height).
    fn landscape(self) -> Self;
    /// Returns the size in the given orientation.
    fn oriented(self, orientation: Orientation) -> Self;
}

impl SheetOrientation for SheetSize {
    fn portrait(self) -> Self {
        oriented_dims(self.0, self.1, false)
    }

    fn landscape(self) -> Self {
        oriented_dims(self.0, self.1, true)
    }

    fn oriented(self, orientation: Orientation) -> Self {
        oriented_dims(self.0, self.1, orientation == Orientation::Landscape)
    }
}
