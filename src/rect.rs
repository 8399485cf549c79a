use crate::units::*;

/// A rectangle in PDF page space (origin at the bottom-left), specified by two
/// opposite corners.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    /// The x-coordinate of the lower-left corner.
    pub x1: Pt,
    /// The y-coordinate of the lower-left corner.
    pub y1: Pt,
    /// The x-coordinate of the upper-right corner.
    pub x2: Pt,
    /// The y-coordinate of the upper-right corner.
    pub y2: Pt,
}

impl Rect {
    /// A rectangle covering a whole sheet of the given size
    pub fn sheet(width: Pt, height: Pt) -> Rect {
        Rect {
            x1: Pt::ZERO,
            y1: Pt::ZERO,
            x2: width,
            y2: height,
        }
    }

    /// Convert a box given from the top-left of a sheet (the way layout plans measure)
    /// into page space, where y grows upwards from the bottom edge
    pub fn from_top_left(x: Pt, y: Pt, width: Pt, height: Pt, sheet_height: Pt) -> Rect {
        Rect {
            x1: x,
            y1: sheet_height - y - height,
            x2: x + width,
            y2: sheet_height - y,
        }
    }

    /// Shrink the rectangle by `inset` on every side
    pub fn inset(&self, inset: Pt) -> Rect {
        Rect {
            x1: self.x1 + inset,
            y1: self.y1 + inset,
            x2: self.x2 - inset,
            y2: self.y2 - inset,
        }
    }

    pub fn width(&self) -> Pt {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Pt {
        self.y2 - self.y1
    }
}

impl From<Rect> for pdf_writer::Rect {
    fn from(r: Rect) -> Self {
        pdf_writer::Rect {
            x1: r.x1.into(),
            y1: r.y1.into(),
            x2: r.x2.into(),
            y2: r.y2.into(),
        }
    }
}
