//! 2D transformation matrices for PDF content positioning.

use crate::rect::Rect;
use crate::units::*;
use pdf_writer::Content;

/// A transformation matrix, as used by the PDF `cm` operator.
///
/// The matrix is represented as [a, b, c, d, e, f] corresponding to:
/// ```text
/// | a  b  0 |
/// | c  d  0 |
/// | e  f  1 |
/// ```
///
/// Symbols are drawn in module units, so a transform maps the module grid (origin at
/// its top-left, y growing downwards) onto the code's rectangle on the page:
///
/// ```
/// use label_gen::{Rect, Transform, Pt};
///
/// let target = Rect { x1: Pt(10.0), y1: Pt(10.0), x2: Pt(30.0), y2: Pt(30.0) };
/// let transform = Transform::grid_to_rect(10, 10, &target);
/// assert_eq!(transform.apply(0.0, 0.0), (10.0, 30.0));
/// assert_eq!(transform.apply(10.0, 10.0), (30.0, 10.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Identity transform (no transformation)
    pub fn identity() -> Self {
        Transform {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Create a translation transform
    pub fn translate(x: Pt, y: Pt) -> Self {
        Transform {
            e: *x,
            f: *y,
            ..Self::identity()
        }
    }

    /// Create a scaling transform
    pub fn scale(sx: f32, sy: f32) -> Self {
        Transform {
            a: sx,
            d: sy,
            ..Self::identity()
        }
    }

    /// Combine this transform with another (self * other)
    pub fn then(self, other: Transform) -> Self {
        Transform {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    /// Map a `columns` x `rows` grid, whose origin is its top-left corner, onto `target`
    pub fn grid_to_rect(columns: usize, rows: usize, target: &Rect) -> Self {
        let sx = *target.width() / columns.max(1) as f32;
        let sy = *target.height() / rows.max(1) as f32;
        Transform::scale(sx, -sy).then(Transform::translate(target.x1, target.y2))
    }

    /// Transform a point
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// Write the transform to a PDF content stream
    pub fn write_to_content(&self, content: &mut Content) {
        content.transform([self.a, self.b, self.c, self.d, self.e, self.f]);
    }
}
