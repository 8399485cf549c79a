use crate::units::Pt;

/// Anything that can tell how wide a run of text renders at a given font size.
/// [`Font`](crate::Font) implements this from the font's horizontal advances
pub trait TextMeasurer {
    fn text_width(&self, text: &str, size: Pt) -> Pt;
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for &M {
    fn text_width(&self, text: &str, size: Pt) -> Pt {
        (**self).text_width(text, size)
    }
}

/// Shrink `size` so that `text` is no wider than `limit` (normally the code's side, so
/// the caption never outgrows the code above it).
///
/// Text width is assumed to scale linearly with font size, so this is a single rescale
/// rather than a search. Text that already fits keeps its size.
pub fn fit_font_size<M: TextMeasurer + ?Sized>(measurer: &M, text: &str, size: Pt, limit: Pt) -> Pt {
    let width = measurer.text_width(text, size);
    if *width > *limit && *width > 0.0 {
        size * (limit / width)
    } else {
        size
    }
}
