//! Drawing composed labels into files.
//!
//! Each output format takes a [`Composition`](crate::Composition) and the
//! [`LabelStyle`](crate::LabelStyle) and returns the encoded bytes; the layout is the
//! same whichever format is chosen.
//!
//! - [`render_png`] rasterizes at the style's resolution
//! - [`render_svg`] emits a vector document sized in millimetres
//! - [`render_pdf`] emits a single-page, print-ready PDF

mod pdf;
mod png;
mod svg;

pub use self::pdf::*;
pub use self::png::*;
pub use self::svg::*;

use crate::LabelError;

/// The file formats a label can be rendered to
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
    Pdf,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Pdf => "pdf",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Svg => "image/svg+xml",
            OutputFormat::Pdf => "application/pdf",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            "pdf" => Ok(OutputFormat::Pdf),
            other => Err(LabelError::InvalidConfig(format!(
                "unknown output format '{other}'"
            ))),
        }
    }
}
