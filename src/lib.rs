//! Proportional layout and rendering of QR code and barcode labels.
//!
//! Every label is one code with an optional caption underneath, centred on a sheet. The
//! size of the code, the caption's font size, and their positions are all derived from
//! the sheet's dimensions by [`layout::compute_layout`], so a label looks the same on a
//! 30 mm sticker as on an A4 page. [`LabelGenerator`] wraps layout, symbol encoding, and
//! rendering to PNG, SVG, or PDF:
//!
//! ```
//! use label_gen::{render::OutputFormat, Label, LabelGenerator, LabelSettings};
//!
//! let generator = LabelGenerator::new(LabelSettings::default());
//! let svg = generator
//!     .render(&Label::new("https://example.com", ""), OutputFormat::Svg)
//!     .unwrap();
//! assert!(svg.starts_with(b"<svg"));
//! ```

mod colour;
pub use colour::*;

mod content;

mod document;
pub use document::*;

mod font;
pub use font::*;

mod generator;
pub use generator::*;

mod info;
pub use info::*;

mod label;
pub use label::*;

pub mod layout;

mod page;
pub use page::*;

mod rect;
pub use rect::*;

pub(crate) mod refs;

pub mod render;

pub mod sheet;

mod symbol;
pub use symbol::*;

mod transform;
pub use transform::*;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Re-export PDF-writer functionality, mostly for custom [pdf_writer::Content] generation
pub use pdf_writer;
