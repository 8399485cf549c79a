//! Proportional placement of a code and its caption on a sheet.
//!
//! Given a sheet size, a scale percentage, and whether a caption is present,
//! [`compute_layout`](crate::layout::compute_layout) derives the side length of the
//! square code, the caption's font size, and where both go so that the pair is
//! centred as one block inside the sheet, clear of a safety margin. The computation
//! is pure: it keeps no state and can be called from any number of threads.
//!
//! Captions that are wider than the code are shrunk with
//! [`fit_font_size`](crate::layout::fit_font_size), which measures text through the
//! [`TextMeasurer`](crate::layout::TextMeasurer) trait.
//!
//! # Example
//!
//! ```
//! use label_gen::layout::SheetSpec;
//! use label_gen::Pt;
//!
//! let plan = SheetSpec::new((Pt(100.0), Pt(50.0)), 80.0, true)
//!     .layout()
//!     .expect("a 100 x 50 sheet fits a caption");
//!
//! assert!((*plan.code_side - 26.0).abs() < 1e-3);
//! assert!((*plan.code_offset_x - 37.0).abs() < 1e-3);
//! ```

mod calculator;
mod config;
mod fit;

pub use calculator::*;
pub use config::*;
pub use fit::*;
