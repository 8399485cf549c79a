//! Code symbols as grids of dark and light modules.
//!
//! Encoding is delegated to the [`qrcode`] and [`barcoders`] crates; this module only
//! normalises their output into a [`Symbol`], a rectangular grid with its quiet zone
//! already included, which the renderers scale into the code square of a layout.

use crate::LabelError;
use barcoders::sym::code128::Code128;
use qrcode::{EcLevel, QrCode};
use tracing::debug;

/// Code 128 character set B selector, which covers printable ASCII
const CODE128_SET_B: char = '\u{0181}';

/// The kind of code to draw on the label
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Symbology {
    /// A QR code at error-correction level M
    #[default]
    Qr,
    /// A Code 128 linear barcode, drawn as full-height bars filling the code square
    Code128,
}

impl Symbology {
    /// Light modules added on every side that carries a quiet zone
    pub fn default_quiet_zone(&self) -> usize {
        match self {
            Symbology::Qr => 1,
            Symbology::Code128 => 10,
        }
    }
}

impl std::str::FromStr for Symbology {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "qr" | "qrcode" => Ok(Symbology::Qr),
            "code128" | "barcode" => Ok(Symbology::Code128),
            other => Err(LabelError::InvalidConfig(format!("unknown symbology '{other}'"))),
        }
    }
}

/// An encoded code, as a grid of modules stored row by row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub symbology: Symbology,
    /// Number of modules across
    pub columns: usize,
    /// Number of modules down; linear barcodes have a single row
    pub rows: usize,
    dark: Vec<bool>,
}

impl Symbol {
    /// Encode `content` with the symbology's default quiet zone
    pub fn generate(symbology: Symbology, content: &str) -> Result<Symbol, LabelError> {
        Self::generate_with_quiet_zone(symbology, content, symbology.default_quiet_zone())
    }

    pub fn generate_with_quiet_zone(
        symbology: Symbology,
        content: &str,
        quiet_zone: usize,
    ) -> Result<Symbol, LabelError> {
        if content.is_empty() {
            return Err(LabelError::EmptyContent);
        }

        let symbol = match symbology {
            Symbology::Qr => {
                let code = QrCode::with_error_correction_level(content.as_bytes(), EcLevel::M)
                    .map_err(|e| LabelError::Encoding(e.to_string()))?;
                let width = code.width();
                let dark: Vec<bool> = code
                    .to_colors()
                    .into_iter()
                    .map(|c| c == qrcode::Color::Dark)
                    .collect();
                Symbol::from_grid(symbology, width, width, dark).with_quiet_zone(quiet_zone, true)
            }
            Symbology::Code128 => {
                let code = Code128::new(format!("{CODE128_SET_B}{content}"))
                    .map_err(|e| LabelError::Encoding(e.to_string()))?;
                let dark: Vec<bool> = code.encode().into_iter().map(|bit| bit == 1).collect();
                // bars already span the full height, so only pad horizontally
                Symbol::from_grid(symbology, dark.len(), 1, dark).with_quiet_zone(quiet_zone, false)
            }
        };

        debug!(
            ?symbology,
            columns = symbol.columns,
            rows = symbol.rows,
            "encoded symbol"
        );
        Ok(symbol)
    }

    fn from_grid(symbology: Symbology, columns: usize, rows: usize, dark: Vec<bool>) -> Symbol {
        debug_assert_eq!(columns * rows, dark.len());
        Symbol {
            symbology,
            columns,
            rows,
            dark,
        }
    }

    fn with_quiet_zone(self, zone: usize, vertical: bool) -> Symbol {
        if zone == 0 {
            return self;
        }
        let pad_rows = if vertical { zone } else { 0 };
        let columns = self.columns + zone * 2;
        let rows = self.rows + pad_rows * 2;
        let mut dark = vec![false; columns * rows];
        for y in 0..self.rows {
            let src = &self.dark[y * self.columns..(y + 1) * self.columns];
            let start = (y + pad_rows) * columns + zone;
            dark[start..start + self.columns].copy_from_slice(src);
        }
        Symbol {
            symbology: self.symbology,
            columns,
            rows,
            dark,
        }
    }

    /// Whether the module at column `x`, row `y` is dark. Out-of-range modules are light
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.columns && y < self.rows && self.dark[y * self.columns + x]
    }

    /// Horizontal runs of dark modules as `(row, first column, length)`, which is how
    /// every renderer draws the symbol
    pub fn dark_runs(&self) -> Vec<(usize, usize, usize)> {
        let mut runs = Vec::new();
        for y in 0..self.rows {
            let row = &self.dark[y * self.columns..(y + 1) * self.columns];
            let mut x = 0;
            while x < row.len() {
                if row[x] {
                    let start = x;
                    while x < row.len() && row[x] {
                        x += 1;
                    }
                    runs.push((y, start, x - start));
                } else {
                    x += 1;
                }
            }
        }
        runs
    }
}
