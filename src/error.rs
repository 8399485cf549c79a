use crate::units::Pt;
use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum LabelError {
    /// The sheet has a non-positive (or non-finite) width or height. There is no
    /// sensible fallback, so this is fatal to the request
    #[error("invalid sheet dimensions {width} x {height}")]
    InvalidDimension { width: Pt, height: Pt },

    /// The space reserved for the caption leaves no room for the code. Callers can
    /// recover by dropping the caption, shrinking the font ratio, or using a larger sheet
    #[error("caption reservation of {reserved} does not fit in the available height of {available}")]
    LayoutOverflow { available: Pt, reserved: Pt },

    /// A layout configuration value is out of range
    #[error("invalid layout configuration: {0}")]
    InvalidConfig(String),

    /// There is nothing to encode
    #[error("label content is empty")]
    EmptyContent,

    /// The symbol library refused the content (too long, unsupported characters, ...)
    #[error("failed to encode symbol: {0}")]
    Encoding(String),

    /// A caption was requested but no font was supplied to measure and draw it
    #[error("a font is required to render captions")]
    MissingFont,

    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [ab_glyph] failed to parse the font for rasterization
    InvalidFont(#[from] ab_glyph::InvalidFont),

    #[error(transparent)]
    /// [image] failed to encode the raster output
    Image(#[from] image::ImageError),

    #[error(transparent)]
    /// The layout configuration could not be parsed
    Config(#[from] toml::de::Error),
}
