use crate::LabelError;
use serde::{Deserialize, Serialize};

/// The proportional constants that drive [`compute_layout`](crate::layout::compute_layout).
///
/// Every ratio is relative to the sheet: the margin to its shorter side, the caption font
/// and the gap to its height. The defaults are the canonical set used everywhere in this
/// crate; override them with [`LayoutConfig::from_toml_str`] or by constructing the
/// struct directly and calling [`LayoutConfig::validate`].
///
/// ```toml
/// margin_ratio = 0.10
/// font_height_ratio = 0.12
/// gap_ratio = 0.03
/// optical_factor = 0.8
/// baseline_factor = 0.8
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Safety margin as a fraction of `min(width, height)`
    pub margin_ratio: f32,
    /// Upper bound accepted for `margin_ratio`
    pub max_margin_ratio: f32,
    /// Nominal caption font size as a fraction of the sheet height
    pub font_height_ratio: f32,
    /// Space between code and caption as a fraction of the sheet height
    pub gap_ratio: f32,
    /// Visible share of the nominal font size, used when centring the block
    pub optical_factor: f32,
    /// Distance from the top of the caption box to its baseline, as a fraction of the font size
    pub baseline_factor: f32,
}

pub const DEFAULT_MARGIN_RATIO: f32 = 0.10;
pub const DEFAULT_MAX_MARGIN_RATIO: f32 = 0.25;
pub const DEFAULT_FONT_HEIGHT_RATIO: f32 = 0.12;
pub const DEFAULT_GAP_RATIO: f32 = 0.03;
pub const DEFAULT_OPTICAL_FACTOR: f32 = 0.8;
pub const DEFAULT_BASELINE_FACTOR: f32 = 0.8;

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            margin_ratio: DEFAULT_MARGIN_RATIO,
            max_margin_ratio: DEFAULT_MAX_MARGIN_RATIO,
            font_height_ratio: DEFAULT_FONT_HEIGHT_RATIO,
            gap_ratio: DEFAULT_GAP_RATIO,
            optical_factor: DEFAULT_OPTICAL_FACTOR,
            baseline_factor: DEFAULT_BASELINE_FACTOR,
        }
    }
}

impl LayoutConfig {
    /// Parse a configuration from TOML. Missing keys take their default values; the
    /// result is validated before it is returned
    pub fn from_toml_str(source: &str) -> Result<LayoutConfig, LabelError> {
        let config: LayoutConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every ratio is finite and in range
    pub fn validate(&self) -> Result<(), LabelError> {
        let ratios = [
            ("margin_ratio", self.margin_ratio),
            ("max_margin_ratio", self.max_margin_ratio),
            ("font_height_ratio", self.font_height_ratio),
            ("gap_ratio", self.gap_ratio),
            ("optical_factor", self.optical_factor),
            ("baseline_factor", self.baseline_factor),
        ];
        for (name, value) in ratios {
            if !value.is_finite() || value < 0.0 {
                return Err(LabelError::InvalidConfig(format!(
                    "{name} must be a finite, non-negative number (got {value})"
                )));
            }
        }

        // two margins must always leave something of the sheet
        if self.max_margin_ratio >= 0.5 {
            return Err(LabelError::InvalidConfig(format!(
                "max_margin_ratio must be below 0.5 (got {})",
                self.max_margin_ratio
            )));
        }
        if self.margin_ratio > self.max_margin_ratio {
            return Err(LabelError::InvalidConfig(format!(
                "margin_ratio {} exceeds max_margin_ratio {}",
                self.margin_ratio, self.max_margin_ratio
            )));
        }

        for (name, value) in [
            ("optical_factor", self.optical_factor),
            ("baseline_factor", self.baseline_factor),
        ] {
            if value <= 0.0 || value > 1.0 {
                return Err(LabelError::InvalidConfig(format!(
                    "{name} must be in (0, 1] (got {value})"
                )));
            }
        }

        Ok(())
    }
}
