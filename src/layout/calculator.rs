use super::LayoutConfig;
use crate::sheet::SheetSize;
use crate::units::Pt;
use crate::LabelError;
use tracing::trace;

/// Scale used when the requested percentage is not a number
pub const DEFAULT_SCALE_PERCENT: f32 = 80.0;

/// One layout request: the sheet, how much of the available space the code should
/// take, and whether a caption goes underneath it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetSpec {
    pub width: Pt,
    pub height: Pt,
    /// Size of the code relative to the space available for it, in `[1, 100]`.
    /// Values outside that range are clamped
    pub scale_percent: f32,
    pub has_caption: bool,
}

impl SheetSpec {
    pub fn new(size: SheetSize, scale_percent: f32, has_caption: bool) -> SheetSpec {
        SheetSpec {
            width: size.0,
            height: size.1,
            scale_percent,
            has_caption,
        }
    }

    /// Lay this sheet out with the default [`LayoutConfig`]
    pub fn layout(&self) -> Result<LayoutPlan, LabelError> {
        compute_layout(self, &LayoutConfig::default())
    }

    fn clamped_scale(&self) -> f32 {
        if self.scale_percent.is_nan() {
            DEFAULT_SCALE_PERCENT
        } else {
            self.scale_percent.clamp(1.0, 100.0)
        }
    }
}

/// Where the code and its caption go on a sheet. All coordinates are measured from
/// the top-left corner of the sheet, with y growing downwards
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutPlan {
    /// Side length of the (square) code
    pub code_side: Pt,
    /// Nominal caption font size; zero without a caption
    pub caption_font_size: Pt,
    pub code_offset_x: Pt,
    pub code_offset_y: Pt,
    /// The caption's baseline, which is where text-drawing APIs anchor glyphs
    pub caption_baseline_y: Pt,
    /// Space between the bottom of the code and the top of the caption; zero without a caption
    pub gap: Pt,
    /// The safety margin kept clear on every edge
    pub margin: Pt,
    /// Height of the centred block: code, gap, and the optical height of the caption
    pub block_height: Pt,
}

/// Compute where a square code and an optional caption line go so that the pair is
/// centred as one block inside the sheet, clear of a safety margin.
///
/// Fails with [`LabelError::InvalidConfig`] for out-of-range ratios, with
/// [`LabelError::InvalidDimension`] for non-positive sheets, and with
/// [`LabelError::LayoutOverflow`] when the caption reservation leaves no height for
/// the code. Never produces negative offsets.
pub fn compute_layout(spec: &SheetSpec, config: &LayoutConfig) -> Result<LayoutPlan, LabelError> {
    config.validate()?;

    let SheetSpec { width, height, .. } = *spec;
    if !(width.is_finite() && height.is_finite() && *width > 0.0 && *height > 0.0) {
        return Err(LabelError::InvalidDimension { width, height });
    }

    let margin = width.min(height) * config.margin_ratio;
    let available_width = width - margin * 2.0;
    let available_height = height - margin * 2.0;

    let (font_size, gap) = if spec.has_caption {
        (height * config.font_height_ratio, height * config.gap_ratio)
    } else {
        (Pt::ZERO, Pt::ZERO)
    };

    let available_code_height = available_height - font_size - gap;
    if *available_code_height <= 0.0 {
        return Err(LabelError::LayoutOverflow {
            available: available_height,
            reserved: font_size + gap,
        });
    }

    let code_side = available_width.min(available_code_height) * (spec.clamped_scale() / 100.0);
    let block_height = code_side + gap + font_size * config.optical_factor;

    let code_offset_x = (width - code_side) / 2.0;
    let code_offset_y = (height - block_height) / 2.0;
    let caption_baseline_y = code_offset_y + code_side + gap + font_size * config.baseline_factor;

    trace!(
        width = *width,
        height = *height,
        code_side = *code_side,
        font_size = *font_size,
        "computed layout"
    );

    Ok(LayoutPlan {
        code_side,
        caption_font_size: font_size,
        code_offset_x,
        code_offset_y,
        caption_baseline_y,
        gap,
        margin,
        block_height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    fn assert_close(actual: Pt, expected: f32) {
        assert!(
            (*actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    fn spec(width: f32, height: f32, scale_percent: f32, has_caption: bool) -> SheetSpec {
        SheetSpec::new((Pt(width), Pt(height)), scale_percent, has_caption)
    }

    #[test]
    fn wide_label_with_caption() {
        let plan = spec(100.0, 50.0, 80.0, true).layout().unwrap();
        assert_close(plan.margin, 5.0);
        assert_close(plan.caption_font_size, 6.0);
        assert_close(plan.gap, 1.5);
        assert_close(plan.code_side, 26.0);
        assert_close(plan.code_offset_x, 37.0);
        assert_close(plan.block_height, 32.3);
        assert_close(plan.code_offset_y, 8.85);
        assert_close(plan.caption_baseline_y, 8.85 + 26.0 + 1.5 + 6.0 * 0.8);
    }

    #[test]
    fn without_caption_the_code_is_centred_alone() {
        let plan = spec(100.0, 50.0, 100.0, false).layout().unwrap();
        assert_eq!(plan.caption_font_size, Pt::ZERO);
        assert_eq!(plan.gap, Pt::ZERO);
        assert_eq!(plan.block_height, plan.code_side);
        assert_close(plan.code_side, 40.0);
        assert_close(plan.code_offset_y, 5.0);
    }

    #[test]
    fn non_positive_sheets_are_rejected() {
        for (w, h) in [(0.0, 50.0), (100.0, -1.0), (f32::NAN, 10.0), (f32::INFINITY, 10.0)] {
            assert!(matches!(
                spec(w, h, 50.0, false).layout(),
                Err(LabelError::InvalidDimension { .. })
            ));
        }
    }

    #[test]
    fn scale_is_clamped() {
        let full = spec(100.0, 100.0, 100.0, false).layout().unwrap();
        let over = spec(100.0, 100.0, 250.0, false).layout().unwrap();
        assert_eq!(full, over);

        let one = spec(100.0, 100.0, 1.0, false).layout().unwrap();
        let under = spec(100.0, 100.0, -20.0, false).layout().unwrap();
        assert_eq!(one, under);

        let nan = spec(100.0, 100.0, f32::NAN, false).layout().unwrap();
        let default = spec(100.0, 100.0, DEFAULT_SCALE_PERCENT, false).layout().unwrap();
        assert_eq!(nan, default);
    }

    #[test]
    fn small_label_still_fits_with_defaults() {
        let plan = spec(30.0, 20.0, 100.0, true).layout().unwrap();
        assert!(*plan.code_side > 0.0);
        assert!(*plan.code_offset_y >= 0.0);
        assert!(*(plan.code_offset_y + plan.block_height) <= 20.0 + EPSILON);
    }

    #[test]
    fn oversized_caption_overflows() {
        let config = LayoutConfig {
            font_height_ratio: 0.9,
            ..LayoutConfig::default()
        };
        let err = compute_layout(&spec(30.0, 20.0, 100.0, true), &config).unwrap_err();
        match err {
            LabelError::LayoutOverflow { available, reserved } => {
                assert_close(available, 16.0);
                assert_close(reserved, 18.6);
            }
            other => panic!("expected overflow, got {other:?}"),
        }

        // the same sheet is fine once the caption is dropped
        assert!(compute_layout(&spec(30.0, 20.0, 100.0, false), &config).is_ok());
    }

    #[test]
    fn block_stays_inside_the_sheet() {
        let sizes = [(100.0, 50.0), (50.0, 100.0), (30.0, 20.0), (595.0, 842.0), (1.0, 1.0)];
        for (w, h) in sizes {
            for scale in [1.0, 25.0, 50.0, 80.0, 99.5, 100.0] {
                for has_caption in [false, true] {
                    let plan = spec(w, h, scale, has_caption).layout().unwrap();
                    assert!(*plan.code_offset_x >= 0.0);
                    assert!(*plan.code_offset_y >= 0.0);
                    assert!(*(plan.code_offset_x + plan.code_side) <= w + EPSILON);
                    assert!(*(plan.code_offset_y + plan.block_height) <= h + EPSILON);
                }
            }
        }
    }

    #[test]
    fn identical_inputs_give_identical_plans() {
        let a = spec(210.0, 297.0, 73.0, true).layout().unwrap();
        let b = spec(210.0, 297.0, 73.0, true).layout().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn larger_scale_gives_larger_code() {
        let mut previous = Pt::ZERO;
        for scale in [10.0, 20.0, 55.0, 90.0, 100.0] {
            let plan = spec(100.0, 50.0, scale, true).layout().unwrap();
            assert!(plan.code_side > previous);
            previous = plan.code_side;
        }
    }

    #[test]
    fn horizontal_offset_ignores_height_without_caption() {
        // width is the binding constraint in both cases, so the code side is equal
        let short = spec(40.0, 100.0, 60.0, false).layout().unwrap();
        let tall = spec(40.0, 300.0, 60.0, false).layout().unwrap();
        assert_eq!(short.code_side, tall.code_side);
        assert_eq!(short.code_offset_x, tall.code_offset_x);
    }

    #[test]
    fn out_of_range_config_is_rejected() {
        let negative_margin = LayoutConfig {
            margin_ratio: -0.2,
            ..LayoutConfig::default()
        };
        assert!(matches!(
            compute_layout(&spec(100.0, 50.0, 80.0, false), &negative_margin),
            Err(LabelError::InvalidConfig(_))
        ));

        let negative_gap = LayoutConfig {
            gap_ratio: -0.5,
            ..LayoutConfig::default()
        };
        assert!(matches!(
            compute_layout(&spec(100.0, 50.0, 80.0, true), &negative_gap),
            Err(LabelError::InvalidConfig(_))
        ));
    }
}
