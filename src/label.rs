//! Turning one label row into everything a renderer needs.
//!
//! A [`Label`] is the content to encode and the caption to print under it.
//! [`LabelSettings`] is everything shared between rows: the sheet, the scale, the
//! symbology, and the style. [`compose`] combines the two with a
//! [`TextMeasurer`] into a [`Composition`]: the layout plan, the encoded symbol,
//! and the caption with its fitted size and position.

use crate::colour::{colours, Colour};
use crate::layout::{compute_layout, fit_font_size, LayoutConfig, LayoutPlan, SheetSpec, TextMeasurer};
use crate::sheet::{SheetSize, LABEL_MEDIUM};
use crate::symbol::{Symbol, Symbology};
use crate::units::Pt;
use crate::LabelError;
use tracing::{debug, warn};

/// One row of input: what to encode and what to print underneath
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Label {
    pub content: String,
    pub caption: String,
}

impl Label {
    pub fn new<C: ToString, T: ToString>(content: C, caption: T) -> Label {
        Label {
            content: content.to_string(),
            caption: caption.to_string(),
        }
    }

    /// The caption to print, if there is anything to print
    pub fn caption_text(&self) -> Option<&str> {
        let caption = self.caption.trim();
        (!caption.is_empty()).then_some(caption)
    }
}

/// What to do when the caption does not leave enough room for the code
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Return [`LabelError::LayoutOverflow`]
    #[default]
    Fail,
    /// Lay the code out alone, without its caption
    DropCaption,
}

/// Colours and resolution for the rendered label
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LabelStyle {
    pub foreground: Colour,
    pub background: Colour,
    /// Resolution of raster output, in dots per inch
    pub dpi: f32,
}

impl Default for LabelStyle {
    fn default() -> Self {
        LabelStyle {
            foreground: colours::BLACK,
            background: colours::WHITE,
            dpi: 300.0,
        }
    }
}

/// Settings shared by every label in a run
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSettings {
    /// Oriented sheet size
    pub sheet: SheetSize,
    /// Code size as a percentage of the space available for it
    pub scale_percent: f32,
    pub symbology: Symbology,
    pub layout: LayoutConfig,
    pub overflow: OverflowPolicy,
    pub style: LabelStyle,
}

impl Default for LabelSettings {
    fn default() -> Self {
        LabelSettings {
            sheet: LABEL_MEDIUM,
            scale_percent: crate::layout::DEFAULT_SCALE_PERCENT,
            symbology: Symbology::default(),
            layout: LayoutConfig::default(),
            overflow: OverflowPolicy::default(),
            style: LabelStyle::default(),
        }
    }
}

/// A caption with its final size and position. `x` is the left edge of the text and
/// `baseline` its baseline, both measured from the top-left of the sheet
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedCaption {
    pub text: String,
    pub size: Pt,
    pub x: Pt,
    pub baseline: Pt,
    pub width: Pt,
}

/// A fully laid out label, ready to hand to a renderer
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub sheet: SheetSize,
    pub plan: LayoutPlan,
    pub symbol: Symbol,
    pub caption: Option<PlacedCaption>,
}

/// Lay out `label` on the configured sheet and encode its symbol.
///
/// The caption is shrunk to be no wider than the code and centred on the sheet. A
/// caption is only measured when present, so `measurer` may be `None` for labels
/// without one; a captioned label without a measurer fails with
/// [`LabelError::MissingFont`].
pub fn compose(
    label: &Label,
    settings: &LabelSettings,
    measurer: Option<&dyn TextMeasurer>,
) -> Result<Composition, LabelError> {
    let caption = label.caption_text();
    let measurer = match (caption, measurer) {
        (Some(_), None) => return Err(LabelError::MissingFont),
        (_, measurer) => measurer,
    };

    let spec = SheetSpec::new(settings.sheet, settings.scale_percent, caption.is_some());
    let (plan, caption) = match compute_layout(&spec, &settings.layout) {
        Ok(plan) => (plan, caption),
        Err(LabelError::LayoutOverflow { available, reserved })
            if settings.overflow == OverflowPolicy::DropCaption =>
        {
            warn!(
                available = *available,
                reserved = *reserved,
                "caption does not fit on the sheet, dropping it"
            );
            let spec = SheetSpec {
                has_caption: false,
                ..spec
            };
            (compute_layout(&spec, &settings.layout)?, None)
        }
        Err(e) => return Err(e),
    };

    let symbol = Symbol::generate(settings.symbology, &label.content)?;

    let caption = match (caption, measurer) {
        (Some(text), Some(measurer)) => {
            let size = fit_font_size(measurer, text, plan.caption_font_size, plan.code_side);
            let width = measurer.text_width(text, size);
            Some(PlacedCaption {
                text: text.to_string(),
                size,
                x: (settings.sheet.0 - width) / 2.0,
                baseline: plan.caption_baseline_y,
                width,
            })
        }
        _ => None,
    };

    debug!(
        code_side = *plan.code_side,
        caption_size = caption.as_ref().map(|c| *c.size),
        "composed label"
    );

    Ok(Composition {
        sheet: settings.sheet,
        plan,
        symbol,
        caption,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every character is exactly as wide as the font size
    struct Square;

    impl TextMeasurer for Square {
        fn text_width(&self, text: &str, size: Pt) -> Pt {
            size * text.chars().count() as f32
        }
    }

    fn settings(width: f32, height: f32) -> LabelSettings {
        LabelSettings {
            sheet: (Pt(width), Pt(height)),
            ..LabelSettings::default()
        }
    }

    #[test]
    fn caption_is_centred_under_the_code() {
        let label = Label::new("123456789", "ABC");
        let composition = compose(&label, &settings(100.0, 50.0), Some(&Square)).unwrap();
        let caption = composition.caption.unwrap();
        // 3 characters at 6pt is 18pt wide, narrower than the 26pt code
        assert_eq!(caption.size, composition.plan.caption_font_size);
        assert!((*caption.width - 18.0).abs() < 1e-3);
        assert!((*caption.x - 41.0).abs() < 1e-3);
        assert_eq!(caption.baseline, composition.plan.caption_baseline_y);
    }

    #[test]
    fn long_caption_is_shrunk_to_the_code_width() {
        let label = Label::new("123456789", "PRODOTTO ALPHA");
        let composition = compose(&label, &settings(100.0, 50.0), Some(&Square)).unwrap();
        let caption = composition.caption.unwrap();
        assert!(caption.size < composition.plan.caption_font_size);
        assert!((*caption.width - *composition.plan.code_side).abs() < 1e-3);
        assert!((*caption.x - *composition.plan.code_offset_x).abs() < 1e-3);
    }

    #[test]
    fn blank_caption_lays_out_the_code_alone() {
        let label = Label::new("123456789", "   ");
        let composition = compose(&label, &settings(100.0, 50.0), None).unwrap();
        assert!(composition.caption.is_none());
        assert_eq!(composition.plan.gap, Pt::ZERO);
    }

    #[test]
    fn captions_need_a_measurer() {
        let label = Label::new("123456789", "caption");
        assert!(matches!(
            compose(&label, &settings(100.0, 50.0), None),
            Err(LabelError::MissingFont)
        ));
    }

    #[test]
    fn overflow_follows_the_policy() {
        let label = Label::new("123456789", "caption");
        let mut settings = settings(30.0, 20.0);
        settings.layout.font_height_ratio = 0.9;

        assert!(matches!(
            compose(&label, &settings, Some(&Square)),
            Err(LabelError::LayoutOverflow { .. })
        ));

        settings.overflow = OverflowPolicy::DropCaption;
        let composition = compose(&label, &settings, Some(&Square)).unwrap();
        assert!(composition.caption.is_none());
        assert_eq!(composition.plan.caption_font_size, Pt::ZERO);
    }

    #[test]
    fn invalid_configuration_is_reported() {
        let label = Label::new("123456789", "");
        let mut settings = settings(100.0, 50.0);
        settings.layout.margin_ratio = 0.4;
        assert!(matches!(
            compose(&label, &settings, None),
            Err(LabelError::InvalidConfig(_))
        ));
    }
}
