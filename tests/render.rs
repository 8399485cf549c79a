use label_gen::layout::{compute_layout, LayoutConfig, SheetSpec, TextMeasurer};
use label_gen::render::{render_svg, OutputFormat};
use label_gen::sheet::{self, oriented_dims, Orientation, SheetOrientation};
use label_gen::{compose, Label, LabelError, LabelGenerator, LabelSettings, OverflowPolicy, Pt, Symbology};

/// Fixed-advance stand-in for a font: every character is 0.6 em wide
struct Monospace;

impl TextMeasurer for Monospace {
    fn text_width(&self, text: &str, size: Pt) -> Pt {
        size * 0.6 * text.chars().count() as f32
    }
}

fn close(a: Pt, b: f32) -> bool {
    (*a - b).abs() < 1e-3
}

#[test]
fn medium_label_at_default_scale() {
    let plan = SheetSpec::new((Pt(100.0), Pt(50.0)), 80.0, true).layout().unwrap();
    assert!(close(plan.code_side, 26.0));
    assert!(close(plan.caption_font_size, 6.0));
    assert!(close(plan.code_offset_x, 37.0));
    assert!(close(plan.code_offset_y, 8.85));
    assert!(close(plan.caption_baseline_y, 41.15));
}

#[test]
fn orientation_only_swaps_the_sides() {
    let (w, h) = oriented_dims(Pt(100.0), Pt(50.0), false);
    assert_eq!((w, h), (Pt(50.0), Pt(100.0)));
    let (w, h) = oriented_dims(Pt(50.0), Pt(100.0), true);
    assert_eq!((w, h), (Pt(100.0), Pt(50.0)));

    let a4 = sheet::by_name("A4").unwrap();
    assert_eq!(a4.oriented(Orientation::Landscape), a4.landscape());
    assert_eq!(a4.landscape().portrait(), a4);
}

#[test]
fn every_named_sheet_lays_out_a_captioned_code() {
    for (name, size) in sheet::FORMATS {
        for size in [size.portrait(), size.landscape()] {
            let plan = compute_layout(&SheetSpec::new(size, 80.0, true), &LayoutConfig::default())
                .unwrap_or_else(|e| panic!("{name}: {e}"));
            assert!(*plan.code_side > 0.0, "{name}");
            assert!(*plan.code_offset_y + *plan.block_height <= *size.1 + 1e-3, "{name}");
        }
    }
}

#[test]
fn captions_never_outgrow_the_code() {
    let settings = LabelSettings {
        sheet: sheet::LABEL_SMALL,
        ..LabelSettings::default()
    };
    for caption in ["A", "PRODOTTO ALPHA", "a caption far too long to fit under any code at all"] {
        let composition = compose(&Label::new("123456789", caption), &settings, Some(&Monospace)).unwrap();
        let placed = composition.caption.unwrap();
        assert!(*placed.width <= *composition.plan.code_side + 1e-3, "{caption}");
        assert!(*placed.size <= *composition.plan.caption_font_size + 1e-6, "{caption}");
        // centred on the sheet
        let right = *settings.sheet.0 - (*placed.x + *placed.width);
        assert!((right - *placed.x).abs() < 1e-3, "{caption}");
    }
}

#[test]
fn tiny_sheets_overflow_or_drop_the_caption() {
    let mut settings = LabelSettings {
        sheet: (Pt(40.0), Pt(10.0)),
        ..LabelSettings::default()
    };
    settings.layout.font_height_ratio = 0.9;
    let label = Label::new("123456789", "caption");

    match compose(&label, &settings, Some(&Monospace)) {
        Err(LabelError::LayoutOverflow { available, reserved }) => assert!(reserved > available),
        other => panic!("expected an overflow, got {other:?}"),
    }

    settings.overflow = OverflowPolicy::DropCaption;
    let composition = compose(&label, &settings, Some(&Monospace)).unwrap();
    assert!(composition.caption.is_none());
    assert!(*composition.plan.code_side > 0.0);
}

#[test]
fn invalid_sheets_are_rejected_before_encoding() {
    let generator = LabelGenerator::new(LabelSettings {
        sheet: (Pt(0.0), Pt(50.0)),
        ..LabelSettings::default()
    });
    assert!(matches!(
        generator.render(&Label::new("123456789", ""), OutputFormat::Png),
        Err(LabelError::InvalidDimension { .. })
    ));
}

#[test]
fn every_format_renders_a_bare_code() {
    let generator = LabelGenerator::new(LabelSettings {
        sheet: sheet::LABEL_SMALL,
        symbology: Symbology::Code128,
        ..LabelSettings::default()
    });
    let label = Label::new("ABC-123", "");

    let png = generator.render(&label, OutputFormat::Png).unwrap();
    assert!(png.starts_with(b"\x89PNG"));
    let svg = generator.render(&label, OutputFormat::Svg).unwrap();
    assert!(svg.starts_with(b"<svg"));
    let pdf = generator.render(&label, OutputFormat::Pdf).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
}

#[test]
fn png_resolution_follows_the_style() {
    let mut settings = LabelSettings {
        sheet: (Pt(72.0), Pt(36.0)),
        ..LabelSettings::default()
    };
    settings.style.dpi = 144.0;
    let png = LabelGenerator::new(settings)
        .render(&Label::new("123456789", ""), OutputFormat::Png)
        .unwrap();
    let img = image::load_from_memory(&png).unwrap();
    assert_eq!((img.width(), img.height()), (144, 72));
}

#[test]
fn svg_caption_uses_the_measured_layout() {
    let settings = LabelSettings {
        sheet: (Pt(100.0), Pt(50.0)),
        ..LabelSettings::default()
    };
    let composition = compose(&Label::new("123456789", "ABC"), &settings, Some(&Monospace)).unwrap();
    let svg = String::from_utf8(render_svg(&composition, &settings.style, "DejaVu Sans").unwrap()).unwrap();
    assert!(svg.contains(">ABC</text>"));
    assert!(svg.contains(r#"font-size="6""#));
}

#[test]
fn toml_configuration_changes_the_layout() {
    let config = LayoutConfig::from_toml_str("margin_ratio = 0.05\ngap_ratio = 0.0\n").unwrap();
    let default = SheetSpec::new((Pt(100.0), Pt(50.0)), 100.0, true).layout().unwrap();
    let tuned = compute_layout(&SheetSpec::new((Pt(100.0), Pt(50.0)), 100.0, true), &config).unwrap();
    assert!(tuned.code_side > default.code_side);
    assert_eq!(tuned.gap, Pt::ZERO);

    assert!(matches!(
        LayoutConfig::from_toml_str("margin_ratio = 0.3"),
        Err(LabelError::InvalidConfig(_))
    ));
    assert!(matches!(
        LayoutConfig::from_toml_str("unknown = 1"),
        Err(LabelError::Config(_))
    ));
}
