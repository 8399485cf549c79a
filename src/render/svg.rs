use crate::label::{Composition, LabelStyle};
use crate::units::{Mm, Pt};
use crate::LabelError;
use tracing::debug;

/// Format a coordinate with at most three decimals and no trailing zeros
fn num(value: f32) -> String {
    let text = format!("{value:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" | "" => "0".to_string(),
        text => text.to_string(),
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            ch => out.push(ch),
        }
    }
    out
}

/// Render a composition as an SVG document.
///
/// The document's `width` and `height` are the physical sheet size in millimetres and
/// its `viewBox` is in points, so every layout figure is written unchanged. Dark modules
/// are merged into a single path. The caption is written as text in `font_family`; the
/// viewer supplies the glyphs, so the rendered width may differ slightly from the
/// measured one.
pub fn render_svg(
    composition: &Composition,
    style: &LabelStyle,
    font_family: &str,
) -> Result<Vec<u8>, LabelError> {
    let (sheet_w, sheet_h) = composition.sheet;
    let plan = &composition.plan;
    let symbol = &composition.symbol;

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}mm" height="{}mm" viewBox="0 0 {} {}">"#,
        num(*Mm::from(sheet_w)),
        num(*Mm::from(sheet_h)),
        num(*sheet_w),
        num(*sheet_h),
    ));
    svg.push_str(&format!(
        r#"<rect width="100%" height="100%" fill="{}"/>"#,
        style.background.to_svg()
    ));

    let module_w: Pt = plan.code_side / symbol.columns.max(1) as f32;
    let module_h: Pt = plan.code_side / symbol.rows.max(1) as f32;
    let mut path = String::new();
    for (row, column, length) in symbol.dark_runs() {
        let x = plan.code_offset_x + module_w * column as f32;
        let y = plan.code_offset_y + module_h * row as f32;
        let w = module_w * length as f32;
        path.push_str(&format!(
            "M{} {}h{}v{}h-{}z",
            num(*x),
            num(*y),
            num(*w),
            num(*module_h),
            num(*w)
        ));
    }
    if !path.is_empty() {
        svg.push_str(&format!(
            r#"<path fill="{}" shape-rendering="crispEdges" d="{}"/>"#,
            style.foreground.to_svg(),
            path
        ));
    }

    if let Some(caption) = &composition.caption {
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" font-family="{}" font-size="{}" fill="{}">{}</text>"#,
            num(*caption.x),
            num(*caption.baseline),
            escape_xml(font_family),
            num(*caption.size),
            style.foreground.to_svg(),
            escape_xml(&caption.text)
        ));
    }
    svg.push_str("</svg>\n");

    debug!(bytes = svg.len(), "rendered svg label");
    Ok(svg.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::{compose, Label, LabelSettings};
    use crate::layout::TextMeasurer;
    use crate::Colour;

    struct Half;

    impl TextMeasurer for Half {
        fn text_width(&self, text: &str, size: Pt) -> Pt {
            size * 0.5 * text.chars().count() as f32
        }
    }

    fn settings() -> LabelSettings {
        LabelSettings {
            sheet: (Pt(100.0), Pt(50.0)),
            ..LabelSettings::default()
        }
    }

    #[test]
    fn numbers_are_compact() {
        assert_eq!(num(26.0), "26");
        assert_eq!(num(8.85), "8.85");
        assert_eq!(num(1.0 / 3.0), "0.333");
        assert_eq!(num(-0.0001), "0");
    }

    #[test]
    fn document_is_sized_in_millimetres() {
        let settings = settings();
        let composition = compose(&Label::new("123456789", ""), &settings, None).unwrap();
        let svg = String::from_utf8(render_svg(&composition, &settings.style, "sans-serif").unwrap()).unwrap();

        assert!(svg.starts_with("<svg "));
        assert!(svg.contains(r#"width="35.278mm""#));
        assert!(svg.contains(r#"height="17.639mm""#));
        assert!(svg.contains(r#"viewBox="0 0 100 50""#));
        assert!(svg.contains(r##"fill="#000000""##));
        assert!(!svg.contains("<text"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn caption_is_escaped_and_placed_on_the_baseline() {
        let settings = settings();
        let label = Label::new("123456789", "Fish & <Chips>");
        let composition = compose(&label, &settings, Some(&Half)).unwrap();
        let svg = String::from_utf8(render_svg(&composition, &settings.style, "Noto Sans").unwrap()).unwrap();

        assert!(svg.contains("Fish &amp; &lt;Chips&gt;"));
        assert!(svg.contains(r#"font-family="Noto Sans""#));
        let baseline = num(*composition.plan.caption_baseline_y);
        assert!(svg.contains(&format!(r#"y="{baseline}""#)));
    }

    #[test]
    fn colours_follow_the_style() {
        let mut settings = settings();
        settings.style.foreground = Colour::new_rgb_bytes(0x0f, 0x17, 0x2a);
        let composition = compose(&Label::new("ABC-123", ""), &settings, None).unwrap();
        let svg = String::from_utf8(render_svg(&composition, &settings.style, "sans-serif").unwrap()).unwrap();
        assert!(svg.contains(r##"<path fill="#0f172a""##));
        assert!(svg.contains(r##"<rect width="100%" height="100%" fill="#ffffff"/>"##));
    }
}
