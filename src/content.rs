//! Rendering page contents into PDF content streams.

use crate::font::{Font, PDF_FONT_NAME};
use crate::page::{PageContents, SpanLayout, SymbolLayout};
use crate::rect::Rect;
use crate::transform::Transform;
use crate::LabelError;
use pdf_writer::{Content, Name, Str};

/// Renders page contents to an (uncompressed) PDF content stream.
///
/// Symbols are vector rectangles, one per horizontal run of dark modules. Text is
/// drawn with the embedded caption font, so pages with text need `font`.
pub(crate) fn render_contents(
    contents: &[PageContents],
    media_box: &Rect,
    font: Option<&Font>,
) -> Result<Vec<u8>, LabelError> {
    let mut content = Content::new();

    for item in contents.iter() {
        match item {
            PageContents::Background(colour) => {
                content.save_state();
                colour.apply_fill(&mut content);
                content.rect(
                    *media_box.x1,
                    *media_box.y1,
                    *media_box.width(),
                    *media_box.height(),
                );
                content.fill_nonzero();
                content.restore_state();
            }
            PageContents::Symbol(layout) => render_symbol(&mut content, layout),
            PageContents::Text(span) => {
                let font = font.ok_or(LabelError::MissingFont)?;
                render_span(&mut content, span, font);
            }
        }
    }

    Ok(content.finish().to_vec())
}

fn render_symbol(content: &mut Content, layout: &SymbolLayout) {
    let SymbolLayout {
        symbol,
        position,
        colour,
    } = layout;

    content.save_state();
    Transform::grid_to_rect(symbol.columns, symbol.rows, position).write_to_content(content);
    colour.apply_fill(content);
    for (row, column, length) in symbol.dark_runs() {
        content.rect(column as f32, row as f32, length as f32, 1.0);
    }
    content.fill_nonzero();
    content.restore_state();
}

fn render_span(content: &mut Content, span: &SpanLayout, font: &Font) {
    let glyphs: Vec<u8> = span
        .text
        .chars()
        .flat_map(|ch| font.glyph_id_or_replacement(ch).to_be_bytes())
        .collect();

    content.save_state();
    span.colour.apply_fill(content);
    content.begin_text();
    content.set_font(Name(PDF_FONT_NAME), *span.size);
    content.next_line(*span.coords.0, *span.coords.1);
    content.show(Str(&glyphs));
    content.end_text();
    content.restore_state();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;
    use crate::symbol::{Symbol, Symbology};
    use crate::units::Pt;

    fn sheet() -> Rect {
        Rect::sheet(Pt(100.0), Pt(50.0))
    }

    fn contains(haystack: &[u8], needle: &str) -> bool {
        haystack
            .windows(needle.len())
            .any(|window| window == needle.as_bytes())
    }

    #[test]
    fn symbol_is_drawn_as_filled_rectangles() {
        let symbol = Symbol::generate(Symbology::Qr, "123456789").unwrap();
        let runs = symbol.dark_runs().len();
        let contents = vec![PageContents::Symbol(SymbolLayout {
            symbol,
            position: Rect::from_top_left(Pt(37.0), Pt(8.85), Pt(26.0), Pt(26.0), Pt(50.0)),
            colour: colours::BLACK,
        })];

        let rendered = render_contents(&contents, &sheet(), None).unwrap();
        let text = String::from_utf8(rendered).unwrap();
        assert_eq!(text.matches(" re").count(), runs);
        assert!(text.contains(" cm"));
        assert!(text.contains("\nf"));
    }

    #[test]
    fn text_without_a_font_is_an_error() {
        let contents = vec![PageContents::Text(SpanLayout {
            text: "caption".into(),
            size: Pt(6.0),
            colour: colours::BLACK,
            coords: (Pt(10.0), Pt(10.0)),
        })];
        assert!(matches!(
            render_contents(&contents, &sheet(), None),
            Err(LabelError::MissingFont)
        ));
    }

    #[test]
    fn background_fills_before_drawing() {
        let contents = vec![PageContents::Background(colours::WHITE)];
        let rendered = render_contents(&contents, &sheet(), None).unwrap();
        assert!(contains(&rendered, "1 g"));
        assert!(contains(&rendered, "0 0 100 50 re"));
    }
}
