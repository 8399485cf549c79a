use crate::colour::Colour;
use crate::content::render_contents;
use crate::font::{Font, PDF_FONT_NAME};
use crate::label::{Composition, LabelStyle};
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::sheet::SheetSize;
use crate::symbol::Symbol;
use crate::units::*;
use crate::LabelError;
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Name, Pdf, Ref};

/// A single line of caption text, positioned by its baseline in page space
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub size: Pt,
    pub colour: Colour,
    pub coords: (Pt, Pt),
}

/// A symbol scaled into a rectangle of the page
#[derive(Clone, PartialEq, Debug)]
pub struct SymbolLayout {
    pub symbol: Symbol,
    pub position: Rect,
    pub colour: Colour,
}

#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    /// Fill the whole page
    Background(Colour),
    Symbol(SymbolLayout),
    Text(SpanLayout),
}

/// One sheet of a label document
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content can live, i.e. within the safety margin
    pub content_box: Rect,
    /// What is drawn on the page, in painting order
    pub contents: Vec<PageContents>,
}

impl Page {
    pub fn new(size: SheetSize, margin: Pt) -> Page {
        let media_box = Rect::sheet(size.0, size.1);
        Page {
            media_box,
            content_box: media_box.inset(margin),
            contents: Vec::default(),
        }
    }

    /// Build the page for a composed label: background, symbol, and caption
    pub fn from_composition(composition: &Composition, style: &LabelStyle) -> Page {
        let (_, sheet_height) = composition.sheet;
        let plan = &composition.plan;

        let mut page = Page::new(composition.sheet, plan.margin);
        page.add_background(style.background);
        page.add_symbol(SymbolLayout {
            symbol: composition.symbol.clone(),
            position: Rect::from_top_left(
                plan.code_offset_x,
                plan.code_offset_y,
                plan.code_side,
                plan.code_side,
                sheet_height,
            ),
            colour: style.foreground,
        });
        if let Some(caption) = &composition.caption {
            page.add_span(SpanLayout {
                text: caption.text.clone(),
                size: caption.size,
                colour: style.foreground,
                coords: (caption.x, sheet_height - caption.baseline),
            });
        }
        page
    }

    pub fn add_background(&mut self, colour: Colour) {
        self.contents.push(PageContents::Background(colour));
    }

    pub fn add_symbol(&mut self, symbol: SymbolLayout) {
        self.contents.push(PageContents::Symbol(symbol));
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        self.contents.push(PageContents::Text(span));
    }

    /// All text drawn on the page, used to decide which glyphs the font must describe
    pub(crate) fn text(&self) -> impl Iterator<Item = &str> {
        self.contents.iter().filter_map(|c| match c {
            PageContents::Text(span) => Some(span.text.as_str()),
            _ => None,
        })
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        (id, parent): (Ref, Ref),
        font: Option<&Font>,
        writer: &mut Pdf,
    ) -> Result<(), LabelError> {
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.art_box(self.content_box.into());
        page.parent(parent);
        page.contents(content_id);

        let mut resources = page.resources();
        if let Some(font_ref) = font.and_then(|_| refs.get(RefType::Font)) {
            resources.fonts().pair(Name(PDF_FONT_NAME), font_ref);
        }
        resources.finish();
        page.finish();

        let rendered = render_contents(&self.contents, &self.media_box, font)?;
        let compressed = compress_to_vec_zlib(&rendered, CompressionLevel::DefaultLevel as u8);
        writer
            .stream(content_id, compressed.as_slice())
            .filter(Filter::FlateDecode);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::{compose, Label, LabelSettings};

    #[test]
    fn composition_becomes_background_then_symbol() {
        let settings = LabelSettings {
            sheet: (Pt(100.0), Pt(50.0)),
            ..LabelSettings::default()
        };
        let composition = compose(&Label::new("123456789", ""), &settings, None).unwrap();
        let page = Page::from_composition(&composition, &settings.style);

        assert_eq!(page.contents.len(), 2);
        assert!(matches!(page.contents[0], PageContents::Background(_)));
        match &page.contents[1] {
            PageContents::Symbol(layout) => {
                assert!((*layout.position.width() - *composition.plan.code_side).abs() < 1e-4);
                assert!((*layout.position.y2 - (50.0 - *composition.plan.code_offset_y)).abs() < 1e-4);
            }
            other => panic!("expected a symbol, got {other:?}"),
        }
        assert_eq!(page.content_box.x1, composition.plan.margin);
        assert_eq!(page.text().count(), 0);
    }
}
