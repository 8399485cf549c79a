use crate::document::Document;
use crate::font::Font;
use crate::info::Info;
use crate::label::{Composition, LabelStyle};
use crate::page::Page;
use crate::LabelError;

/// Render a composition as a single-page PDF whose page is exactly the sheet.
///
/// The caption (if any) is drawn with `font`, which is embedded in the document.
pub fn render_pdf(
    composition: &Composition,
    style: &LabelStyle,
    font: Option<&Font>,
    info: Option<Info>,
) -> Result<Vec<u8>, LabelError> {
    let mut doc = Document::new(font);
    if let Some(info) = info {
        doc.set_info(info);
    }
    doc.add_page(Page::from_composition(composition, style));

    let mut out = Vec::new();
    doc.write(&mut out)?;
    Ok(out)
}
