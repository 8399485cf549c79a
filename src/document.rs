use crate::{
    font::Font,
    info::Info,
    page::Page,
    refs::{ObjectReferences, RefType},
    LabelError,
};
use pdf_writer::{Finish, Pdf, Ref};
use std::io::Write;
use tracing::debug;

#[derive(Default)]
/// A label document: one or more pages sharing a single caption font, rendered out
/// with a call to [Document::write]
///
/// The font is borrowed, so it must outlive the document. It is only embedded when
/// some page actually draws text.
pub struct Document<'f> {
    pub info: Option<Info>,
    pub pages: Vec<Page>,
    pub font: Option<&'f Font>,
}

impl<'f> Document<'f> {
    pub fn new(font: Option<&'f Font>) -> Document<'f> {
        Document {
            info: None,
            pages: Vec::new(),
            font,
        }
    }

    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a page to the end of the document, returning its index
    pub fn add_page(&mut self, page: Page) -> usize {
        self.pages.push(page);
        self.pages.len() - 1
    }

    /// Write the entire document to the writer. Note: although this can write to arbitrary
    /// streams, the entire document is "rendered" in memory first.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), LabelError> {
        let Document { info, pages, font } = self;

        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = (0..pages.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs.iter().copied());

        // only embed the font when something is drawn with it
        let text: String = pages.iter().flat_map(|page| page.text()).collect();
        let font = font.filter(|_| !text.is_empty());
        if let Some(font) = font {
            font.write(&mut refs, &text, &mut writer);
        }

        for (page_index, page) in pages.iter().enumerate() {
            page.write(
                &mut refs,
                page_index,
                (page_refs[page_index], page_tree_id),
                font,
                &mut writer,
            )?;
        }

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        catalog.finish();

        let bytes = writer.finish();
        debug!(pages = pages.len(), bytes = bytes.len(), "wrote label document");
        w.write_all(bytes.as_slice()).map_err(Into::into)
    }
}
