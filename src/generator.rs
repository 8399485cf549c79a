use crate::document::Document;
use crate::font::Font;
use crate::info::Info;
use crate::label::{compose, Composition, Label, LabelSettings};
use crate::layout::TextMeasurer;
use crate::page::Page;
use crate::render::{render_pdf, render_png, render_svg, OutputFormat};
use crate::LabelError;
use rayon::prelude::*;
use tracing::{debug, warn};

/// Family used for SVG captions when the loaded font has no name, or no font is loaded
const FALLBACK_FONT_FAMILY: &str = "sans-serif";

/// Renders labels that share one set of [`LabelSettings`] and one caption font.
///
/// The generator holds no per-label state, so a single instance can render any number
/// of labels, from any number of threads.
pub struct LabelGenerator {
    settings: LabelSettings,
    font: Option<Font>,
}

impl LabelGenerator {
    pub fn new(settings: LabelSettings) -> LabelGenerator {
        LabelGenerator {
            settings,
            font: None,
        }
    }

    /// Use `font` to measure and draw captions. Without a font, only labels without
    /// captions can be rendered
    pub fn with_font(mut self, font: Font) -> LabelGenerator {
        self.font = Some(font);
        self
    }

    pub fn settings(&self) -> &LabelSettings {
        &self.settings
    }

    pub fn font(&self) -> Option<&Font> {
        self.font.as_ref()
    }

    /// Lay out a label and encode its symbol, without drawing anything
    pub fn compose(&self, label: &Label) -> Result<Composition, LabelError> {
        let measurer = self.font.as_ref().map(|font| font as &dyn TextMeasurer);
        compose(label, &self.settings, measurer)
    }

    /// Render a single label to the given format
    pub fn render(&self, label: &Label, format: OutputFormat) -> Result<Vec<u8>, LabelError> {
        let composition = self.compose(label)?;
        let style = &self.settings.style;
        match format {
            OutputFormat::Png => render_png(&composition, style, self.font()),
            OutputFormat::Svg => {
                let family = self
                    .font()
                    .and_then(Font::family)
                    .unwrap_or_else(|| FALLBACK_FONT_FAMILY.to_string());
                render_svg(&composition, style, &family)
            }
            OutputFormat::Pdf => {
                render_pdf(&composition, style, self.font(), Some(Info::for_label(label)))
            }
        }
    }

    /// Render every label independently and in parallel. The results are in the same
    /// order as `labels`, and a failing row does not affect the others
    pub fn render_batch(
        &self,
        labels: &[Label],
        format: OutputFormat,
    ) -> Vec<Result<Vec<u8>, LabelError>> {
        let results: Vec<_> = labels
            .par_iter()
            .map(|label| self.render(label, format))
            .collect();

        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            warn!(failed, total = labels.len(), "some labels could not be rendered");
        }
        debug!(total = labels.len(), format = format.extension(), "rendered batch");
        results
    }

    /// Render every label as one page of a single PDF, in order. Any failing label fails
    /// the whole document
    pub fn render_pdf_sheets(&self, labels: &[Label]) -> Result<Vec<u8>, LabelError> {
        let compositions = labels
            .par_iter()
            .map(|label| self.compose(label))
            .collect::<Result<Vec<_>, _>>()?;

        let mut doc = Document::new(self.font());
        let mut info = Info::new();
        info.title(format!("{} labels", labels.len()));
        doc.set_info(info);
        for composition in compositions.iter() {
            doc.add_page(Page::from_composition(composition, &self.settings.style));
        }

        let mut out = Vec::new();
        doc.write(&mut out)?;
        Ok(out)
    }
}
