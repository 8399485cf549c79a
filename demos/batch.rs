use label_gen::sheet::{Orientation, SheetOrientation, LABEL_MEDIUM};
use label_gen::{Font, Label, LabelGenerator, LabelSettings, OverflowPolicy};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // content and caption, one label per row
    let rows = [
        ("https://example.com/products/1", "PRODOTTO ALPHA"),
        ("https://example.com/products/2", "PRODOTTO BETA"),
        ("https://example.com/products/3", "A much longer caption that has to shrink"),
        ("SKU-0004", ""),
    ];

    let settings = LabelSettings {
        sheet: LABEL_MEDIUM.oriented(Orientation::Landscape),
        overflow: OverflowPolicy::DropCaption,
        ..LabelSettings::default()
    };
    let mut generator = LabelGenerator::new(settings);

    // captions need a font; pass one as the first argument, otherwise they are left out
    let labels: Vec<Label> = match std::env::args().nth(1) {
        Some(path) => {
            generator = generator.with_font(Font::load_from_disk(path)?);
            rows.iter().map(|(content, caption)| Label::new(content, caption)).collect()
        }
        None => rows.iter().map(|(content, _)| Label::new(content, "")).collect(),
    };

    let pdf = generator.render_pdf_sheets(&labels)?;
    std::fs::write("labels.pdf", pdf)?;
    tracing::info!(labels = labels.len(), "wrote labels.pdf");
    Ok(())
}
