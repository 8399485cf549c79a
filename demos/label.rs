use clap::{Parser, ValueEnum};
use label_gen::layout::LayoutConfig;
use label_gen::render::OutputFormat;
use label_gen::sheet::{self, Orientation, SheetOrientation};
use label_gen::{Colour, Font, Label, LabelGenerator, LabelSettings, OverflowPolicy, Symbology};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Default log level when RUST_LOG is not set
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Png,
    Svg,
    Pdf,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Png => OutputFormat::Png,
            Format::Svg => OutputFormat::Svg,
            Format::Pdf => OutputFormat::Pdf,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Code {
    /// QR code
    Qr,
    /// Code 128 barcode
    Code128,
}

impl From<Code> for Symbology {
    fn from(code: Code) -> Self {
        match code {
            Code::Qr => Symbology::Qr,
            Code::Code128 => Symbology::Code128,
        }
    }
}

#[derive(Parser)]
#[command(name = "label")]
#[command(about = "Render a single QR code or barcode label")]
struct Cli {
    /// Text or URL to encode
    content: String,

    /// Caption printed under the code
    #[arg(default_value = "")]
    caption: String,

    #[arg(short, long, value_enum, default_value = "png")]
    format: Format,

    #[arg(short = 'c', long, value_enum, default_value = "qr")]
    code: Code,

    /// Sheet format: label-small, label-medium, a6, a5, a4, or letter
    #[arg(short, long, default_value = "label-medium")]
    sheet: String,

    /// Print the sheet wide instead of tall
    #[arg(long)]
    landscape: bool,

    /// Code size as a percentage of the space available for it
    #[arg(long, default_value_t = 80.0)]
    scale: f32,

    /// TrueType or OpenType font for the caption
    #[arg(long)]
    font: Option<PathBuf>,

    /// TOML file overriding the layout ratios
    #[arg(long)]
    config: Option<PathBuf>,

    /// Drop the caption instead of failing when it leaves no room for the code
    #[arg(long)]
    drop_caption: bool,

    /// Code colour as #rrggbb
    #[arg(long)]
    foreground: Option<String>,

    /// Raster resolution in dots per inch
    #[arg(long, default_value_t = 300.0)]
    dpi: f32,

    /// Output file; defaults to label.<format>
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level when RUST_LOG is not set
    #[arg(short = 'L', long, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let base = sheet::by_name(&cli.sheet).ok_or_else(|| format!("unknown sheet '{}'", cli.sheet))?;
    let orientation = if cli.landscape {
        Orientation::Landscape
    } else {
        Orientation::Portrait
    };

    let mut settings = LabelSettings {
        sheet: base.oriented(orientation),
        scale_percent: cli.scale,
        symbology: cli.code.into(),
        overflow: if cli.drop_caption {
            OverflowPolicy::DropCaption
        } else {
            OverflowPolicy::Fail
        },
        ..LabelSettings::default()
    };
    settings.style.dpi = cli.dpi;
    if let Some(hex) = &cli.foreground {
        settings.style.foreground =
            Colour::from_hex(hex).ok_or_else(|| format!("invalid colour '{hex}'"))?;
    }
    if let Some(path) = &cli.config {
        settings.layout = LayoutConfig::from_toml_str(&std::fs::read_to_string(path)?)?;
    }

    let mut generator = LabelGenerator::new(settings);
    if let Some(path) = &cli.font {
        generator = generator.with_font(Font::load_from_disk(path)?);
    }

    let format = OutputFormat::from(cli.format);
    let bytes = generator.render(&Label::new(&cli.content, &cli.caption), format)?;

    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(format!("label.{}", format.extension())));
    std::fs::write(&output, bytes)?;
    tracing::info!(path = %output.display(), "wrote label");
    Ok(())
}
