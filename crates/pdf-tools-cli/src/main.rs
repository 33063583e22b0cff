use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use pdf_stamp::{
    AverageCharWidth, Color, DocumentInfo, NormalizedPoint, PageSize, PositionMode, StampField,
    StampImage, StampJob, StampParameters, StampType,
};
use std::path::PathBuf;

mod logger;

#[derive(Parser)]
#[command(name = "pdft", about = "PDF tools CLI", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a page selection such as "1,4-8,2n-1"
    Pages {
        /// Page selection expression
        selection: String,

        /// Number of pages in the document
        #[arg(long)]
        total: u32,

        /// Print the pages as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Plan where a text or image stamp goes on each selected page
    Stamp {
        /// Input PDF file to read page sizes from
        #[arg(short, long, conflicts_with = "pages_count")]
        input: Option<PathBuf>,

        /// Page count, when no input PDF is given
        #[arg(long, required_unless_present_any = ["input"])]
        pages_count: Option<u32>,

        /// Page size, when no input PDF is given
        #[arg(long, default_value = "letter", value_enum)]
        page_size: PaperArg,

        /// Load stamp parameters from a JSON file; flags override it
        #[arg(long)]
        config: Option<PathBuf>,

        /// Save the final stamp parameters to a JSON file
        #[arg(long)]
        save_config: Option<PathBuf>,

        /// Stamp text
        #[arg(short, long, conflicts_with = "image")]
        text: Option<String>,

        /// Stamp image file
        #[arg(long, requires_all = ["image_width", "image_height"])]
        image: Option<PathBuf>,

        /// Native image width in pixels
        #[arg(long)]
        image_width: Option<u32>,

        /// Native image height in pixels
        #[arg(long)]
        image_height: Option<u32>,

        /// Script of the stamp text
        #[arg(long, value_enum)]
        alphabet: Option<AlphabetArg>,

        /// Font size in points (image height for image stamps)
        #[arg(long)]
        font_size: Option<f32>,

        /// Clockwise rotation in degrees
        #[arg(long, allow_hyphen_values = true)]
        rotation: Option<f32>,

        /// Opacity percentage
        #[arg(long)]
        opacity: Option<f32>,

        /// Stamp color as #rrggbb
        #[arg(long)]
        color: Option<Color>,

        /// Quick-grid anchor cell
        #[arg(long, value_enum)]
        anchor: Option<AnchorArg>,

        /// Distance from the page edge for quick-grid anchors
        #[arg(long, value_enum)]
        margin: Option<MarginArg>,

        /// Custom stamp center as "x,y" fractions of the page (image stamps)
        #[arg(long, value_parser = parse_point)]
        position: Option<NormalizedPoint>,

        /// Pages to stamp; all pages when omitted
        #[arg(short, long)]
        pages: Option<String>,

        /// Print the planned job as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

#[derive(Clone, Copy, ValueEnum)]
enum AlphabetArg {
    Roman,
    Arabic,
    Japanese,
    Korean,
    Chinese,
    Thai,
}

#[derive(Clone, Copy, ValueEnum)]
enum AnchorArg {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    Center,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

#[derive(Clone, Copy, ValueEnum)]
enum MarginArg {
    Small,
    Medium,
    Large,
    XLarge,
}

impl From<PaperArg> for PageSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::new(842.0, 1191.0),
            PaperArg::A4 => Self::new(595.0, 842.0),
            PaperArg::A5 => Self::new(420.0, 595.0),
            PaperArg::Letter => Self::new(612.0, 792.0),
            PaperArg::Legal => Self::new(612.0, 1008.0),
            PaperArg::Tabloid => Self::new(792.0, 1224.0),
        }
    }
}

impl From<AlphabetArg> for pdf_stamp::Alphabet {
    fn from(arg: AlphabetArg) -> Self {
        match arg {
            AlphabetArg::Roman => Self::Roman,
            AlphabetArg::Arabic => Self::Arabic,
            AlphabetArg::Japanese => Self::Japanese,
            AlphabetArg::Korean => Self::Korean,
            AlphabetArg::Chinese => Self::Chinese,
            AlphabetArg::Thai => Self::Thai,
        }
    }
}

impl From<AnchorArg> for pdf_stamp::AnchorCell {
    fn from(arg: AnchorArg) -> Self {
        match arg {
            AnchorArg::TopLeft => Self::TopLeft,
            AnchorArg::TopCenter => Self::TopCenter,
            AnchorArg::TopRight => Self::TopRight,
            AnchorArg::MiddleLeft => Self::MiddleLeft,
            AnchorArg::Center => Self::Center,
            AnchorArg::MiddleRight => Self::MiddleRight,
            AnchorArg::BottomLeft => Self::BottomLeft,
            AnchorArg::BottomCenter => Self::BottomCenter,
            AnchorArg::BottomRight => Self::BottomRight,
        }
    }
}

impl From<MarginArg> for pdf_stamp::Margin {
    fn from(arg: MarginArg) -> Self {
        match arg {
            MarginArg::Small => Self::Small,
            MarginArg::Medium => Self::Medium,
            MarginArg::Large => Self::Large,
            MarginArg::XLarge => Self::XLarge,
        }
    }
}

fn parse_point(s: &str) -> std::result::Result<NormalizedPoint, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"x,y\", got {s:?}"))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad x: {e}"))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad y: {e}"))?;
    if !(0.0..=1.0).contains(&x) || !(0.0..=1.0).contains(&y) {
        return Err(format!("{s:?} is outside 0..=1"));
    }
    Ok(NormalizedPoint::new(x, y))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::StderrLogger::from_verbosity(cli.verbose)
        .init()
        .context("Failed to install logger")?;

    match cli.command {
        Commands::Pages {
            selection,
            total,
            json,
        } => {
            let pages = pdf_stamp::select_pages(&selection, total)?;
            if json {
                println!("{}", serde_json::to_string(&pages)?);
            } else {
                println!("{}", join_pages(pages.as_slice()));
                println!("{} of {} pages", pages.len(), total);
            }
        }

        Commands::Stamp {
            input,
            pages_count,
            page_size,
            config,
            save_config,
            text,
            image,
            image_width,
            image_height,
            alphabet,
            font_size,
            rotation,
            opacity,
            color,
            anchor,
            margin,
            position,
            pages,
            json,
        } => {
            let mut params = match &config {
                Some(path) => StampParameters::load(path)
                    .await
                    .with_context(|| format!("Failed to load {}", path.display()))?,
                None => StampParameters::default(),
            };

            let mut fields = Vec::new();
            if let Some(text) = text {
                fields.push(StampField::StampType(StampType::Text));
                fields.push(StampField::StampText(text));
            }
            if let Some(path) = image {
                let (Some(width), Some(height)) = (image_width, image_height) else {
                    bail!("--image needs --image-width and --image-height");
                };
                let data = tokio::fs::read(&path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let filename = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                fields.push(StampField::StampType(StampType::Image));
                fields.push(StampField::StampImage(Some(StampImage::new(
                    filename, data, width, height,
                ))));
            }
            // Alphabet first: switching scripts resets the font size
            fields.extend(alphabet.map(|a| StampField::Alphabet(a.into())));
            fields.extend(font_size.map(StampField::FontSize));
            fields.extend(rotation.map(StampField::Rotation));
            fields.extend(opacity.map(StampField::Opacity));
            fields.extend(color.map(StampField::CustomColor));
            if let Some(anchor) = anchor {
                fields.push(StampField::PositionMode(PositionMode::QuickGrid));
                fields.push(StampField::AnchorCell(anchor.into()));
            }
            fields.extend(margin.map(|m| StampField::Margin(m.into())));
            if let Some(point) = position {
                fields.push(StampField::PositionMode(PositionMode::Custom));
                fields.push(StampField::CustomPoint(point));
            }
            fields.extend(pages.map(StampField::PageSelection));
            params = params.update_fields(fields);

            if let Some(path) = &save_config {
                params.save(path).await?;
                log::info!("Saved stamp parameters to {}", path.display());
            }

            let document = match (&input, pages_count) {
                (Some(path), _) => pdf_stamp::load_document_info(path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                (None, Some(count)) => DocumentInfo::uniform(count, page_size.into()),
                (None, None) => bail!("either --input or --pages-count is required"),
            };

            let job = pdf_stamp::plan(params, &document, &AverageCharWidth)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&job)?);
            } else {
                print_job(&job, document.page_count());
            }
        }
    }

    Ok(())
}

fn join_pages(pages: &[u32]) -> String {
    pages
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_job(job: &StampJob, total_pages: u32) {
    let params = job.parameters();
    match params.stamp_type() {
        StampType::Text => println!(
            "Stamp: text {:?} ({}, {}pt)",
            params.stamp_text(),
            params.alphabet(),
            params.font_size()
        ),
        StampType::Image => println!(
            "Stamp: image {} ({}pt high)",
            params
                .stamp_image()
                .map(|img| img.filename.as_str())
                .unwrap_or_default(),
            params.font_size()
        ),
    }
    println!(
        "  Color: {}, opacity {}%, rotation {}°",
        params.custom_color(),
        params.opacity(),
        params.rotation()
    );
    println!(
        "Pages: {} ({} of {})",
        join_pages(job.pages().as_slice()),
        job.pages().len(),
        total_pages
    );
    for placement in job.placements() {
        let g = &placement.geometry;
        println!(
            "  page {:>4}: x {:.1}, y {:.1}, {:.1} x {:.1} pt",
            placement.page, g.x, g.y, g.width, g.height
        );
    }
}
