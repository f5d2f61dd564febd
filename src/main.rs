//! # Candela CLI
//!
//! Renders a print job to an ESC/POS command stream on disk, without
//! touching any hardware. Useful for inspecting exactly what would be sent
//! to the printer and for previewing the dithered output.
//!
//! ## Usage
//!
//! ```bash
//! # Render styled text to a command stream
//! candela render --text "Hello, world" --out job.bin
//!
//! # Render an image with a caption, centered, plus a PNG preview
//! candela render --image photo.png --text "holiday 2026" --center \
//!     --out job.bin --preview preview.png
//!
//! # Target an 80mm printer, or an older column-mode mechanism
//! candela render --printer 80mm --text "wide" --out job.bin
//! candela render --printer 58mm-legacy --image logo.png --out job.bin
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;

use candela::{
    CandelaError, PrinterConfig, PrintJob,
    assemble::assemble,
    instruction::StyleAttributes,
    protocol::text::{Alignment, FontSize},
};

/// Candela - thermal printer command stream renderer
#[derive(Parser, Debug)]
#[command(name = "candela")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PrinterModel {
    /// Generic 58mm (384 dots), raster mode
    #[value(name = "58mm")]
    Mm58,
    /// Older 58mm without raster support (column mode)
    #[value(name = "58mm-legacy")]
    Mm58Legacy,
    /// Generic 80mm (576 dots), raster mode
    #[value(name = "80mm")]
    Mm80,
}

impl PrinterModel {
    fn config(self) -> PrinterConfig {
        match self {
            PrinterModel::Mm58 => PrinterConfig::GENERIC_58MM,
            PrinterModel::Mm58Legacy => PrinterConfig::GENERIC_58MM_LEGACY,
            PrinterModel::Mm80 => PrinterConfig::GENERIC_80MM,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a job to an ESC/POS command stream file
    Render {
        /// Text line to print (repeatable)
        #[arg(long)]
        text: Vec<String>,

        /// Image file to print above the text
        #[arg(long, value_name = "FILE")]
        image: Option<PathBuf>,

        /// Target printer model
        #[arg(long, value_enum, default_value = "58mm")]
        printer: PrinterModel,

        /// Center-align the text
        #[arg(long)]
        center: bool,

        /// Bold text
        #[arg(long)]
        bold: bool,

        /// Size multiplier for the text (1-8)
        #[arg(long, default_value = "1")]
        size: u8,

        /// Output file for the command stream
        #[arg(long, value_name = "FILE")]
        out: PathBuf,

        /// Optional PNG preview of the dithered image
        #[arg(long, value_name = "FILE")]
        preview: Option<PathBuf>,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), CandelaError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            text,
            image,
            printer,
            center,
            bold,
            size,
            out,
            preview,
        } => {
            let config = printer.config();
            let mut job = PrintJob::new();

            if let Some(path) = image {
                job.image(load_scaled(&path, config.width_dots)?);
            }

            let style = StyleAttributes {
                alignment: if center { Alignment::Center } else { Alignment::Left },
                size: FontSize::Custom { width: size, height: size },
                bold,
                ..Default::default()
            };
            for line in &text {
                job.text(line.clone(), style);
                job.feed(1);
            }

            let result = assemble(&job, &config)?;
            fs::write(&out, &result.data)?;
            eprintln!("Wrote {} bytes to {}", result.data.len(), out.display());

            match (preview, result.preview) {
                (Some(path), Some(png)) => {
                    fs::write(&path, &png)?;
                    eprintln!("Wrote preview to {}", path.display());
                }
                (Some(_), None) => {
                    eprintln!("No image in job; preview skipped");
                }
                _ => {}
            }

            Ok(())
        }
    }
}

/// Load an image file and scale it down to the printer width if needed.
fn load_scaled(path: &PathBuf, width_dots: u16) -> Result<image::RgbaImage, CandelaError> {
    let img = image::open(path)?.to_rgba8();
    if img.width() <= width_dots as u32 {
        return Ok(img);
    }

    let scale = width_dots as f32 / img.width() as f32;
    let height = ((img.height() as f32 * scale).round() as u32).max(1);
    Ok(image::imageops::resize(
        &img,
        width_dots as u32,
        height,
        image::imageops::FilterType::Triangle,
    ))
}
