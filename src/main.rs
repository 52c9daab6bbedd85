//! `pagetext` CLI - Extract readable text from a PDF, page by page

mod cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cmd::output::OutputFormat;

#[derive(Parser)]
#[command(name = "pagetext")]
#[command(about = "Extract readable text from PDF pages, with OCR for scanned pages")]
#[command(version)]
pub struct Cli {
    /// PDF file to extract
    pub file: PathBuf,

    /// Skip OCR for pages without embedded text
    #[arg(long)]
    pub no_ocr: bool,

    /// OCR languages, joined by '+' (default: chi_tra+eng)
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Render scale for OCR rasters (default: 3.0)
    #[arg(long)]
    pub ocr_scale: Option<f32>,

    /// Path or name of the tesseract executable
    #[arg(long)]
    pub tesseract: Option<PathBuf>,

    /// Directory containing the pdfium shared library
    #[arg(long)]
    pub pdfium_dir: Option<PathBuf>,

    /// Config file (default: ~/.config/pagetext/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write extracted text to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print extracted text (no status lines)
    #[arg(short, long)]
    pub quiet: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging (stderr, so stdout carries only extracted text)
    let default_level = if cli.verbose {
        "pagetext=debug"
    } else if cli.quiet {
        "pagetext=warn"
    } else {
        "pagetext=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    cmd::extract::cmd_extract(&cli).await
}
