use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use futures::StreamExt;
use tracing::{debug, warn};

use pagetext::{
    bind_pdfium, DocumentPipeline, ExtractConfig, ExtractError, OcrEngine, PdfSource,
    PdfiumSource, TesseractEngine,
};

use super::output::{file_info, PageWriter};
use super::progress::StatusReporter;
use crate::Cli;

/// Accept only existing files with a `.pdf` extension (any case).
pub fn validate_input(path: &Path) -> Result<()> {
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if !is_pdf {
        anyhow::bail!("Please select a PDF file (got {})", path.display());
    }
    if !path.is_file() {
        anyhow::bail!("Please select a PDF file ({} not found)", path.display());
    }
    Ok(())
}

/// Apply command-line overrides on top of the loaded config.
pub fn apply_overrides(config: &mut ExtractConfig, cli: &Cli) -> Result<()> {
    if cli.no_ocr {
        config.ocr_enabled = false;
    }
    if let Some(lang) = &cli.lang {
        config.ocr_languages.clone_from(lang);
    }
    if let Some(scale) = cli.ocr_scale {
        config.ocr_render_scale = scale;
    }
    if let Some(binary) = &cli.tesseract {
        config.tesseract_binary.clone_from(binary);
    }
    if let Some(dir) = &cli.pdfium_dir {
        config.pdfium_library_dir = Some(dir.clone());
    }
    config.validate().context("invalid command-line option")
}

fn read_or_parse_failed(error: &ExtractError) -> anyhow::Error {
    anyhow::anyhow!("Failed to read or parse: {error}")
}

pub async fn cmd_extract(cli: &Cli) -> Result<()> {
    validate_input(&cli.file)?;

    let mut config = ExtractConfig::load(cli.config.as_deref())?;
    apply_overrides(&mut config, cli)?;
    debug!("Config: {:?}", config);

    let reporter = StatusReporter::new(cli.quiet);
    let name = cli.file.file_name().map_or_else(
        || cli.file.display().to_string(),
        |n| n.to_string_lossy().into_owned(),
    );

    let bytes = tokio::fs::read(&cli.file)
        .await
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;
    reporter.status(&file_info(&name, bytes.len() as u64));

    let pdfium =
        bind_pdfium(config.pdfium_library_dir.as_deref()).map_err(|e| read_or_parse_failed(&e))?;
    let document = PdfiumSource::load(&pdfium, &bytes).map_err(|e| read_or_parse_failed(&e))?;

    let ocr = TesseractEngine::with_binary(config.tesseract_binary.clone());
    if config.ocr_enabled && !ocr.is_available() {
        warn!("{}; scanned pages will come back empty", ocr.availability_hint());
    }

    let out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = PageWriter::new(out, cli.format, config.ocr_enabled);

    let pipeline = DocumentPipeline::new(&ocr, &config, &reporter);
    let mut failure = None;
    {
        let mut pages = pipeline.process(&document, config.ocr_enabled);
        while let Some(item) = pages.next().await {
            match item {
                Ok(page) => writer.write_page(page).context("Failed to write output")?,
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }
    }

    let written = writer.pages_written();
    writer
        .finish(&name, failure.as_ref())
        .context("Failed to write output")?;

    if let Some(path) = &cli.output {
        reporter.status(&format!(
            "Saved {written} of {} pages to {}",
            document.page_count(),
            path.display()
        ));
    }

    match failure {
        Some(e) => Err(read_or_parse_failed(&e)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("pagetext").chain(args.iter().copied()))
    }

    #[test]
    fn rejects_non_pdf_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();
        let err = validate_input(&path).unwrap_err();
        assert!(err.to_string().contains("Please select a PDF file"));
    }

    #[test]
    fn rejects_missing_file() {
        let err = validate_input(Path::new("/nonexistent/scan.pdf")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn accepts_uppercase_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("SCAN.PDF");
        std::fs::write(&path, b"%PDF-1.4").unwrap();
        assert!(validate_input(&path).is_ok());
    }

    #[test]
    fn flags_override_config() {
        let mut config = ExtractConfig::default();
        let args = cli(&[
            "scan.pdf",
            "--no-ocr",
            "--lang",
            "eng",
            "--ocr-scale",
            "4",
            "--pdfium-dir",
            "/opt/pdfium",
        ]);
        apply_overrides(&mut config, &args).unwrap();
        assert!(!config.ocr_enabled);
        assert_eq!(config.ocr_languages, "eng");
        assert!((config.ocr_render_scale - 4.0).abs() < f32::EPSILON);
        assert_eq!(
            config.pdfium_library_dir.as_deref(),
            Some(Path::new("/opt/pdfium"))
        );
    }

    #[test]
    fn no_flags_keep_config() {
        let mut config = ExtractConfig::default();
        apply_overrides(&mut config, &cli(&["scan.pdf"])).unwrap();
        assert_eq!(config, ExtractConfig::default());
    }

    #[test]
    fn invalid_scale_flag_is_rejected() {
        let mut config = ExtractConfig::default();
        let err = apply_overrides(&mut config, &cli(&["scan.pdf", "--ocr-scale", "0"])).unwrap_err();
        assert!(format!("{err:#}").contains("ocr_render_scale"));
    }
}
