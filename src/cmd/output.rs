use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use pagetext::{ExtractError, PageExtraction, Provenance};

/// How extracted pages are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text page blocks
    Text,
    /// Markdown sections, one per page
    Markdown,
    /// Single JSON document, written once all pages are done
    Json,
}

const FALLBACK_OCR_ENABLED: &str =
    "(No text detected on this page. It may be a scanned image, or the image quality is too low.)";
const FALLBACK_OCR_DISABLED: &str =
    "(No text detected on this page. Try again with OCR enabled.)";

/// Placeholder shown for a page with no text.
pub fn fallback_message(ocr_enabled: bool) -> &'static str {
    if ocr_enabled {
        FALLBACK_OCR_ENABLED
    } else {
        FALLBACK_OCR_DISABLED
    }
}

/// Badge shown next to the page title. Empty pages get none.
pub fn source_badge(provenance: Provenance) -> Option<&'static str> {
    match provenance {
        Provenance::Native => Some("PDF text"),
        Provenance::Ocr => Some("OCR"),
        Provenance::None => None,
    }
}

/// Human-readable size, one decimal, units up to GB.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.1} {}", UNITS[unit])
}

pub fn file_info(name: &str, bytes: u64) -> String {
    format!("File: {name} | Size: {}", format_size(bytes))
}

fn page_title(page: &PageExtraction) -> String {
    match source_badge(page.provenance) {
        Some(badge) => format!("Page {} [{badge}]", page.page_number),
        None => format!("Page {}", page.page_number),
    }
}

fn page_body<'p>(page: &'p PageExtraction, ocr_enabled: bool) -> &'p str {
    if page.text.is_empty() {
        fallback_message(ocr_enabled)
    } else {
        &page.text
    }
}

pub fn render_text(page: &PageExtraction, ocr_enabled: bool) -> String {
    format!(
        "=== {} ===\n{}\n\n",
        page_title(page),
        page_body(page, ocr_enabled)
    )
}

pub fn render_markdown(page: &PageExtraction, ocr_enabled: bool) -> String {
    let title = match source_badge(page.provenance) {
        Some(badge) => format!("## Page {} `{badge}`", page.page_number),
        None => format!("## Page {}", page.page_number),
    };
    if page.text.is_empty() {
        format!("{title}\n\n_{}_\n\n", fallback_message(ocr_enabled))
    } else {
        format!("{title}\n\n```text\n{}\n```\n\n", page.text)
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    file: &'a str,
    ocr_enabled: bool,
    complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    pages: &'a [PageExtraction],
}

/// Writes pages as they arrive. Text and markdown stream page by page;
/// JSON is buffered until [`finish`](Self::finish).
pub struct PageWriter<W: Write> {
    out: W,
    format: OutputFormat,
    ocr_enabled: bool,
    buffered: Vec<PageExtraction>,
    written: usize,
}

impl<W: Write> PageWriter<W> {
    pub fn new(out: W, format: OutputFormat, ocr_enabled: bool) -> Self {
        Self {
            out,
            format,
            ocr_enabled,
            buffered: Vec::new(),
            written: 0,
        }
    }

    pub fn write_page(&mut self, page: PageExtraction) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => {
                self.out
                    .write_all(render_text(&page, self.ocr_enabled).as_bytes())?;
                self.out.flush()?;
            }
            OutputFormat::Markdown => {
                self.out
                    .write_all(render_markdown(&page, self.ocr_enabled).as_bytes())?;
                self.out.flush()?;
            }
            OutputFormat::Json => self.buffered.push(page),
        }
        self.written += 1;
        Ok(())
    }

    pub fn pages_written(&self) -> usize {
        self.written
    }

    /// Flush everything and hand back the writer.
    pub fn finish(mut self, file_name: &str, failure: Option<&ExtractError>) -> io::Result<W> {
        if self.format == OutputFormat::Json {
            let report = JsonReport {
                file: file_name,
                ocr_enabled: self.ocr_enabled,
                complete: failure.is_none(),
                error: failure.map(ToString::to_string),
                pages: &self.buffered,
            };
            serde_json::to_writer_pretty(&mut self.out, &report)?;
            self.out.write_all(b"\n")?;
        }
        self.out.flush()?;
        Ok(self.out)
    }
}
