use pagetext::{OcrProgress, PageStage, ProgressEvent, ProgressReporter};

/// Status line for an event, or `None` for events with nothing to show.
pub fn status_line(event: &ProgressEvent) -> Option<String> {
    match event {
        ProgressEvent::DocumentStarted { total_pages } => {
            Some(format!("Loaded, parsing {total_pages} pages"))
        }
        ProgressEvent::PageStarted {
            page_number,
            total_pages,
        } => Some(format!("Parsing page {page_number} / {total_pages}...")),
        ProgressEvent::Stage {
            page_number,
            stage: PageStage::Rendering,
        } => Some(format!("[OCR] Rendering page {page_number} image...")),
        ProgressEvent::OcrProgress {
            page_number,
            status,
            progress,
        } => {
            // Engines may report a stage without a fraction
            if progress.is_finite() {
                let percent = OcrProgress::new(status.as_str(), *progress).percent();
                Some(format!("[OCR] page {page_number} {status} {percent}%"))
            } else {
                Some(format!("[OCR] page {page_number} {status}"))
            }
        }
        ProgressEvent::DocumentFinished { total_pages } => {
            Some(format!("Done: {total_pages} pages"))
        }
        ProgressEvent::Stage { .. } | ProgressEvent::PageFinished { .. } => None,
    }
}

/// Prints status lines to stderr.
pub struct StatusReporter {
    quiet: bool,
}

impl StatusReporter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn status(&self, message: &str) {
        if !self.quiet {
            eprintln!("{message}");
        }
    }
}

impl ProgressReporter for StatusReporter {
    fn report(&self, event: &ProgressEvent) {
        if let Some(line) = status_line(event) {
            self.status(&line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagetext::Provenance;

    #[test]
    fn page_and_document_lines() {
        assert_eq!(
            status_line(&ProgressEvent::PageStarted {
                page_number: 2,
                total_pages: 5
            })
            .as_deref(),
            Some("Parsing page 2 / 5...")
        );
        assert_eq!(
            status_line(&ProgressEvent::DocumentFinished { total_pages: 5 }).as_deref(),
            Some("Done: 5 pages")
        );
    }

    #[test]
    fn ocr_lines() {
        assert_eq!(
            status_line(&ProgressEvent::Stage {
                page_number: 3,
                stage: PageStage::Rendering
            })
            .as_deref(),
            Some("[OCR] Rendering page 3 image...")
        );
        assert_eq!(
            status_line(&ProgressEvent::OcrProgress {
                page_number: 3,
                status: "recognizing text".to_string(),
                progress: 0.456
            })
            .as_deref(),
            Some("[OCR] page 3 recognizing text 46%")
        );
    }

    #[test]
    fn ocr_line_without_fraction_has_no_percent() {
        for progress in [f32::NAN, f32::INFINITY] {
            assert_eq!(
                status_line(&ProgressEvent::OcrProgress {
                    page_number: 4,
                    status: "loading language".to_string(),
                    progress,
                })
                .as_deref(),
                Some("[OCR] page 4 loading language")
            );
        }
    }

    #[test]
    fn silent_events() {
        assert!(status_line(&ProgressEvent::Stage {
            page_number: 1,
            stage: PageStage::ReadingText
        })
        .is_none());
        assert!(status_line(&ProgressEvent::PageFinished {
            page_number: 1,
            total_pages: 1,
            provenance: Provenance::Native
        })
        .is_none());
    }
}
