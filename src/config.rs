//! Extraction settings loaded from `~/.config/pagetext/config.toml`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::content::DEFAULT_LINE_TOLERANCE;
use crate::raster::OCR_RENDER_SCALE;

/// Traditional Chinese plus English.
pub const DEFAULT_OCR_LANGUAGES: &str = "chi_tra+eng";

/// Settings for one extraction run. Every field has a default, so an empty
/// or partial config file is valid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Run OCR on pages without native text.
    pub ocr_enabled: bool,
    /// Tesseract language codes joined by `+`.
    pub ocr_languages: String,
    pub ocr_render_scale: f32,
    /// Baseline delta that starts a new line.
    pub line_tolerance: f32,
    /// Tesseract executable name or path.
    pub tesseract_binary: PathBuf,
    /// Directory containing the pdfium shared library. System library when unset.
    pub pdfium_library_dir: Option<PathBuf>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            ocr_enabled: true,
            ocr_languages: DEFAULT_OCR_LANGUAGES.to_string(),
            ocr_render_scale: OCR_RENDER_SCALE,
            line_tolerance: DEFAULT_LINE_TOLERANCE,
            tesseract_binary: PathBuf::from("tesseract"),
            pdfium_library_dir: None,
        }
    }
}

impl ExtractConfig {
    /// Parse a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("invalid extraction config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path, or the default location.
    ///
    /// A missing default file yields defaults. A missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (config_path(), false),
        };

        if !path.exists() {
            if required {
                anyhow::bail!("config file not found: {}", path.display());
            }
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("invalid TOML in {}", path.display()))
    }

    /// Reject out-of-range values.
    pub fn validate(&self) -> Result<()> {
        if self.ocr_render_scale <= 0.0 || !self.ocr_render_scale.is_finite() {
            anyhow::bail!("ocr_render_scale must be positive, got {}", self.ocr_render_scale);
        }
        if self.line_tolerance.is_nan() || self.line_tolerance < 0.0 {
            anyhow::bail!("line_tolerance must not be negative, got {}", self.line_tolerance);
        }
        if self.ocr_languages.split('+').any(|code| code.trim().is_empty()) {
            anyhow::bail!("ocr_languages has an empty language code: {:?}", self.ocr_languages);
        }
        Ok(())
    }
}

/// Return the path to the default config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pagetext")
        .join("config.toml")
}
