//! Multi-strategy Tesseract OCR engine
//!
//! Shells out to an external Tesseract executable and tries several
//! page-segmentation strategies in a fixed priority order, returning the
//! first non-empty result. If every strategy comes back empty the engine
//! retries once on the unprocessed capture, because binarization can
//! destroy faint anti-aliased text that Tesseract reads fine raw.

use std::path::PathBuf;
use std::process::Command;

use image::{DynamicImage, RgbaImage};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::config::OcrSettings;
use crate::error::ExtractError;
use crate::vision::preprocess::binarize_for_ocr;

/// Environment variable consulted when no executable is configured
pub const TESSERACT_CMD_ENV: &str = "TESSERACT_CMD";

/// Tesseract page-segmentation strategy: the layout the engine assumes for
/// text blocks on the input image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentationMode {
    /// Single uniform block of text (psm 6)
    UniformBlock,
    /// Single column of text (psm 4)
    SingleColumn,
    /// Fully automatic page segmentation (psm 3)
    Auto,
    /// Automatic segmentation with orientation detection (psm 1)
    AutoWithOsd,
}

impl SegmentationMode {
    /// Attempt priority order for the strategy loop
    pub const ATTEMPT_ORDER: [SegmentationMode; 4] = [
        SegmentationMode::UniformBlock,
        SegmentationMode::SingleColumn,
        SegmentationMode::Auto,
        SegmentationMode::AutoWithOsd,
    ];

    /// Value passed to Tesseract's `--psm` flag
    pub fn psm(self) -> &'static str {
        match self {
            SegmentationMode::UniformBlock => "6",
            SegmentationMode::SingleColumn => "4",
            SegmentationMode::Auto => "3",
            SegmentationMode::AutoWithOsd => "1",
        }
    }
}

/// A backend that can run one OCR pass over an image.
///
/// Trait seam so the strategy loop can be exercised against a mock in tests.
pub trait OcrBackend: Send {
    fn recognize(
        &self,
        image: &DynamicImage,
        mode: SegmentationMode,
    ) -> Result<String, ExtractError>;
}

/// OCR backend driving an external Tesseract executable
pub struct TesseractBackend {
    executable: PathBuf,
    language: String,
}

impl TesseractBackend {
    /// Resolve the Tesseract executable and build a backend.
    ///
    /// Resolution order: explicit config value, then `TESSERACT_CMD`, then
    /// `tesseract` on PATH, then the platform install locations. Fails with
    /// [`ExtractError::OcrUnavailable`] if nothing resolves.
    pub fn new(settings: &OcrSettings) -> Result<Self, ExtractError> {
        let executable = resolve_executable(settings)?;
        debug!("using Tesseract executable at {}", executable.display());
        Ok(Self {
            executable,
            language: settings.language.clone(),
        })
    }
}

impl OcrBackend for TesseractBackend {
    fn recognize(
        &self,
        image: &DynamicImage,
        mode: SegmentationMode,
    ) -> Result<String, ExtractError> {
        let input = NamedTempFile::with_suffix(".png")?;
        image.save(input.path())?;

        let output = Command::new(&self.executable)
            .arg(input.path())
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .arg("--psm")
            .arg(mode.psm())
            .output()?;

        if !output.status.success() {
            return Err(ExtractError::OcrStrategy {
                mode,
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

fn resolve_executable(settings: &OcrSettings) -> Result<PathBuf, ExtractError> {
    if let Some(ref path) = settings.tesseract_cmd {
        if path.exists() {
            return Ok(path.clone());
        }
        return Err(ExtractError::OcrUnavailable(format!(
            "configured tesseract path {} does not exist",
            path.display()
        )));
    }

    if let Ok(cmd) = std::env::var(TESSERACT_CMD_ENV) {
        if !cmd.trim().is_empty() {
            return Ok(PathBuf::from(cmd));
        }
    }

    // PATH probe
    if Command::new("tesseract")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
    {
        return Ok(PathBuf::from("tesseract"));
    }

    for path in default_install_paths() {
        if path.exists() {
            return Ok(path);
        }
    }

    Err(ExtractError::OcrUnavailable(format!(
        "tesseract not found; set [ocr].tesseract_cmd in the config or the {TESSERACT_CMD_ENV} environment variable"
    )))
}

/// Well-known install locations checked as a last resort
fn default_install_paths() -> Vec<PathBuf> {
    if cfg!(windows) {
        vec![
            PathBuf::from(r"C:\Program Files\Tesseract-OCR\tesseract.exe"),
            PathBuf::from(r"C:\Program Files (x86)\Tesseract-OCR\tesseract.exe"),
        ]
    } else {
        vec![
            PathBuf::from("/usr/bin/tesseract"),
            PathBuf::from("/usr/local/bin/tesseract"),
            PathBuf::from("/opt/homebrew/bin/tesseract"),
        ]
    }
}

/// Strategy loop over a pluggable OCR backend
pub struct OcrEngine {
    backend: Box<dyn OcrBackend>,
}

impl OcrEngine {
    pub fn new(backend: Box<dyn OcrBackend>) -> Self {
        Self { backend }
    }

    /// Extract text from a captured region.
    ///
    /// Never fails: a failing attempt counts as empty output and the loop
    /// continues, so the worst case is an empty string.
    pub fn extract(&self, image: &RgbaImage) -> String {
        for mode in SegmentationMode::ATTEMPT_ORDER {
            // Re-binarize from the original each attempt; strategies must
            // not see each other's artifacts.
            let binarized = DynamicImage::ImageLuma8(binarize_for_ocr(image));
            match self.backend.recognize(&binarized, mode) {
                Ok(text) => {
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        debug!("OCR succeeded under {:?} ({} chars)", mode, trimmed.len());
                        return trimmed.to_string();
                    }
                }
                Err(e) => warn!("OCR attempt failed: {e}"),
            }
        }

        debug!("all segmentation strategies empty; retrying on the raw capture");
        let raw = DynamicImage::ImageRgba8(image.clone());
        match self
            .backend
            .recognize(&raw, SegmentationMode::UniformBlock)
        {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                warn!("raw-image OCR fallback failed: {e}");
                String::new()
            }
        }
    }
}
