//! Extraction pipeline
//!
//! Orchestrates capture → debug save → OCR → structural parse for the two
//! screen halves: the left half holds the problem statement, the right half
//! the code editor. The two sides share no state; a failure on one never
//! prevents the other from succeeding, and recoverable conditions degrade
//! to sentinel values instead of errors.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::capture::{CapturedFrame, Region, ScreenCapture};
use crate::config::AppConfig;
use crate::error::ExtractError;
use crate::parse::{self, ProblemInfo};
use crate::vision::ocr::{OcrEngine, TesseractBackend};

/// Debug artifact written for the problem-side capture
pub const DEBUG_PROBLEM_IMAGE: &str = "debug_problem_area.png";
/// Debug artifact written for the code-side capture
pub const DEBUG_CODE_IMAGE: &str = "debug_code_area.png";

/// Result of one full extraction pass
#[derive(Debug, Clone)]
pub struct Extraction {
    pub problem: ProblemInfo,
    pub code: String,
}

/// Split the screen into the problem half and the code half.
///
/// Returns `(left, right)`: `(0,0,w/2,h)` and `(w/2,0,w,h)` — disjoint and
/// covering the full width.
pub fn split_regions(width: u32, height: u32) -> (Region, Region) {
    let mid = width / 2;
    (
        Region::new(0, 0, mid, height),
        Region::new(mid, 0, width, height),
    )
}

/// One-call screen-to-structured-text extraction
pub struct ExtractionPipeline {
    capture: ScreenCapture,
    engine: Option<OcrEngine>,
    save_debug: bool,
    debug_dir: PathBuf,
}

impl ExtractionPipeline {
    /// Build a pipeline from the app config.
    ///
    /// A missing Tesseract install is not fatal here: the pipeline still
    /// constructs and every region reads as empty text, so callers get the
    /// sentinel values instead of an error.
    pub fn new(config: &AppConfig) -> Self {
        let engine = match TesseractBackend::new(&config.ocr) {
            Ok(backend) => Some(OcrEngine::new(Box::new(backend))),
            Err(e) => {
                warn!("{e}; extraction will degrade to sentinel values");
                None
            }
        };

        Self {
            capture: ScreenCapture::new(),
            engine,
            save_debug: config.capture.save_debug_images,
            debug_dir: config.capture.debug_dir.clone(),
        }
    }

    /// Extract title and description from the left half of the screen
    pub fn extract_problem(&self) -> Result<ProblemInfo, ExtractError> {
        let (width, height) = self.capture.screen_size()?;
        let (problem_region, _) = split_regions(width, height);
        debug!("capturing problem region {problem_region:?}");

        let frame = self.capture.capture(Some(problem_region))?;
        self.save_debug_artifact(&frame, DEBUG_PROBLEM_IMAGE);

        let text = self.run_ocr(&frame)?;
        Ok(problem_from_ocr_text(&text))
    }

    /// Extract the in-progress code from the right half of the screen
    pub fn extract_code(&self) -> Result<String, ExtractError> {
        let (width, height) = self.capture.screen_size()?;
        let (_, code_region) = split_regions(width, height);
        debug!("capturing code region {code_region:?}");

        let frame = self.capture.capture(Some(code_region))?;
        self.save_debug_artifact(&frame, DEBUG_CODE_IMAGE);

        let text = self.run_ocr(&frame)?;
        Ok(parse::parse_code(&text))
    }

    /// Run both sides independently and always return a well-formed result.
    ///
    /// A capture failure on one side degrades that side to an
    /// error-describing placeholder; nothing recoverable is raised.
    pub fn extract_all(&self) -> Extraction {
        let problem = self.extract_problem().unwrap_or_else(|e| {
            warn!("problem-side extraction failed: {e}");
            ProblemInfo {
                title: "Error".to_string(),
                description: format!("Could not extract problem from screen: {e}"),
            }
        });

        let code = self.extract_code().unwrap_or_else(|e| {
            warn!("code-side extraction failed: {e}");
            format!("Could not extract current code: {e}")
        });

        info!(
            "extraction complete: title={:?}, {} description chars, {} code chars",
            problem.title,
            problem.description.len(),
            code.len()
        );

        Extraction { problem, code }
    }

    fn run_ocr(&self, frame: &CapturedFrame) -> Result<String, ExtractError> {
        let image = frame.to_image()?;
        match &self.engine {
            Some(engine) => Ok(engine.extract(&image)),
            None => {
                debug!("OCR engine unavailable; treating region as empty text");
                Ok(String::new())
            }
        }
    }

    /// Best-effort side effect; never affects pipeline correctness
    fn save_debug_artifact(&self, frame: &CapturedFrame, name: &str) {
        if !self.save_debug {
            return;
        }
        let path = self.debug_dir.join(name);
        match frame.to_image() {
            Ok(image) => {
                if let Err(e) = image.save(&path) {
                    warn!("could not save debug image {}: {e}", path.display());
                } else {
                    debug!("saved debug image {}", path.display());
                }
            }
            Err(e) => warn!("could not materialize frame for debug image: {e}"),
        }
    }
}

/// Map a region's OCR output to problem info, substituting the no-problem
/// sentinel when the text is empty or whitespace.
fn problem_from_ocr_text(text: &str) -> ProblemInfo {
    if text.trim().is_empty() {
        info!("problem region produced no usable text");
        return ProblemInfo::no_problem_detected();
    }
    parse::parse_problem(text)
}
