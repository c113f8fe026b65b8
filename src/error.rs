//! Error taxonomy for the extraction pipeline
//!
//! Recoverable conditions (a missing OCR backend, a failed segmentation
//! attempt, empty OCR text) degrade to sentinel values inside the pipeline;
//! these variants exist for the seams where a caller can still react.

use thiserror::Error;

use crate::vision::ocr::SegmentationMode;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// Screen capture backend unavailable or the grab itself failed.
    /// Surfaced per side; a failure on one half of the screen never
    /// aborts the other half.
    #[error("screen capture failed: {0}")]
    Capture(String),

    /// Requested region is degenerate or falls outside the screen.
    #[error("invalid capture region ({left},{top},{right},{bottom}) for {screen_width}x{screen_height} screen")]
    InvalidRegion {
        left: u32,
        top: u32,
        right: u32,
        bottom: u32,
        screen_width: u32,
        screen_height: u32,
    },

    /// No Tesseract executable could be resolved from config, environment,
    /// PATH, or the platform install locations.
    #[error("OCR backend unavailable: {0}")]
    OcrUnavailable(String),

    /// A single page-segmentation attempt failed. The engine loop swallows
    /// this and moves on to the next strategy.
    #[error("OCR attempt failed under {mode:?}: {message}")]
    OcrStrategy {
        mode: SegmentationMode,
        message: String,
    },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
