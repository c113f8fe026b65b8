//! Vision Layer
//!
//! Image preprocessing and multi-strategy OCR over captured frames.

pub mod ocr;
pub mod preprocess;

pub use ocr::{OcrBackend, OcrEngine, SegmentationMode, TesseractBackend};
pub use preprocess::binarize_for_ocr;
