//! Image preprocessing for OCR
//!
//! OCR does markedly better on high-contrast binarized text than on raw
//! screenshots full of anti-aliased glyphs and colored UI chrome, so every
//! strategy attempt runs on a grayscale + Otsu-thresholded copy first.

use image::{GrayImage, RgbaImage};
use imageproc::contrast::{otsu_level, threshold, ThresholdType};

/// Convert a captured RGBA frame into a two-level black/white image.
///
/// Deterministic: the same input always produces the same output, and a
/// binarized image re-binarizes to itself.
pub fn binarize_for_ocr(image: &RgbaImage) -> GrayImage {
    let gray = image::imageops::grayscale(image);
    let level = otsu_level(&gray);
    threshold(&gray, level, ThresholdType::Binary)
}
