//! Frame data structures for captured screen content

use std::time::Instant;

use image::RgbaImage;

use crate::error::ExtractError;

/// A captured frame from the screen
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    /// Raw RGBA pixel data
    pub data: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Timestamp when frame was captured
    pub timestamp: Instant,
}

impl CapturedFrame {
    /// Create a new captured frame from raw RGBA bytes
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
            timestamp: Instant::now(),
        }
    }

    /// Wrap a decoded RGBA image as a frame
    pub fn from_image(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self::new(image.into_raw(), width, height)
    }

    /// Get frame dimensions as (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Reassemble the pixel buffer into an [`RgbaImage`] for processing
    pub fn to_image(&self) -> Result<RgbaImage, ExtractError> {
        RgbaImage::from_raw(self.width, self.height, self.data.clone()).ok_or_else(|| {
            ExtractError::Capture(format!(
                "frame buffer does not match {}x{} dimensions",
                self.width, self.height
            ))
        })
    }
}
