//! Screen Capture Layer
//!
//! Grabs the primary monitor (or a rectangular sub-region of it) via the
//! cross-platform `xcap` crate. This is a read-only operation; the screen is
//! never written to.

pub mod frame;

pub use frame::CapturedFrame;

use image::imageops;
use tracing::debug;
use xcap::Monitor;

use crate::error::ExtractError;

/// A rectangular sub-area of the screen in pixel coordinates.
///
/// Valid regions satisfy `left < right` and `top < bottom` and lie within
/// the screen bounds; [`Region::validate`] checks this against actual
/// screen dimensions before a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Region {
    /// Create a region from its corner coordinates
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Region width in pixels. Only meaningful for validated regions.
    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    /// Region height in pixels. Only meaningful for validated regions.
    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    /// Check that the region is non-degenerate and fits the given screen
    pub fn validate(&self, screen_width: u32, screen_height: u32) -> Result<(), ExtractError> {
        if self.left >= self.right
            || self.top >= self.bottom
            || self.right > screen_width
            || self.bottom > screen_height
        {
            return Err(ExtractError::InvalidRegion {
                left: self.left,
                top: self.top,
                right: self.right,
                bottom: self.bottom,
                screen_width,
                screen_height,
            });
        }
        Ok(())
    }
}

/// Screen capture over the primary monitor
#[derive(Debug, Default)]
pub struct ScreenCapture;

impl ScreenCapture {
    /// Create a new screen capture instance
    pub fn new() -> Self {
        Self
    }

    /// Dimensions of the primary monitor as (width, height)
    pub fn screen_size(&self) -> Result<(u32, u32), ExtractError> {
        let monitor = primary_monitor()?;
        let width = monitor
            .width()
            .map_err(|e| ExtractError::Capture(e.to_string()))?;
        let height = monitor
            .height()
            .map_err(|e| ExtractError::Capture(e.to_string()))?;
        Ok((width, height))
    }

    /// Capture the full screen, or exactly the given rectangle.
    ///
    /// One synchronous grab per call; no background capture session is kept.
    pub fn capture(&self, region: Option<Region>) -> Result<CapturedFrame, ExtractError> {
        let monitor = primary_monitor()?;
        let full = monitor
            .capture_image()
            .map_err(|e| ExtractError::Capture(e.to_string()))?;

        let image = match region {
            Some(region) => {
                region.validate(full.width(), full.height())?;
                debug!(
                    "cropping capture to ({},{})-({},{})",
                    region.left, region.top, region.right, region.bottom
                );
                imageops::crop_imm(
                    &full,
                    region.left,
                    region.top,
                    region.width(),
                    region.height(),
                )
                .to_image()
            }
            None => full,
        };

        Ok(CapturedFrame::from_image(image))
    }
}

/// Primary monitor, falling back to the first detected one
fn primary_monitor() -> Result<Monitor, ExtractError> {
    let monitors = Monitor::all().map_err(|e| ExtractError::Capture(e.to_string()))?;

    let mut fallback = None;
    for monitor in monitors {
        if matches!(monitor.is_primary(), Ok(true)) {
            return Ok(monitor);
        }
        if fallback.is_none() {
            fallback = Some(monitor);
        }
    }

    fallback.ok_or_else(|| ExtractError::Capture("no monitors detected".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_region() {
        let region = Region::new(0, 0, 960, 1080);
        assert!(region.validate(1920, 1080).is_ok());
        assert_eq!(region.width(), 960);
        assert_eq!(region.height(), 1080);
    }

    #[test]
    fn test_degenerate_region_rejected() {
        assert!(Region::new(100, 0, 100, 50).validate(1920, 1080).is_err());
        assert!(Region::new(200, 0, 100, 50).validate(1920, 1080).is_err());
        assert!(Region::new(0, 50, 100, 50).validate(1920, 1080).is_err());
    }

    #[test]
    fn test_out_of_bounds_region_rejected() {
        let region = Region::new(0, 0, 2000, 1080);
        match region.validate(1920, 1080) {
            Err(ExtractError::InvalidRegion { screen_width, .. }) => {
                assert_eq!(screen_width, 1920);
            }
            other => panic!("expected InvalidRegion, got {other:?}"),
        }
    }

    #[test]
    fn test_region_at_screen_edge_is_valid() {
        assert!(Region::new(960, 0, 1920, 1080).validate(1920, 1080).is_ok());
    }
}
