//! Binary mask frames and row-wise foreground extraction.

use groundcloud_geometry::{Pixel, PixelRow};
use image::GrayImage;
use tracing::debug;

/// A single binary mask from a camera stream.
#[derive(Debug, Clone)]
pub struct MaskFrame {
    /// Mask image; any value above zero is foreground.
    pub mask: GrayImage,
    /// Topic the source image was published on, used to find the camera frame.
    pub topic: String,
    /// Timestamp in seconds. `0.0` asks for the latest transform.
    pub timestamp: f64,
}

impl MaskFrame {
    pub fn new(mask: GrayImage, topic: impl Into<String>, timestamp: f64) -> Self {
        Self {
            mask,
            topic: topic.into(),
            timestamp,
        }
    }

    /// Get mask dimensions (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        self.mask.dimensions()
    }

    pub fn foreground_rows(&self) -> Vec<PixelRow> {
        row_foreground(&self.mask)
    }
}

/// Group the foreground pixels of `mask` by row.
///
/// Returns exactly one entry per image row, top to bottom, each listing the
/// row's non-zero pixels left to right. Rows without foreground are kept as
/// empty entries. No connectivity is implied between pixels.
pub fn row_foreground(mask: &GrayImage) -> Vec<PixelRow> {
    let rows: Vec<PixelRow> = mask
        .rows()
        .enumerate()
        .map(|(row, pixels)| {
            pixels
                .enumerate()
                .filter(|(_, value)| value.0[0] > 0)
                .map(|(col, _)| Pixel::new(col as i32, row as i32))
                .collect()
        })
        .collect();

    debug!(
        "Extracted {} foreground pixels over {} rows",
        foreground_count(&rows),
        rows.len()
    );
    rows
}

/// Total number of pixels across all rows.
pub fn foreground_count(rows: &[PixelRow]) -> usize {
    rows.iter().map(Vec::len).sum()
}
