//! Stock [`ImageMatcher`] implementations.

use image::imageops::FilterType;

use crate::ImageMatcher;

/// Strictest matcher: two images match only when their bytes are identical.
///
/// This is the right default for integration tests that upload and then query
/// the very same payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatcher;

impl ImageMatcher for ExactMatcher {
    fn matches(&self, a: &[u8], b: &[u8]) -> bool {
        a == b
    }
}

/// Perceptual matcher based on an 8×8 luma average hash.
///
/// Tolerant of re-encoding and mild resizing: both images are shrunk to 8×8
/// grayscale, thresholded against their mean luma, and compared by Hamming
/// distance over the resulting 64-bit hashes. Payloads that do not decode
/// fall back to exact byte comparison.
#[derive(Debug, Clone, Copy)]
pub struct AverageHashMatcher {
    /// Maximum Hamming distance (0–64) still considered a match.
    pub max_distance: u32,
}

impl AverageHashMatcher {
    pub fn new(max_distance: u32) -> Self {
        Self { max_distance }
    }
}

impl Default for AverageHashMatcher {
    fn default() -> Self {
        Self { max_distance: 4 }
    }
}

impl ImageMatcher for AverageHashMatcher {
    fn matches(&self, a: &[u8], b: &[u8]) -> bool {
        match (average_hash(a), average_hash(b)) {
            (Some(ha), Some(hb)) => {
                let distance = (ha ^ hb).count_ones();
                tracing::debug!(distance, max = self.max_distance, "average-hash comparison");
                distance <= self.max_distance
            }
            _ => a == b,
        }
    }
}

fn average_hash(data: &[u8]) -> Option<u64> {
    let img = image::load_from_memory(data).ok()?;
    let small = img.resize_exact(8, 8, FilterType::Triangle).to_luma8();
    let mean = small.pixels().map(|p| u32::from(p.0[0])).sum::<u32>() / 64;
    let mut bits = 0u64;
    for (i, pixel) in small.pixels().enumerate() {
        if u32::from(pixel.0[0]) > mean {
            bits |= 1 << i;
        }
    }
    Some(bits)
}
