//! Pluggable matching and rating strategies for the emulator.
//!
//! The store and query logic never compare image bytes or score image quality
//! themselves; they call through the two capability traits defined here.
//! Implementations are injected by constructor, carry no shared mutable
//! state, and are deterministic given their own configuration (the random
//! rater is deterministic only in its value range, which is all callers may
//! rely on).

mod matchers;
mod raters;

pub use matchers::{AverageHashMatcher, ExactMatcher};
pub use raters::{FixedRater, RandomRater, MAX_TRACKING_RATING};

/// Decides whether two image payloads depict the same target.
///
/// Used both for "does this query image match a stored target" and "is this
/// upload a duplicate of an existing target". Implementations vary in
/// strictness, from exact byte equality to perceptual-hash distance.
pub trait ImageMatcher: Send + Sync {
    fn matches(&self, a: &[u8], b: &[u8]) -> bool;
}

/// Assigns the 0–5 tracking-quality rating at target-creation time.
pub trait TrackingRater: Send + Sync {
    fn rate(&self, image: &[u8]) -> u8;
}

/// Whether the payload decodes as an image at all.
///
/// The store probes this once at creation time; an undecodable upload is the
/// only thing that sends a target to the failed state once processing ends.
pub fn decodable(image: &[u8]) -> bool {
    image::load_from_memory(image).is_ok()
}

#[cfg(test)]
pub(crate) fn test_png(r: u8, g: u8, b: u8) -> Vec<u8> {
    use std::io::Cursor;

    let img = image::RgbImage::from_pixel(4, 4, image::Rgb([r, g, b]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .expect("in-memory png encode");
    out.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_png_is_decodable() {
        assert!(decodable(&test_png(10, 20, 30)));
    }

    #[test]
    fn junk_bytes_are_not_decodable() {
        assert!(!decodable(b"definitely not an image"));
        assert!(!decodable(&[]));
    }
}
