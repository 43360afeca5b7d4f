//! Stock [`TrackingRater`] implementations.

use rand::Rng;

use crate::TrackingRater;

/// Upper bound of the tracking-rating scale.
pub const MAX_TRACKING_RATING: u8 = 5;

/// Rates every target with a uniformly random value in 0–5.
///
/// Mirrors the behavior of the real backend closely enough for tests that
/// only assert the rating is in range.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomRater;

impl TrackingRater for RandomRater {
    fn rate(&self, _image: &[u8]) -> u8 {
        rand::thread_rng().gen_range(0..=MAX_TRACKING_RATING)
    }
}

/// Rates every target with the same fixed value.
///
/// Useful for tests that need a stable rating; values above 5 are clamped.
#[derive(Debug, Clone, Copy)]
pub struct FixedRater(pub u8);

impl TrackingRater for FixedRater {
    fn rate(&self, _image: &[u8]) -> u8 {
        self.0.min(MAX_TRACKING_RATING)
    }
}
