//! The target entity and its processing state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strategies::TrackingRater;
use uuid::Uuid;

/// Longest permitted target name, in bytes.
pub const MAX_NAME_BYTES: usize = 64;

/// Lifecycle status of a target.
///
/// Processing is not driven by a timer; it is recomputed from the upload
/// timestamp on every read, so re-reads are idempotent. Success and Failed
/// are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetStatus {
    Processing,
    Success,
    Failed,
}

/// Inputs for creating a target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTarget {
    pub name: String,
    pub width: f64,
    pub image: Vec<u8>,
    /// Defaults to active when omitted.
    #[serde(default)]
    pub active_flag: Option<bool>,
    /// Seconds the target stays in processing; the store default applies
    /// when omitted.
    #[serde(default)]
    pub processing_seconds: Option<f64>,
    /// Base64-encoded opaque blob, at most 1 MiB decoded (enforced by the
    /// validator chain before this type is ever built).
    #[serde(default)]
    pub application_metadata: Option<String>,
}

/// Partial update; only supplied fields mutate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub image: Option<Vec<u8>>,
    #[serde(default)]
    pub active_flag: Option<bool>,
    #[serde(default)]
    pub application_metadata: Option<String>,
}

/// A stored reference image record.
///
/// Deletion is a tombstone: `delete_date` is set and never cleared, and the
/// record stays in storage so direct lookups can still observe it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub target_id: String,
    pub name: String,
    pub width: f64,
    pub image: Vec<u8>,
    pub active_flag: bool,
    pub application_metadata: Option<String>,
    pub processing_seconds: f64,
    pub upload_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
    pub delete_date: Option<DateTime<Utc>>,
    /// Assigned once at creation; only meaningful after processing ends.
    pub tracking_rating: u8,
    /// Whether the image decoded at creation time. Decided once, cached;
    /// the status computation never re-probes the bytes.
    image_ok: bool,
}

impl Target {
    pub fn new(
        params: NewTarget,
        rater: &dyn TrackingRater,
        default_processing_seconds: f64,
        now: DateTime<Utc>,
    ) -> Self {
        let image_ok = strategies::decodable(&params.image);
        let tracking_rating = rater.rate(&params.image);
        let target_id = Uuid::new_v4().simple().to_string();
        tracing::debug!(%target_id, name = %params.name, image_ok, "target created");
        Self {
            target_id,
            name: params.name,
            width: params.width,
            image: params.image,
            active_flag: params.active_flag.unwrap_or(true),
            application_metadata: params.application_metadata,
            processing_seconds: params
                .processing_seconds
                .unwrap_or(default_processing_seconds),
            upload_date: now,
            last_modified_date: now,
            delete_date: None,
            tracking_rating,
            image_ok,
        }
    }

    /// Current status, recomputed from elapsed time since upload.
    pub fn status(&self, now: DateTime<Utc>) -> TargetStatus {
        let elapsed_ms = now.signed_duration_since(self.upload_date).num_milliseconds();
        if (elapsed_ms as f64) < self.processing_seconds * 1000.0 {
            TargetStatus::Processing
        } else if self.image_ok {
            TargetStatus::Success
        } else {
            TargetStatus::Failed
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.delete_date.is_some()
    }

    /// The tracking rating, once processing has ended. Callers must not
    /// observe the rating of a target that is still processing.
    pub fn visible_tracking_rating(&self, now: DateTime<Utc>) -> Option<u8> {
        match self.status(now) {
            TargetStatus::Processing => None,
            TargetStatus::Success | TargetStatus::Failed => Some(self.tracking_rating),
        }
    }

    pub(crate) fn replace_image(&mut self, image: Vec<u8>) {
        self.image_ok = strategies::decodable(&image);
        self.image = image;
    }
}

/// Whether a name satisfies the length rules.
pub(crate) fn name_is_valid(name: &str) -> bool {
    !name.is_empty() && name.len() <= MAX_NAME_BYTES
}
