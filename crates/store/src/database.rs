//! The database entity: a credential-scoped, insertion-ordered collection of
//! targets, plus the target operations that run after a request clears the
//! validator chain.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use strategies::{ImageMatcher, TrackingRater, MAX_TRACKING_RATING};
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::query::{IncludeTargetData, QueryMatch, QueryOptions, TargetData};
use crate::target::{name_is_valid, NewTarget, Target, TargetStatus, TargetUpdate};

/// Whether the project behind a database accepts work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseState {
    Working,
    ProjectInactive,
}

/// A named credential-scoped collection of targets.
///
/// The server key pair authenticates management requests, the client key
/// pair authenticates query requests. All five identity fields must be
/// globally unique across the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Database {
    pub database_name: String,
    pub server_access_key: String,
    pub server_secret_key: String,
    pub client_access_key: String,
    pub client_secret_key: String,
    pub state: DatabaseState,
    targets: Vec<Target>,
}

impl Database {
    pub fn new(
        database_name: impl Into<String>,
        server_access_key: impl Into<String>,
        server_secret_key: impl Into<String>,
        client_access_key: impl Into<String>,
        client_secret_key: impl Into<String>,
        state: DatabaseState,
    ) -> Self {
        Self {
            database_name: database_name.into(),
            server_access_key: server_access_key.into(),
            server_secret_key: server_secret_key.into(),
            client_access_key: client_access_key.into(),
            client_secret_key: client_secret_key.into(),
            state,
            targets: Vec::new(),
        }
    }

    /// A working database with freshly generated credentials.
    pub fn random(database_name: impl Into<String>) -> Self {
        let key = || Uuid::new_v4().simple().to_string();
        Self::new(
            database_name,
            key(),
            key(),
            key(),
            key(),
            DatabaseState::Working,
        )
    }

    /// All stored targets, tombstoned ones included, in insertion order.
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Direct lookup by id. Tombstoned targets are still returned; callers
    /// that must not see them check `is_deleted` themselves.
    pub fn target(&self, target_id: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.target_id == target_id)
    }

    fn target_mut(&mut self, target_id: &str) -> Option<&mut Target> {
        self.targets.iter_mut().find(|t| t.target_id == target_id)
    }

    /// Ids of non-deleted targets, for list endpoints.
    pub fn listed_target_ids(&self) -> Vec<String> {
        self.targets
            .iter()
            .filter(|t| !t.is_deleted())
            .map(|t| t.target_id.clone())
            .collect()
    }

    fn name_taken(&self, name: &str, excluding: Option<&str>) -> bool {
        self.targets
            .iter()
            .filter(|t| !t.is_deleted())
            .filter(|t| Some(t.target_id.as_str()) != excluding)
            .any(|t| t.name == name)
    }

    /// Append a new target. Returns the generated target id.
    pub fn add_target(
        &mut self,
        params: NewTarget,
        rater: &dyn TrackingRater,
        config: &StoreConfig,
        now: DateTime<Utc>,
    ) -> Result<String, StoreError> {
        if !name_is_valid(&params.name) {
            return Err(StoreError::InvalidName);
        }
        if self.name_taken(&params.name, None) {
            return Err(StoreError::TargetNameExist);
        }
        let target = Target::new(params, rater, config.default_processing_seconds, now);
        let target_id = target.target_id.clone();
        tracing::info!(database = %self.database_name, %target_id, "target added");
        self.targets.push(target);
        Ok(target_id)
    }

    /// Apply a partial update to a successfully processed target.
    ///
    /// When `rerandomize_rating_on_update` is set, the tracking rating is
    /// replaced with a fresh value guaranteed to differ from the old one, a
    /// deliberate divergence from the real backend kept for demonstration.
    pub fn update_target(
        &mut self,
        target_id: &str,
        update: TargetUpdate,
        config: &StoreConfig,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        if let Some(name) = update.name.as_deref() {
            if !name_is_valid(name) {
                return Err(StoreError::InvalidName);
            }
            if self.name_taken(name, Some(target_id)) {
                return Err(StoreError::TargetNameExist);
            }
        }

        let rerandomize = config.rerandomize_rating_on_update;
        let target = self
            .target_mut(target_id)
            .ok_or(StoreError::UnknownTarget)?;
        if target.is_deleted() {
            return Err(StoreError::UnknownTarget);
        }
        match target.status(now) {
            TargetStatus::Processing => return Err(StoreError::TargetStatusProcessing),
            TargetStatus::Failed => return Err(StoreError::TargetStatusNotSuccess),
            TargetStatus::Success => {}
        }

        if let Some(name) = update.name {
            target.name = name;
        }
        if let Some(width) = update.width {
            target.width = width;
        }
        if let Some(image) = update.image {
            target.replace_image(image);
        }
        if let Some(active_flag) = update.active_flag {
            target.active_flag = active_flag;
        }
        if let Some(metadata) = update.application_metadata {
            target.application_metadata = Some(metadata);
        }
        if rerandomize {
            target.tracking_rating = different_rating(target.tracking_rating);
        }
        target.last_modified_date = now;
        tracing::info!(database = %self.database_name, %target_id, "target updated");
        Ok(())
    }

    /// Tombstone a target. Fails while the target is still processing, and
    /// on re-delete (a tombstoned target is no longer addressable).
    pub fn delete_target(
        &mut self,
        target_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let database_name = self.database_name.clone();
        let target = self
            .target_mut(target_id)
            .ok_or(StoreError::UnknownTarget)?;
        if target.is_deleted() {
            return Err(StoreError::UnknownTarget);
        }
        if target.status(now) == TargetStatus::Processing {
            return Err(StoreError::TargetStatusProcessing);
        }
        target.delete_date = Some(now);
        tracing::info!(database = %database_name, %target_id, "target deleted");
        Ok(())
    }

    /// Match a query image against stored targets.
    ///
    /// Candidates are active, non-deleted, successfully processed targets,
    /// evaluated in insertion order; the result list is truncated to
    /// `max_num_results`.
    pub fn query(
        &self,
        image: &[u8],
        options: &QueryOptions,
        matcher: &dyn ImageMatcher,
        now: DateTime<Utc>,
    ) -> Vec<QueryMatch> {
        let mut matches = Vec::new();
        for target in &self.targets {
            if matches.len() >= options.max_num_results {
                break;
            }
            if target.is_deleted()
                || !target.active_flag
                || target.status(now) != TargetStatus::Success
                || !matcher.matches(image, &target.image)
            {
                continue;
            }
            let include = match options.include_target_data {
                IncludeTargetData::All => true,
                IncludeTargetData::Top => matches.is_empty(),
                IncludeTargetData::None => false,
            };
            let target_data = include.then(|| TargetData {
                target_timestamp: target.last_modified_date,
                name: target.name.clone(),
                application_metadata: target.application_metadata.clone(),
            });
            matches.push(QueryMatch {
                target_id: target.target_id.clone(),
                target_data,
            });
        }
        tracing::debug!(database = %self.database_name, hits = matches.len(), "query evaluated");
        matches
    }

    /// Ids of other stored targets whose image the matcher considers equal
    /// to the given target's image.
    pub fn duplicates(
        &self,
        target_id: &str,
        matcher: &dyn ImageMatcher,
        now: DateTime<Utc>,
    ) -> Result<Vec<String>, StoreError> {
        let subject = self
            .target(target_id)
            .filter(|t| !t.is_deleted())
            .ok_or(StoreError::UnknownTarget)?;
        Ok(self
            .targets
            .iter()
            .filter(|t| t.target_id != subject.target_id)
            .filter(|t| !t.is_deleted() && t.status(now) == TargetStatus::Success)
            .filter(|t| matcher.matches(&subject.image, &t.image))
            .map(|t| t.target_id.clone())
            .collect())
    }
}

fn different_rating(current: u8) -> u8 {
    let mut rng = rand::thread_rng();
    // Draw from the scale minus the current value.
    let pick = rng.gen_range(0..MAX_TRACKING_RATING);
    if pick >= current {
        pick + 1
    } else {
        pick
    }
}
