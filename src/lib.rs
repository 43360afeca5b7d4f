//! Umbrella crate for the vumock emulator.
//!
//! vumock emulates a vendor's cloud image-recognition web service well
//! enough for integration tests to run against either the real backend or
//! this in-process double: the same signed-request authentication scheme,
//! the same validation error precedence, and the same asynchronous-looking
//! target processing semantics, with no network and no background tasks.
//!
//! The pieces live in sub-crates — [`strategies`] for the injected matching
//! and rating capabilities, [`store`] for targets, databases, and the
//! registry, [`auth`] for the signature scheme, [`validators`] for the
//! ordered request-validation chain — and this crate stitches them into the
//! [`MockVuforia`] facade most callers want.

mod config;

pub use config::MockConfig;

pub use auth::{
    authenticated_database, authorization_header, compute_signature, content_md5_hex,
    database_for_access_key, AuthError, AuthorizationHeader, HeaderError, KeyFamily,
    SignedParts, AUTH_SCHEME,
};
pub use store::{
    Clock, Database, DatabaseRegistry, DatabaseState, FixedClock, IncludeTargetData, KeyField,
    NewTarget, QueryMatch, QueryOptions, StoreConfig, StoreError, SystemClock, Target,
    TargetData, TargetStatus, TargetUpdate, MAX_NAME_BYTES,
};
pub use strategies::{
    decodable, AverageHashMatcher, ExactMatcher, FixedRater, ImageMatcher, RandomRater,
    TrackingRater, MAX_TRACKING_RATING,
};
pub use validators::{
    run_chain, EndpointTraits, RequestDescriptor, ResultCode, ValidationConfig,
    ValidationContext, ValidationError, Validator, VALIDATOR_CHAIN,
};

use std::sync::Arc;

/// The assembled emulator: a database registry plus the injected
/// capabilities every operation consults.
///
/// Constructed once per process or test, reset between tests via
/// [`MockVuforia::reset`]. Cloning shares the underlying registry.
#[derive(Clone)]
pub struct MockVuforia {
    registry: Arc<DatabaseRegistry>,
    matcher: Arc<dyn ImageMatcher>,
    rater: Arc<dyn TrackingRater>,
    clock: Arc<dyn Clock>,
    config: MockConfig,
}

impl MockVuforia {
    /// Emulator with the stock strategies: perceptual matching, random
    /// ratings, wall-clock time.
    pub fn new() -> Self {
        Self::with_parts(
            Arc::new(AverageHashMatcher::default()),
            Arc::new(RandomRater),
            Arc::new(SystemClock),
            MockConfig::default(),
        )
    }

    /// Emulator with explicit capabilities, for tests that need a fake
    /// clock, a strict matcher, or stable ratings.
    pub fn with_parts(
        matcher: Arc<dyn ImageMatcher>,
        rater: Arc<dyn TrackingRater>,
        clock: Arc<dyn Clock>,
        config: MockConfig,
    ) -> Self {
        Self {
            registry: Arc::new(DatabaseRegistry::new()),
            matcher,
            rater,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &MockConfig {
        &self.config
    }

    pub fn registry(&self) -> &DatabaseRegistry {
        &self.registry
    }

    // ── Registry management ────────────────────────────────────────────

    pub fn add_database(&self, database: Database) -> Result<(), StoreError> {
        self.registry.add(database)
    }

    pub fn remove_database(&self, database_name: &str) -> Result<Database, StoreError> {
        self.registry.remove(database_name)
    }

    pub fn databases(&self) -> Vec<Database> {
        self.registry.snapshot()
    }

    /// Drop all state, as the reset-all management route does.
    pub fn reset(&self) {
        self.registry.clear();
    }

    // ── Request validation ─────────────────────────────────────────────

    /// Run the full validator chain against a request description.
    ///
    /// The registry is snapshotted up front, so the chain never observes a
    /// concurrent mutation mid-run.
    pub fn validate_request(
        &self,
        request: &RequestDescriptor,
        endpoint: &EndpointTraits,
    ) -> Result<(), ValidationError> {
        let databases = self.registry.snapshot();
        run_chain(&ValidationContext {
            request,
            endpoint,
            databases: &databases,
            now: self.clock.now(),
            config: &self.config.validation,
        })
    }

    // ── Target operations ──────────────────────────────────────────────

    /// Create a target in the named database; returns the generated id.
    pub fn add_target(
        &self,
        database_name: &str,
        params: NewTarget,
    ) -> Result<String, StoreError> {
        let now = self.clock.now();
        self.registry.with_database_mut(database_name, |db| {
            db.add_target(params, self.rater.as_ref(), &self.config.store, now)
        })?
    }

    /// Apply a partial update to a target.
    pub fn update_target(
        &self,
        database_name: &str,
        target_id: &str,
        update: TargetUpdate,
    ) -> Result<(), StoreError> {
        let now = self.clock.now();
        self.registry.with_database_mut(database_name, |db| {
            db.update_target(target_id, update, &self.config.store, now)
        })?
    }

    /// Tombstone a target.
    pub fn delete_target(&self, database_name: &str, target_id: &str) -> Result<(), StoreError> {
        let now = self.clock.now();
        self.registry
            .with_database_mut(database_name, |db| db.delete_target(target_id, now))?
    }

    /// Direct lookup by id; tombstoned targets are still returned.
    pub fn target(&self, database_name: &str, target_id: &str) -> Result<Option<Target>, StoreError> {
        self.registry
            .with_database(database_name, |db| db.target(target_id).cloned())
    }

    /// Current status of a target, per the injected clock.
    pub fn target_status(
        &self,
        database_name: &str,
        target_id: &str,
    ) -> Result<TargetStatus, StoreError> {
        let now = self.clock.now();
        self.registry.with_database(database_name, |db| {
            db.target(target_id)
                .map(|t| t.status(now))
                .ok_or(StoreError::UnknownTarget)
        })?
    }

    /// Ids of non-deleted targets, in insertion order.
    pub fn list_targets(&self, database_name: &str) -> Result<Vec<String>, StoreError> {
        self.registry
            .with_database(database_name, |db| db.listed_target_ids())
    }

    /// Match a query image against the named database's targets.
    pub fn query(
        &self,
        database_name: &str,
        image: &[u8],
        options: &QueryOptions,
    ) -> Result<Vec<QueryMatch>, StoreError> {
        let now = self.clock.now();
        self.registry.with_database(database_name, |db| {
            db.query(image, options, self.matcher.as_ref(), now)
        })
    }

    /// Ids of stored targets duplicating the given target's image.
    pub fn duplicates(
        &self,
        database_name: &str,
        target_id: &str,
    ) -> Result<Vec<String>, StoreError> {
        let now = self.clock.now();
        self.registry.with_database(database_name, |db| {
            db.duplicates(target_id, self.matcher.as_ref(), now)
        })?
    }
}

impl Default for MockVuforia {
    fn default() -> Self {
        Self::new()
    }
}
