//! In-memory target store for the emulator.
//!
//! Holds the three entities of the data model — [`Target`], [`Database`],
//! and the process-wide [`DatabaseRegistry`] — plus the injected [`Clock`]
//! that drives the lazy processing state machine. Nothing here persists
//! across process restarts and no background task exists: a target's status
//! is recomputed from its upload timestamp on every read.

mod clock;
mod config;
mod database;
mod error;
mod query;
mod registry;
mod target;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::StoreConfig;
pub use database::{Database, DatabaseState};
pub use error::{KeyField, StoreError};
pub use query::{IncludeTargetData, QueryMatch, QueryOptions, TargetData};
pub use registry::DatabaseRegistry;
pub use target::{NewTarget, Target, TargetStatus, TargetUpdate, MAX_NAME_BYTES};
