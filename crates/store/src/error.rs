//! Typed errors for registry and target operations.
//!
//! All errors are cloneable and comparable so tests can assert on exact
//! failure kinds, and each kind maps to an HTTP-status-equivalent plus a
//! machine-readable result code. Callers are expected to branch on the
//! result code, not the status, since several kinds share a status.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The database identity field that collided during registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyField {
    DatabaseName,
    ServerAccessKey,
    ServerSecretKey,
    ClientAccessKey,
    ClientSecretKey,
}

impl fmt::Display for KeyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyField::DatabaseName => "database_name",
            KeyField::ServerAccessKey => "server_access_key",
            KeyField::ServerSecretKey => "server_secret_key",
            KeyField::ClientAccessKey => "client_access_key",
            KeyField::ClientSecretKey => "client_secret_key",
        };
        f.write_str(name)
    }
}

/// Errors from registry mutations and target lifecycle operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreError {
    /// Registering a database reused an identity field of an existing one.
    /// The registry is unchanged when this is returned.
    #[error("duplicate {field}: {value}")]
    DuplicateKey { field: KeyField, value: String },

    /// The addressed database is not registered.
    #[error("database not found")]
    NotFound,

    /// The addressed target does not exist or is tombstoned.
    #[error("unknown target")]
    UnknownTarget,

    /// Another non-deleted target in the database already has this name.
    #[error("target name already exists")]
    TargetNameExist,

    /// Target names must be 1 to 64 bytes.
    #[error("invalid target name")]
    InvalidName,

    /// The target is still processing; deletion must wait.
    #[error("target status is processing")]
    TargetStatusProcessing,

    /// The operation requires a successfully processed target.
    #[error("target status is not success")]
    TargetStatusNotSuccess,
}

impl StoreError {
    /// Suggested HTTP status for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            StoreError::DuplicateKey { .. } => 409,
            StoreError::NotFound | StoreError::UnknownTarget => 404,
            StoreError::InvalidName => 400,
            StoreError::TargetNameExist
            | StoreError::TargetStatusProcessing
            | StoreError::TargetStatusNotSuccess => 403,
        }
    }

    /// Machine-readable result code for this error.
    pub fn result_code(&self) -> &'static str {
        match self {
            StoreError::DuplicateKey { .. } => "Fail",
            StoreError::NotFound => "Fail",
            StoreError::UnknownTarget => "UnknownTarget",
            StoreError::TargetNameExist => "TargetNameExist",
            StoreError::InvalidName => "Fail",
            StoreError::TargetStatusProcessing => "TargetStatusProcessing",
            StoreError::TargetStatusNotSuccess => "TargetStatusNotSuccess",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_key_names_the_field() {
        let err = StoreError::DuplicateKey {
            field: KeyField::ClientAccessKey,
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "duplicate client_access_key: abc");
        assert_eq!(err.http_status_code(), 409);
    }

    #[test]
    fn lifecycle_errors_map_to_forbidden() {
        assert_eq!(StoreError::TargetStatusProcessing.http_status_code(), 403);
        assert_eq!(
            StoreError::TargetStatusProcessing.result_code(),
            "TargetStatusProcessing"
        );
        assert_eq!(StoreError::UnknownTarget.http_status_code(), 404);
    }
}
