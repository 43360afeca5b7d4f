//! The authentication matcher.
//!
//! Given the signed components of a request and a registry snapshot, find
//! the unique database whose keys reproduce the presented signature. Every
//! database is tried; there is no data-dependent early exit keyed on secret
//! material, though no cryptographic constant-time claim is made — this is
//! a test double.

use store::Database;
use thiserror::Error;

use crate::header::AuthorizationHeader;
use crate::signature::compute_signature;

/// Which of a database's two credential pairs a request is signed with.
///
/// Management endpoints use the server pair, query endpoints the client
/// pair. The matcher only ever checks the family the endpoint calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFamily {
    Server,
    Client,
}

impl KeyFamily {
    pub fn access_key<'a>(&self, database: &'a Database) -> &'a str {
        match self {
            KeyFamily::Server => &database.server_access_key,
            KeyFamily::Client => &database.client_access_key,
        }
    }

    pub fn secret_key<'a>(&self, database: &'a Database) -> &'a str {
        match self {
            KeyFamily::Server => &database.server_secret_key,
            KeyFamily::Client => &database.client_secret_key,
        }
    }
}

/// Signed components of a request, as covered by the signature string.
#[derive(Debug, Clone, Copy)]
pub struct SignedParts<'a> {
    pub method: &'a str,
    pub content_type: &'a str,
    pub date: &'a str,
    pub path: &'a str,
    pub body: &'a [u8],
}

/// The request could not be tied to exactly one registered database.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("authentication failure")]
    AuthenticationFailure,
}

/// Build a valid `Authorization` header value for the given request.
///
/// The emulator's own tests and client helpers use this to sign requests
/// exactly the way the real vendor SDK does.
pub fn authorization_header(
    access_key: &str,
    secret_key: &str,
    parts: &SignedParts<'_>,
) -> String {
    let signature = compute_signature(
        secret_key,
        parts.method,
        parts.body,
        parts.content_type,
        parts.date,
        parts.path,
    );
    AuthorizationHeader {
        access_key: access_key.to_string(),
        signature,
    }
    .to_header_value()
}

/// Locate the unique database whose keys reproduce the presented signature.
pub fn authenticated_database<'a>(
    databases: &'a [Database],
    family: KeyFamily,
    parts: &SignedParts<'_>,
    header: &AuthorizationHeader,
) -> Result<&'a Database, AuthError> {
    let mut matched: Option<&Database> = None;
    let mut matches = 0usize;
    for database in databases {
        let expected = compute_signature(
            family.secret_key(database),
            parts.method,
            parts.body,
            parts.content_type,
            parts.date,
            parts.path,
        );
        let hit = family.access_key(database) == header.access_key
            && expected == header.signature;
        if hit {
            matched = Some(database);
            matches += 1;
        }
    }
    match (matched, matches) {
        (Some(database), 1) => Ok(database),
        _ => {
            tracing::debug!(matches, access_key = %header.access_key, "signature matched no unique database");
            Err(AuthError::AuthenticationFailure)
        }
    }
}

/// Find the database owning the given access key, without verifying any
/// signature. Used to locate the addressed database for target-existence
/// and project-state checks once authentication has already passed.
pub fn database_for_access_key<'a>(
    databases: &'a [Database],
    family: KeyFamily,
    access_key: &str,
) -> Option<&'a Database> {
    databases
        .iter()
        .find(|db| family.access_key(db) == access_key)
}
