//! Signed-request authentication for the emulator.
//!
//! Reproduces the vendor's scheme: each request carries
//! `Authorization: VWS <access_key>:<signature>` where the signature is an
//! HMAC-SHA1 over method, body digest, content type, date header, and path,
//! keyed by the per-database secret. The [`matcher`] half locates the unique
//! registered database whose keys reproduce a presented signature.

mod header;
mod matcher;
mod signature;

pub use header::{AuthorizationHeader, HeaderError, AUTH_SCHEME};
pub use matcher::{
    authenticated_database, authorization_header, database_for_access_key, AuthError, KeyFamily,
    SignedParts,
};
pub use signature::{compute_signature, content_md5_hex, string_to_sign};
