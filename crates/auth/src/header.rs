//! `Authorization` header format.
//!
//! The wire shape is `VWS <access_key>:<signature>` — a fixed scheme token,
//! one space, then the credential segment with exactly one colon splitting
//! access key from signature.

use thiserror::Error;

/// Scheme token expected at the front of the `Authorization` header.
pub const AUTH_SCHEME: &str = "VWS";

/// Parsed credential segment of an `Authorization` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationHeader {
    pub access_key: String,
    /// May be empty; the validator chain rejects empty signatures with its
    /// own error kind, so parsing preserves them.
    pub signature: String,
}

/// Structural problems with the header, before any key lookup.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderError {
    #[error("authorization header is missing the scheme prefix")]
    MissingScheme,
    #[error("authorization header is missing the signature segment")]
    MissingSignature,
}

impl AuthorizationHeader {
    pub fn parse(raw: &str) -> Result<Self, HeaderError> {
        let credentials = raw
            .strip_prefix(AUTH_SCHEME)
            .and_then(|rest| rest.strip_prefix(' '))
            .ok_or(HeaderError::MissingScheme)?;
        let (access_key, signature) = credentials
            .split_once(':')
            .ok_or(HeaderError::MissingSignature)?;
        Ok(Self {
            access_key: access_key.to_string(),
            signature: signature.to_string(),
        })
    }

    /// Render in wire format.
    pub fn to_header_value(&self) -> String {
        format!("{AUTH_SCHEME} {}:{}", self.access_key, self.signature)
    }
}
