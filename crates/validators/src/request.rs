//! The abstract inbound request and its endpoint traits.
//!
//! The HTTP router is an external collaborator; it hands the chain a parsed
//! request description plus the traits of the endpoint it resolved. URL
//! shapes are deliberately not fixed here.

use auth::KeyFamily;
use bytes::Bytes;
use http::{HeaderMap, Method};

/// An inbound request as seen by the validator chain.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            method,
            path: path.into(),
            headers,
            body,
        }
    }

    /// Header value as a string, when present and valid UTF-8.
    pub fn header_str(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Content type, defaulting to the empty string the signature scheme
    /// uses for untyped requests.
    pub fn content_type(&self) -> &str {
        self.header_str(http::header::CONTENT_TYPE.as_str())
            .unwrap_or("")
    }
}

/// Traits of the endpoint a request resolved to, supplied by the router.
#[derive(Debug, Clone)]
pub struct EndpointTraits {
    /// Which credential pair signs requests to this endpoint.
    pub key_family: KeyFamily,
    /// Whether this endpoint consumes a request body at all.
    pub accepts_body: bool,
    /// The VuMark instance endpoint signals malformed JSON differently.
    pub vumark_instance: bool,
    /// The duplicates check stays forbidden on inactive projects even
    /// though it is a GET.
    pub duplicates_check: bool,
    /// Target id extracted from the path, when the route addresses one.
    pub target_id: Option<String>,
}

impl EndpointTraits {
    /// A management-API endpoint (server key pair).
    pub fn management() -> Self {
        Self {
            key_family: KeyFamily::Server,
            accepts_body: true,
            vumark_instance: false,
            duplicates_check: false,
            target_id: None,
        }
    }

    /// A query-API endpoint (client key pair).
    pub fn query() -> Self {
        Self {
            key_family: KeyFamily::Client,
            accepts_body: true,
            vumark_instance: false,
            duplicates_check: false,
            target_id: None,
        }
    }

    /// A body-less management endpoint, e.g. target listing.
    pub fn listing() -> Self {
        Self {
            accepts_body: false,
            ..Self::management()
        }
    }

    /// The duplicates check for a specific target.
    pub fn duplicates(target_id: impl Into<String>) -> Self {
        Self {
            accepts_body: false,
            duplicates_check: true,
            target_id: Some(target_id.into()),
            ..Self::management()
        }
    }

    pub fn with_target_id(mut self, target_id: impl Into<String>) -> Self {
        self.target_id = Some(target_id.into());
        self
    }
}
