//! The ordered validator chain.
//!
//! Every request runs through the same fixed list of independent checks
//! before any business logic. Order matters: exactly one failure is
//! surfaced per request, and vendor parity requires this precedence. Each
//! validator is self-contained — none depends on a side effect of another —
//! so the list itself is the only place ordering is encoded.

use chrono::{DateTime, Utc};
use store::Database;

use crate::checks;
use crate::config::ValidationConfig;
use crate::error::ValidationError;
use crate::request::{EndpointTraits, RequestDescriptor};

/// Everything a validator may consult: the parsed request, the endpoint's
/// traits, a registry snapshot, the injected clock's now, and the limits.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    pub request: &'a RequestDescriptor,
    pub endpoint: &'a EndpointTraits,
    pub databases: &'a [Database],
    pub now: DateTime<Utc>,
    pub config: &'a ValidationConfig,
}

/// A single independent check.
pub type Validator = fn(&ValidationContext<'_>) -> Result<(), ValidationError>;

/// The fixed precedence order. Auditable in one place.
pub const VALIDATOR_CHAIN: &[Validator] = &[
    checks::content_type_given,
    checks::date_header_given,
    checks::date_format_valid,
    checks::date_in_skew_window,
    checks::content_length_is_int,
    checks::content_length_not_too_large,
    checks::content_length_not_too_small,
    checks::authorization_given,
    checks::access_key_known,
    checks::signature_segment_given,
    checks::signature_valid,
    checks::body_is_valid_json,
    checks::body_only_where_accepted,
    checks::fields_valid,
    checks::target_addressable,
    checks::project_active,
];

/// Run the chain, short-circuiting on the first failure.
pub fn run_chain(ctx: &ValidationContext<'_>) -> Result<(), ValidationError> {
    for validator in VALIDATOR_CHAIN {
        if let Err(error) = validator(ctx) {
            tracing::debug!(
                method = %ctx.request.method,
                path = %ctx.request.path,
                %error,
                "request rejected by validator chain"
            );
            return Err(error);
        }
    }
    Ok(())
}
