//! The individual checks, one function per chain position.
//!
//! Every check tolerates the conditions earlier checks reject (absent or
//! unparseable headers) by passing, so each stays independently testable;
//! only the chain order decides which failure a doubly-bad request reports.

mod authorization;
mod content;
mod database;
mod headers;

pub use authorization::{
    access_key_known, authorization_given, signature_segment_given, signature_valid,
};
pub use content::{
    body_is_valid_json, body_only_where_accepted, content_length_is_int,
    content_length_not_too_large, content_length_not_too_small, fields_valid,
};
pub use database::{project_active, target_addressable};
pub use headers::{
    content_type_given, date_format_valid, date_header_given, date_in_skew_window,
};

use crate::chain::ValidationContext;

/// Strict date-header pattern, RFC-1123 style.
pub(crate) const DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Access key from the Authorization header, parsed leniently: the scheme
/// prefix must be present, but a missing signature segment still yields the
/// key. Checks that only need to locate the addressed database use this so
/// they stay independent of the stricter signature checks.
pub(crate) fn lenient_access_key(raw: &str) -> Option<&str> {
    let credentials = raw
        .strip_prefix(auth::AUTH_SCHEME)
        .and_then(|rest| rest.strip_prefix(' '))?;
    Some(
        credentials
            .split_once(':')
            .map_or(credentials, |(key, _)| key),
    )
}

/// The database the request addresses, resolved by access key alone.
pub(crate) fn addressed_database<'a>(
    ctx: &ValidationContext<'a>,
) -> Option<&'a store::Database> {
    let raw = ctx
        .request
        .header_str(http::header::AUTHORIZATION.as_str())?;
    let access_key = lenient_access_key(raw)?;
    auth::database_for_access_key(ctx.databases, ctx.endpoint.key_family, access_key)
}
