//! Content-Type and Date header checks (chain positions 1–4).

use chrono::{NaiveDateTime, TimeZone, Utc};
use http::Method;

use super::DATE_FORMAT;
use crate::chain::ValidationContext;
use crate::error::ValidationError;

/// 1. Methods that carry a body must declare a content type. The vendor
/// treats the omission as an authentication problem, not a plain 400.
pub fn content_type_given(ctx: &ValidationContext<'_>) -> Result<(), ValidationError> {
    let requires_body = ctx.request.method == Method::POST || ctx.request.method == Method::PUT;
    if requires_body && ctx.request.content_type().is_empty() {
        return Err(ValidationError::AuthenticationFailure);
    }
    Ok(())
}

/// 2. A Date header must be present on every request.
pub fn date_header_given(ctx: &ValidationContext<'_>) -> Result<(), ValidationError> {
    if ctx.request.header_str(http::header::DATE.as_str()).is_none() {
        return Err(ValidationError::Fail(http::StatusCode::BAD_REQUEST));
    }
    Ok(())
}

/// 3. The Date header must match the fixed RFC-1123-style pattern exactly.
pub fn date_format_valid(ctx: &ValidationContext<'_>) -> Result<(), ValidationError> {
    match ctx.request.header_str(http::header::DATE.as_str()) {
        Some(raw) if NaiveDateTime::parse_from_str(raw, DATE_FORMAT).is_err() => {
            Err(ValidationError::Fail(http::StatusCode::BAD_REQUEST))
        }
        _ => Ok(()),
    }
}

/// 4. The date must sit within the accepted window of server time, in
/// either direction.
pub fn date_in_skew_window(ctx: &ValidationContext<'_>) -> Result<(), ValidationError> {
    let Some(raw) = ctx.request.header_str(http::header::DATE.as_str()) else {
        return Ok(());
    };
    let Ok(parsed) = NaiveDateTime::parse_from_str(raw, DATE_FORMAT) else {
        return Ok(());
    };
    let date = Utc.from_utc_datetime(&parsed);
    let skew = (ctx.now - date).num_seconds().abs();
    if skew > ctx.config.max_skew_seconds {
        tracing::debug!(skew, limit = ctx.config.max_skew_seconds, "date header too skewed");
        return Err(ValidationError::RequestTimeTooSkewed);
    }
    Ok(())
}
