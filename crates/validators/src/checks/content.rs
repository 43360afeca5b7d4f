//! Content-Length, body shape, and field-level checks (chain positions
//! 5–7 and 12–14).

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use http::{Method, StatusCode};
use serde_json::Value;

use crate::chain::ValidationContext;
use crate::error::ValidationError;

fn content_length_raw<'a>(ctx: &ValidationContext<'a>) -> Option<&'a str> {
    ctx.request
        .header_str(http::header::CONTENT_LENGTH.as_str())
}

fn content_length(ctx: &ValidationContext<'_>) -> Option<u64> {
    content_length_raw(ctx).and_then(|raw| raw.parse().ok())
}

/// 5. A Content-Length header, when present, must be an integer.
pub fn content_length_is_int(ctx: &ValidationContext<'_>) -> Result<(), ValidationError> {
    match content_length_raw(ctx) {
        Some(raw) if raw.parse::<u64>().is_err() => {
            Err(ValidationError::ContentLengthHeaderNotInt)
        }
        _ => Ok(()),
    }
}

/// 6. Content-Length must not promise more bytes than the body carries.
pub fn content_length_not_too_large(
    ctx: &ValidationContext<'_>,
) -> Result<(), ValidationError> {
    match content_length(ctx) {
        Some(declared) if declared > ctx.request.body.len() as u64 => {
            Err(ValidationError::ContentLengthHeaderTooLarge)
        }
        _ => Ok(()),
    }
}

/// 7. Content-Length must not understate the body either; the excess bytes
/// were never covered by the signature, so this reads as tampering.
pub fn content_length_not_too_small(
    ctx: &ValidationContext<'_>,
) -> Result<(), ValidationError> {
    match content_length(ctx) {
        Some(declared) if declared < ctx.request.body.len() as u64 => {
            Err(ValidationError::AuthenticationFailure)
        }
        _ => Ok(()),
    }
}

/// 12. A non-empty body must be well-formed JSON. The VuMark instance
/// endpoint signals the malformation with its own error kind.
pub fn body_is_valid_json(ctx: &ValidationContext<'_>) -> Result<(), ValidationError> {
    if ctx.request.body.is_empty() {
        return Ok(());
    }
    if serde_json::from_slice::<Value>(&ctx.request.body).is_err() {
        return Err(if ctx.endpoint.vumark_instance {
            ValidationError::BadRequest
        } else {
            ValidationError::Fail(StatusCode::UNPROCESSABLE_ENTITY)
        });
    }
    Ok(())
}

/// 13. Bodies are only accepted on endpoints and methods that take one.
pub fn body_only_where_accepted(ctx: &ValidationContext<'_>) -> Result<(), ValidationError> {
    if ctx.request.body.is_empty() {
        return Ok(());
    }
    let body_method =
        ctx.request.method == Method::POST || ctx.request.method == Method::PUT;
    if !body_method || !ctx.endpoint.accepts_body {
        return Err(ValidationError::UnnecessaryRequestBody);
    }
    Ok(())
}

/// 14. Field-level constraints on a JSON object body.
///
/// `active_flag` must be boolean or null, `width` a positive number, and
/// `application_metadata` null or a base64 string no larger than the
/// decoded limit. Name rules are business logic, not chain concerns.
pub fn fields_valid(ctx: &ValidationContext<'_>) -> Result<(), ValidationError> {
    let Ok(Value::Object(fields)) = serde_json::from_slice::<Value>(&ctx.request.body) else {
        return Ok(());
    };

    if let Some(active_flag) = fields.get("active_flag") {
        if !matches!(active_flag, Value::Bool(_) | Value::Null) {
            return Err(ValidationError::Fail(StatusCode::BAD_REQUEST));
        }
    }

    if let Some(width) = fields.get("width") {
        let positive = width
            .as_f64()
            .map(|w| w.is_finite() && w > 0.0)
            .unwrap_or(false);
        if !positive {
            return Err(ValidationError::Fail(StatusCode::BAD_REQUEST));
        }
    }

    if let Some(metadata) = fields.get("application_metadata") {
        match metadata {
            Value::Null => {}
            Value::String(encoded) => {
                let Ok(decoded) = BASE64.decode(encoded) else {
                    return Err(ValidationError::Fail(StatusCode::UNPROCESSABLE_ENTITY));
                };
                if decoded.len() > ctx.config.max_metadata_bytes {
                    return Err(ValidationError::MetadataTooLarge);
                }
            }
            _ => return Err(ValidationError::Fail(StatusCode::UNPROCESSABLE_ENTITY)),
        }
    }

    Ok(())
}
