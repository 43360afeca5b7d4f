//! Authorization header checks (chain positions 8–11).

use auth::{authenticated_database, AuthorizationHeader, SignedParts};

use super::lenient_access_key;
use crate::chain::ValidationContext;
use crate::error::ValidationError;

fn raw_authorization<'a>(ctx: &ValidationContext<'a>) -> Option<&'a str> {
    ctx.request
        .header_str(http::header::AUTHORIZATION.as_str())
}

/// 8. The Authorization header must be present.
pub fn authorization_given(ctx: &ValidationContext<'_>) -> Result<(), ValidationError> {
    if raw_authorization(ctx).is_none() {
        return Err(ValidationError::AuthenticationFailure);
    }
    Ok(())
}

/// 9. The access-key segment must belong to a registered database. A header
/// without the scheme prefix is left for the signature check to reject.
pub fn access_key_known(ctx: &ValidationContext<'_>) -> Result<(), ValidationError> {
    let Some(access_key) = raw_authorization(ctx).and_then(lenient_access_key) else {
        return Ok(());
    };
    if auth::database_for_access_key(ctx.databases, ctx.endpoint.key_family, access_key)
        .is_none()
    {
        return Err(ValidationError::Fail(http::StatusCode::BAD_REQUEST));
    }
    Ok(())
}

/// 10. The credential segment must contain a non-empty signature.
pub fn signature_segment_given(ctx: &ValidationContext<'_>) -> Result<(), ValidationError> {
    let Some(credentials) = raw_authorization(ctx)
        .and_then(|raw| raw.strip_prefix(auth::AUTH_SCHEME))
        .and_then(|rest| rest.strip_prefix(' '))
    else {
        return Ok(());
    };
    match credentials.split_once(':') {
        Some((_, signature)) if !signature.is_empty() => Ok(()),
        _ => Err(ValidationError::Fail(http::StatusCode::BAD_REQUEST)),
    }
}

/// 11. Full signature validation: the header must parse and exactly one
/// registered database's keys must reproduce the signature.
pub fn signature_valid(ctx: &ValidationContext<'_>) -> Result<(), ValidationError> {
    let Some(raw) = raw_authorization(ctx) else {
        return Ok(());
    };
    let header = AuthorizationHeader::parse(raw)
        .map_err(|_| ValidationError::AuthenticationFailure)?;
    let parts = SignedParts {
        method: ctx.request.method.as_str(),
        content_type: ctx.request.content_type(),
        date: ctx
            .request
            .header_str(http::header::DATE.as_str())
            .unwrap_or(""),
        path: &ctx.request.path,
        body: &ctx.request.body,
    };
    authenticated_database(ctx.databases, ctx.endpoint.key_family, &parts, &header)
        .map(|_| ())
        .map_err(|_| ValidationError::AuthenticationFailure)
}
