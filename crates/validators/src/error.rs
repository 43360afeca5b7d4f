//! Validation error taxonomy.
//!
//! Each kind maps to one HTTP-status-equivalent and one machine-readable
//! result code. Several kinds share a status, so callers branch on the
//! result code.

use std::fmt;

use http::StatusCode;
use serde::Serialize;
use thiserror::Error;

/// Machine-readable result codes surfaced to API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResultCode {
    AuthenticationFailure,
    RequestTimeTooSkewed,
    Fail,
    UnknownTarget,
    MetadataTooLarge,
    ProjectInactive,
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            ResultCode::AuthenticationFailure => "AuthenticationFailure",
            ResultCode::RequestTimeTooSkewed => "RequestTimeTooSkewed",
            ResultCode::Fail => "Fail",
            ResultCode::UnknownTarget => "UnknownTarget",
            ResultCode::MetadataTooLarge => "MetadataTooLarge",
            ResultCode::ProjectInactive => "ProjectInactive",
        };
        f.write_str(code)
    }
}

/// A request rejected by the validator chain.
///
/// Exactly one of these is surfaced per request: the first validator in the
/// fixed order that fails determines the error, everything later is skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    /// Unauthenticated or malformed-auth request.
    #[error("authentication failure")]
    AuthenticationFailure,

    /// Date header outside the accepted window around server time.
    #[error("request time too skewed")]
    RequestTimeTooSkewed,

    /// Generic validation failure; the status varies by the field at fault.
    #[error("request validation failed")]
    Fail(StatusCode),

    /// The VuMark-instance flavor of a malformed body.
    #[error("bad request")]
    BadRequest,

    /// Content-Length header did not parse as an integer.
    #[error("content-length header is not an integer")]
    ContentLengthHeaderNotInt,

    /// Content-Length header claims more bytes than the body carries. The
    /// real service keeps waiting for the missing bytes and times out.
    #[error("content-length header larger than the body")]
    ContentLengthHeaderTooLarge,

    /// Decoded `application_metadata` exceeds the size limit.
    #[error("application metadata is too large")]
    MetadataTooLarge,

    /// A body was sent to an endpoint or method that accepts none.
    #[error("request body is not allowed here")]
    UnnecessaryRequestBody,

    /// The addressed database's project is inactive.
    #[error("project is inactive")]
    ProjectInactive,

    /// The addressed target does not exist or is tombstoned.
    #[error("unknown target")]
    UnknownTarget,

    /// VuMark instance request with an unusable Accept header.
    #[error("invalid accept header")]
    InvalidAcceptHeader,

    /// VuMark instance request addressing a malformed instance id.
    #[error("invalid instance id")]
    InvalidInstanceId,
}

impl ValidationError {
    /// HTTP-status-equivalent for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ValidationError::AuthenticationFailure => StatusCode::UNAUTHORIZED,
            ValidationError::RequestTimeTooSkewed => StatusCode::FORBIDDEN,
            ValidationError::Fail(status) => *status,
            ValidationError::BadRequest => StatusCode::BAD_REQUEST,
            ValidationError::ContentLengthHeaderNotInt => StatusCode::BAD_REQUEST,
            ValidationError::ContentLengthHeaderTooLarge => StatusCode::GATEWAY_TIMEOUT,
            ValidationError::MetadataTooLarge => StatusCode::UNPROCESSABLE_ENTITY,
            ValidationError::UnnecessaryRequestBody => StatusCode::BAD_REQUEST,
            ValidationError::ProjectInactive => StatusCode::FORBIDDEN,
            ValidationError::UnknownTarget => StatusCode::NOT_FOUND,
            ValidationError::InvalidAcceptHeader => StatusCode::NOT_ACCEPTABLE,
            ValidationError::InvalidInstanceId => StatusCode::BAD_REQUEST,
        }
    }

    /// Machine-readable result code for this error.
    pub fn result_code(&self) -> ResultCode {
        match self {
            ValidationError::AuthenticationFailure => ResultCode::AuthenticationFailure,
            ValidationError::RequestTimeTooSkewed => ResultCode::RequestTimeTooSkewed,
            ValidationError::MetadataTooLarge => ResultCode::MetadataTooLarge,
            ValidationError::ProjectInactive => ResultCode::ProjectInactive,
            ValidationError::UnknownTarget => ResultCode::UnknownTarget,
            ValidationError::Fail(_)
            | ValidationError::BadRequest
            | ValidationError::ContentLengthHeaderNotInt
            | ValidationError::ContentLengthHeaderTooLarge
            | ValidationError::UnnecessaryRequestBody
            | ValidationError::InvalidAcceptHeader
            | ValidationError::InvalidInstanceId => ResultCode::Fail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_and_codes_line_up() {
        assert_eq!(
            ValidationError::AuthenticationFailure.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ValidationError::AuthenticationFailure.result_code(),
            ResultCode::AuthenticationFailure
        );
        assert_eq!(
            ValidationError::RequestTimeTooSkewed.status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ValidationError::Fail(StatusCode::BAD_REQUEST).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ValidationError::Fail(StatusCode::UNPROCESSABLE_ENTITY).result_code(),
            ResultCode::Fail
        );
        assert_eq!(
            ValidationError::ContentLengthHeaderTooLarge.status(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(ValidationError::UnknownTarget.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn result_codes_render_in_vendor_casing() {
        assert_eq!(
            ResultCode::RequestTimeTooSkewed.to_string(),
            "RequestTimeTooSkewed"
        );
        assert_eq!(ResultCode::Fail.to_string(), "Fail");
    }
}
