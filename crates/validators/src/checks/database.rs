//! Addressed-target and project-state checks (chain positions 15–16).

use http::Method;
use store::DatabaseState;

use super::addressed_database;
use crate::chain::ValidationContext;
use crate::error::ValidationError;

/// 15. A target id in the path must reference a non-deleted target in the
/// authenticated database.
pub fn target_addressable(ctx: &ValidationContext<'_>) -> Result<(), ValidationError> {
    let Some(target_id) = ctx.endpoint.target_id.as_deref() else {
        return Ok(());
    };
    let Some(database) = addressed_database(ctx) else {
        return Ok(());
    };
    match database.target(target_id) {
        Some(target) if !target.is_deleted() => Ok(()),
        _ => Err(ValidationError::UnknownTarget),
    }
}

/// 16. An inactive project only serves plain GETs; mutations and the
/// duplicates check are rejected.
pub fn project_active(ctx: &ValidationContext<'_>) -> Result<(), ValidationError> {
    let Some(database) = addressed_database(ctx) else {
        return Ok(());
    };
    if database.state != DatabaseState::ProjectInactive {
        return Ok(());
    }
    if ctx.request.method == Method::GET && !ctx.endpoint.duplicates_check {
        return Ok(());
    }
    Err(ValidationError::ProjectInactive)
}
