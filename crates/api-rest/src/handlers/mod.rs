//! Route handlers, grouped by resource.

pub mod auth;
pub mod comments;
pub mod drive;
pub mod office;

use crate::error::ApiResult;
use drive_core::{DriveError, ObjectId};

/// Parses an identifier taken from the URL.
pub(crate) fn object_id(raw: &str) -> ApiResult<ObjectId> {
    Ok(ObjectId::parse(raw).map_err(DriveError::from)?)
}
