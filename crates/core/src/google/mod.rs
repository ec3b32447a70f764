//! HTTP clients for the hosted document APIs.
//!
//! - [`drive::GoogleDrive`] implements [`crate::store::RemoteStore`] over the Drive v3 files API.
//! - [`office::GoogleOffice`] implements [`crate::office::OfficeApi`] over the Docs, Sheets,
//!   Slides and Drive comments APIs.
//! - [`oauth::OAuthClient`] runs the authorization-code flow and refreshes credentials.
//!
//! All clients make a single attempt per call; failures are surfaced as [`DriveError`].

pub mod drive;
pub mod oauth;
pub mod office;

use crate::{DriveError, DriveResult};

pub type HttpClient = reqwest::Client;

/// Builds the shared HTTP client.
pub fn http_client() -> DriveResult<HttpClient> {
    Ok(reqwest::Client::builder()
        .user_agent(concat!("drive-core/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// Turns a non-success response into a [`DriveError`].
///
/// `401` maps to [`DriveError::Unauthenticated`] so callers can restart the login flow; every
/// other status is carried through as [`DriveError::Remote`].
pub(crate) async fn check_status(response: reqwest::Response) -> DriveResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(DriveError::Unauthenticated);
    }
    let detail = response.text().await.unwrap_or_default();
    Err(DriveError::Remote {
        status: status.as_u16(),
        detail,
    })
}

/// Maps a remote `404` to [`DriveError::ObjectNotFound`] for `id`.
pub(crate) fn not_found_as(id: &str, err: DriveError) -> DriveError {
    match err {
        DriveError::Remote { status: 404, .. } => DriveError::ObjectNotFound(id.to_string()),
        other => other,
    }
}
