//! Per-request drive context built from the session credential.

use crate::error::ApiError;
use crate::state::AppState;
use api_shared::auth::session_id_from_cookies;
use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use drive_core::{Credential, DriveService, OfficeService, RemoteStore};
use std::sync::Arc;

/// Remote handles for the authenticated caller.
///
/// Rejects with `401` when there is no session cookie, the session is unknown, or it has no
/// credential yet. An expired credential with a refresh token is refreshed and written back to
/// the session before the handler runs.
pub struct DriveContext {
    pub session_id: String,
    pub drive: DriveService,
    pub office: OfficeService,
}

/// Session id from the request's `Cookie` headers.
pub fn session_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(session_id_from_cookies)
        .map(str::to_string)
}

async fn fresh_credential(
    state: &AppState,
    session_id: &str,
    credential: Credential,
) -> Result<Credential, ApiError> {
    if !credential.needs_refresh(chrono::Utc::now()) {
        return Ok(credential);
    }
    let Some(oauth) = &state.oauth else {
        return Ok(credential);
    };
    match oauth.refresh(&credential).await {
        Ok(refreshed) => {
            state
                .sessions
                .set_credential(session_id, refreshed.clone())
                .await;
            Ok(refreshed)
        }
        Err(e) => {
            tracing::warn!("credential refresh failed: {e}");
            Err(ApiError::unauthenticated())
        }
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for DriveContext {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session_id = session_id(&parts.headers).ok_or_else(ApiError::unauthenticated)?;
        let credential = state
            .sessions
            .get(&session_id)
            .await
            .and_then(|s| s.credential)
            .ok_or_else(ApiError::unauthenticated)?;
        let credential = fresh_credential(state, &session_id, credential).await?;

        let store: Arc<dyn RemoteStore> = state.backend.store(&credential);
        let office = state.backend.office(&credential);
        Ok(Self {
            session_id,
            drive: DriveService::new(state.cfg.clone(), store.clone()),
            office: OfficeService::new(store, office),
        })
    }
}
