use crate::error::{ApiError, ApiResult};
use crate::extract::session_id;
use crate::state::{AppState, Session};
use api_shared::auth::{session_cookie, state_matches};
use api_shared::{CallbackParams, HealthRes, HealthService, MessageRes};
use axum::extract::{Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Redirect, Response};
use drive_core::google::oauth::OAuthClient;
use std::sync::Arc;

fn oauth_client(state: &AppState) -> ApiResult<&Arc<OAuthClient>> {
    state.oauth.as_ref().ok_or_else(|| {
        ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "Login is not configured on this server",
        )
    })
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Welcome message", body = MessageRes)
    )
)]
#[axum::debug_handler]
pub async fn root() -> Json<MessageRes> {
    Json(MessageRes::new("Welcome to the Drive API"))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks. Does not touch the remote APIs.
#[axum::debug_handler]
pub async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/login",
    responses(
        (status = 303, description = "Redirect to the provider's consent page"),
        (status = 503, description = "No OAuth client configured", body = api_shared::ErrorRes)
    )
)]
/// Start the login flow
///
/// Opens a new session holding a random anti-forgery `state`, sets the session cookie and
/// redirects to the consent page with offline access requested.
///
/// # Errors
/// Returns `503 Service Unavailable` if the server was started without client secrets.
#[axum::debug_handler]
pub async fn login(State(state): State<AppState>) -> ApiResult<Response> {
    let oauth = oauth_client(&state)?;
    let oauth_state = uuid::Uuid::new_v4().simple().to_string();
    let url = oauth.authorization_url(&oauth_state)?;
    let session_id = state
        .sessions
        .create(Session::pending(oauth_state))
        .await;

    tracing::info!("redirecting to consent page");
    Ok(([(SET_COOKIE, session_cookie(&session_id))], Redirect::to(&url)).into_response())
}

#[utoipa::path(
    get,
    path = "/callback",
    params(CallbackParams),
    responses(
        (status = 303, description = "Login complete, redirect to /drive/files"),
        (status = 400, description = "Missing or mismatched state, or no code", body = api_shared::ErrorRes),
        (status = 503, description = "No OAuth client configured", body = api_shared::ErrorRes)
    )
)]
/// Complete the login flow
///
/// Checks the returned `state` against the one issued by `/login` (single use), exchanges the
/// authorization code for a credential and stores it in the session. A failed attempt drops a
/// session that never completed a login.
///
/// # Errors
/// Returns `400 Bad Request` if:
/// - the provider reported an error,
/// - the request carries no session cookie or the `state` does not match, or
/// - no authorization code was supplied.
#[axum::debug_handler]
pub async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<CallbackParams>,
) -> ApiResult<Response> {
    let oauth = oauth_client(&state)?;
    let session_id = session_id(&headers);
    if let Some(error) = params.error {
        if let Some(id) = &session_id {
            state.sessions.discard_pending(id).await;
        }
        return Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            format!("Authorization failed: {error}"),
        ));
    }

    let session_id =
        session_id.ok_or_else(|| ApiError::new(StatusCode::BAD_REQUEST, "Missing session"))?;
    let expected = state.sessions.take_oauth_state(&session_id).await;
    if !state_matches(expected.as_deref(), params.state.as_deref().unwrap_or_default()) {
        tracing::warn!("OAuth state mismatch");
        state.sessions.discard_pending(&session_id).await;
        return Err(ApiError::new(StatusCode::BAD_REQUEST, "Invalid OAuth state"));
    }

    let code = params
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::new(StatusCode::BAD_REQUEST, "Missing authorization code"))?;
    let credential = oauth.exchange_code(&code).await?;
    state.sessions.set_credential(&session_id, credential).await;

    tracing::info!("login completed");
    Ok(Redirect::to("/drive/files").into_response())
}
