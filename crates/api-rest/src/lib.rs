//! # API REST
//!
//! REST API implementation for the drive path façade.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - The login flow and the in-memory session store
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, request tracing)
//!
//! Uses `api-shared` for common types and `drive-core` for everything that talks to the remote
//! APIs.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod extract;
pub mod handlers;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{AppState, Session, SessionStore};

use axum::routing::{delete, get, post};
use axum::Router;
use handlers::{auth, comments, drive, office};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::root,
        auth::health,
        auth::login,
        auth::callback,
        drive::list_files,
        drive::search,
        drive::navigate,
        drive::navigate_root,
        drive::delete_object,
        office::create_document,
        office::get_document,
        office::create_spreadsheet,
        office::get_spreadsheet,
        office::add_sheet,
        office::get_sheet,
        office::first_sheet_values,
        office::create_presentation,
        office::get_presentation,
        comments::list_comments,
        comments::add_comment,
        comments::get_comment,
        comments::delete_comment,
        comments::add_reply,
        comments::resolve_comment,
    ),
    components(schemas(
        api_shared::HealthRes,
        api_shared::DriveObject,
        api_shared::MessageRes,
        api_shared::ErrorRes,
        api_shared::FileNamesRes,
        api_shared::NewSheetReq,
        api_shared::CommentReq,
        api_shared::ReplyReq,
    ))
)]
pub struct ApiDoc;

/// Builds the application router with Swagger UI, CORS and request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(auth::root))
        .route("/health", get(auth::health))
        .route("/login", get(auth::login))
        .route("/callback", get(auth::callback))
        .route("/drive/files", get(drive::list_files))
        .route("/drive/search", get(drive::search))
        .route("/drive/navigate", get(drive::navigate_root))
        .route("/drive/navigate/*path", get(drive::navigate))
        .route("/drive/document", post(office::create_document))
        .route("/drive/document/:id", get(office::get_document))
        .route("/drive/spreadsheets", post(office::create_spreadsheet))
        .route("/drive/spreadsheets/:id", get(office::get_spreadsheet))
        .route("/drive/spreadsheets/:id/sheets", post(office::add_sheet))
        .route("/drive/spreadsheets/:id/sheets/:name", get(office::get_sheet))
        .route("/drive/spreadsheet/:id", get(office::first_sheet_values))
        .route("/drive/slides", post(office::create_presentation))
        .route("/drive/slides/:id", get(office::get_presentation))
        .route("/drive/:id", delete(drive::delete_object))
        .route(
            "/drive/:id/comment",
            get(comments::list_comments).post(comments::add_comment),
        )
        .route(
            "/drive/:id/comment/:comment_id",
            get(comments::get_comment).delete(comments::delete_comment),
        )
        .route("/drive/:id/comment/:comment_id/reply", post(comments::add_reply))
        .route(
            "/drive/:id/comment/:comment_id/resolve",
            post(comments::resolve_comment),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_shared::auth::SESSION_COOKIE;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use drive_core::constants::{DOCUMENT_MIME_TYPE, FOLDER_MIME_TYPE, SPREADSHEET_MIME_TYPE};
    use drive_core::google::oauth::{ClientSecrets, OAuthClient, OAuthSettings};
    use drive_core::memory::MemoryStore;
    use drive_core::{
        AmbiguityPolicy, CoreConfig, Credential, DriveResult, OfficeApi, RemoteObject,
        SharedBackend,
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    const SESSION: &str = "test-session";

    struct EchoOffice;

    #[axum::async_trait]
    impl OfficeApi for EchoOffice {
        async fn create_document(&self, title: &str) -> DriveResult<Value> {
            Ok(json!({ "documentId": "new-doc", "title": title }))
        }
        async fn get_document(&self, id: &str) -> DriveResult<Value> {
            Ok(json!({ "documentId": id }))
        }
        async fn create_spreadsheet(&self, title: &str) -> DriveResult<Value> {
            Ok(json!({ "properties": { "title": title } }))
        }
        async fn get_spreadsheet(&self, id: &str) -> DriveResult<Value> {
            Ok(json!({
                "spreadsheetId": id,
                "sheets": [{ "properties": { "title": "Jan" } }]
            }))
        }
        async fn batch_update_spreadsheet(&self, _id: &str, body: Value) -> DriveResult<Value> {
            Ok(body)
        }
        async fn get_values(&self, _id: &str, range: &str) -> DriveResult<Value> {
            Ok(json!({ "range": range, "values": [["1"]] }))
        }
        async fn create_presentation(&self, title: &str) -> DriveResult<Value> {
            Ok(json!({ "title": title }))
        }
        async fn get_presentation(&self, id: &str) -> DriveResult<Value> {
            Ok(json!({ "presentationId": id }))
        }
        async fn list_comments(&self, _file_id: &str) -> DriveResult<Value> {
            Ok(json!({ "comments": [] }))
        }
        async fn get_comment(&self, _file_id: &str, comment_id: &str) -> DriveResult<Value> {
            Ok(json!({ "id": comment_id }))
        }
        async fn create_comment(&self, _file_id: &str, body: Value) -> DriveResult<Value> {
            Ok(body)
        }
        async fn update_comment(
            &self,
            _file_id: &str,
            _comment_id: &str,
            body: Value,
        ) -> DriveResult<Value> {
            Ok(body)
        }
        async fn delete_comment(&self, _file_id: &str, _comment_id: &str) -> DriveResult<()> {
            Ok(())
        }
        async fn create_reply(
            &self,
            _file_id: &str,
            _comment_id: &str,
            body: Value,
        ) -> DriveResult<Value> {
            Ok(body)
        }
    }

    fn credential() -> Credential {
        Credential {
            token: "token".into(),
            refresh_token: None,
            token_uri: "https://oauth2.googleapis.com/token".into(),
            client_id: "client".into(),
            client_secret: "secret".into(),
            scopes: vec![],
            expiry: None,
        }
    }

    fn reports() -> MemoryStore {
        MemoryStore::new()
            .with(RemoteObject::folder("reports", "Reports", "root"))
            .with(RemoteObject::folder("q1", "Q1", "reports"))
            .with(RemoteObject::file("sum", "summary.txt", "text/plain", "q1"))
            .with(RemoteObject::file("raw", "raw.csv", "text/csv", "q1"))
            .with(RemoteObject::file("doc", "Notes", DOCUMENT_MIME_TYPE, "root"))
            .with(RemoteObject::file("sheet", "Budget", SPREADSHEET_MIME_TYPE, "root"))
    }

    fn state_with(store: MemoryStore, cfg: CoreConfig) -> AppState {
        let backend = SharedBackend::new(Arc::new(store), Arc::new(EchoOffice));
        AppState::new(Arc::new(cfg), Arc::new(backend), None)
    }

    async fn logged_in(store: MemoryStore) -> Router {
        let state = state_with(store, CoreConfig::default());
        state.sessions.set_credential(SESSION, credential()).await;
        router(state)
    }

    async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::COOKIE, format!("{SESSION_COOKIE}={SESSION}"));
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = app.oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        send(app, Method::GET, uri, None).await
    }

    #[tokio::test]
    async fn navigate_lists_folder_with_full_paths() {
        let (status, body) = get(logged_in(reports()).await, "/drive/navigate/Reports/Q1").await;

        assert_eq!(status, StatusCode::OK);
        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["name"], "summary.txt");
        assert_eq!(items[0]["path"], "/Reports/Q1/summary.txt");
        assert_eq!(items[0]["parent_id"], "q1");
        assert_eq!(items[0]["kind"], "file");
    }

    #[tokio::test]
    async fn navigate_filters_by_mime_type() {
        let (status, body) = get(
            logged_in(reports()).await,
            "/drive/navigate/Reports/Q1?mimeType=text/csv",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["path"], "/Reports/Q1/raw.csv");
    }

    #[tokio::test]
    async fn navigate_root_lists_top_level() {
        let (status, body) = get(logged_in(reports()).await, "/drive/navigate").await;
        assert_eq!(status, StatusCode::OK);
        let paths: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o["path"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(paths, ["/Reports", "/Notes", "/Budget"]);
    }

    #[tokio::test]
    async fn search_by_name_returns_single_match() {
        let (status, body) = get(logged_in(reports()).await, "/drive/search?name=summary").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{
                "id": "sum",
                "name": "summary.txt",
                "mimeType": "text/plain",
                "kind": "file",
                "path": "/Reports/Q1/summary.txt",
                "parent_id": "q1"
            }])
        );
    }

    #[tokio::test]
    async fn navigate_unknown_folder_is_not_found() {
        let (status, body) = get(logged_in(reports()).await, "/drive/navigate/NoSuchFolder").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["detail"].as_str().unwrap().contains("NoSuchFolder"));
    }

    #[tokio::test]
    async fn ambiguous_folder_is_a_conflict_by_default() {
        let store = reports().with(RemoteObject::folder("reports2", "Reports", "root"));
        let (status, _) = get(logged_in(store).await, "/drive/navigate/Reports/Q1").await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn first_match_policy_takes_the_first_folder() {
        let store = reports().with(RemoteObject::folder("reports2", "Reports", "root"));
        let cfg = CoreConfig::new(
            drive_core::ObjectId::root(),
            AmbiguityPolicy::FirstMatch,
            16,
        )
        .unwrap();
        let state = state_with(store, cfg);
        state.sessions.set_credential(SESSION, credential()).await;

        let (status, body) = get(router(state), "/drive/navigate/Reports/Q1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn search_without_matches_for_a_name_is_not_found() {
        let (status, body) = get(logged_in(reports()).await, "/drive/search?name=zzz").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["detail"].as_str().unwrap().contains("zzz"));
    }

    #[tokio::test]
    async fn search_with_unreachable_ancestor_is_a_gateway_error() {
        let store = reports();
        store.remove("q1");
        let (status, body) = get(logged_in(store).await, "/drive/search?name=summary").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["detail"]
            .as_str()
            .unwrap()
            .starts_with("failed to build path for sum"));
    }

    #[tokio::test]
    async fn search_without_matches_for_a_mime_type_is_empty() {
        let (status, body) =
            get(logged_in(reports()).await, "/drive/search?mimeType=image/png").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn search_without_filter_on_empty_root_returns_message() {
        let (status, body) = get(logged_in(MemoryStore::new()).await, "/drive/search").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "No files found." }));
    }

    #[tokio::test]
    async fn search_by_folder_mime_type() {
        let uri = format!("/drive/search?mimeType={FOLDER_MIME_TYPE}");
        let (status, body) = get(logged_in(reports()).await, &uri).await;
        assert_eq!(status, StatusCode::OK);
        let paths: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o["path"].as_str().unwrap().to_string())
            .collect();
        // The root folder itself is parentless and comes out as `/My Drive`.
        assert_eq!(paths, ["/My Drive", "/Reports", "/Reports/Q1"]);
    }

    #[tokio::test]
    async fn delete_then_delete_again() {
        let app = logged_in(reports()).await;
        let (status, body) = send(app.clone(), Method::DELETE, "/drive/sum", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, _) = send(app, Method::DELETE, "/drive/sum", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_id_is_rejected() {
        let (status, _) = send(
            logged_in(reports()).await,
            Method::DELETE,
            "/drive/bad%20id",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn drive_routes_require_a_session() {
        let app = router(state_with(reports(), CoreConfig::default()));
        let request = Request::builder()
            .uri("/drive/search?name=summary")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
    }

    #[tokio::test]
    async fn unknown_session_is_unauthenticated() {
        let app = router(state_with(reports(), CoreConfig::default()));
        let (status, body) = get(app, "/drive/files").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["detail"], "Not authenticated");
    }

    #[tokio::test]
    async fn quick_file_listing() {
        let (status, body) = get(logged_in(reports()).await, "/drive/files").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["files"].as_array().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn public_routes() {
        let app = router(state_with(reports(), CoreConfig::default()));
        let (status, body) = get(app.clone(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);

        let (status, body) = get(app.clone(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Welcome to the Drive API");

        let (status, body) = get(app, "/api-docs/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/drive/search"].is_object());
    }

    #[tokio::test]
    async fn login_is_unavailable_without_client_secrets() {
        let app = router(state_with(reports(), CoreConfig::default()));
        let (status, _) = get(app, "/login").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn login_sets_session_and_redirects_to_consent() {
        let secrets = ClientSecrets::from_json(
            r#"{"web": {
                "client_id": "abc",
                "client_secret": "s3cret",
                "auth_uri": "https://accounts.example.test/auth",
                "token_uri": "https://accounts.example.test/token"
            }}"#,
        )
        .unwrap();
        let settings = OAuthSettings::new(secrets, "http://localhost:8000/callback");
        let oauth = OAuthClient::new(drive_core::google::http_client().unwrap(), settings);
        let mut state = state_with(reports(), CoreConfig::default());
        state.oauth = Some(Arc::new(oauth));
        let sessions = state.sessions.clone();
        let app = router(state);

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/login").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response.headers()[header::LOCATION].to_str().unwrap();
        assert!(location.starts_with("https://accounts.example.test/auth?"));
        assert!(location.contains("access_type=offline"));

        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        let pair = cookie.split(';').next().unwrap().to_string();
        let session_id = pair.split_once('=').unwrap().1.to_string();
        assert!(sessions.get(&session_id).await.unwrap().oauth_state.is_some());

        // A forged state is rejected and drops the pending session.
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/callback?code=abc&state=forged")
                    .header(header::COOKIE, pair)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(sessions.get(&session_id).await.is_none());
        assert_eq!(sessions.len().await, 0);
    }

    #[tokio::test]
    async fn typed_document_read_checks_kind() {
        let app = logged_in(reports()).await;
        let (status, body) = get(app.clone(), "/drive/document/doc").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["documentId"], "doc");

        let (status, body) = get(app, "/drive/document/sum").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "File is not a document.");
    }

    #[tokio::test]
    async fn spreadsheet_routes() {
        let app = logged_in(reports()).await;

        let (status, body) = get(app.clone(), "/drive/spreadsheet/sheet").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["range"], "'Jan'");

        let (status, body) = get(app.clone(), "/drive/spreadsheets/sheet/sheets/Jan").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["properties"]["title"], "Jan");

        let (status, _) = get(app.clone(), "/drive/spreadsheets/sheet/sheets/Dec").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(
            app,
            Method::POST,
            "/drive/spreadsheets/sheet/sheets",
            Some(json!({ "name": "Totals" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["requests"][0]["addSheet"]["properties"]["title"], "Totals");
    }

    #[tokio::test]
    async fn comment_routes() {
        let app = logged_in(reports()).await;

        let (status, body) = send(
            app.clone(),
            Method::POST,
            "/drive/doc/comment",
            Some(json!({ "content": "Nice", "anchor": "kix.1" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "content": "Nice", "anchor": "kix.1" }));

        let (status, body) = send(app.clone(), Method::POST, "/drive/doc/comment/c1/resolve", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "resolved": true }));

        let (status, body) = send(app, Method::DELETE, "/drive/doc/comment/c1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Comment c1 deleted successfully");
    }
}
