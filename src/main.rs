use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use drive_core::google::HttpClient;
use drive_core::google::oauth::{ClientSecrets, OAuthClient, OAuthSettings};
use drive_core::{GoogleBackend, core_config_from_env_values};

/// Builds the OAuth client, or `None` when the client secrets file is absent.
///
/// A missing file is tolerated so the server can still serve `/health` and the docs; a file that
/// exists but cannot be parsed is an error.
fn oauth_client(
    http: HttpClient,
    secrets_file: &str,
    public_url: &str,
    scopes: Option<String>,
) -> anyhow::Result<Option<OAuthClient>> {
    let path = Path::new(secrets_file);
    if !path.exists() {
        tracing::warn!(
            "client secrets file {} not found, login is disabled",
            path.display()
        );
        return Ok(None);
    }

    let secrets = ClientSecrets::from_file(path)?;
    let redirect_uri = format!("{}/callback", public_url.trim_end_matches('/'));
    let scopes = scopes
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let settings = OAuthSettings::new(secrets, redirect_uri).with_scopes(scopes);
    Ok(Some(OAuthClient::new(http, settings)))
}

/// Main entry point for the drive REST server
///
/// # Environment Variables
/// - `DRIVE_REST_ADDR`: Server address (default: "0.0.0.0:8000")
/// - `DRIVE_PUBLIC_URL`: Externally visible base URL, used for the OAuth redirect (default:
///   "http://localhost:8000")
/// - `CLIENT_SECRETS_FILE`: OAuth client secrets JSON (default: "client_secret.json")
/// - `DRIVE_SCOPES`: Comma-separated scope override
/// - `DRIVE_ROOT_ID`: Folder that paths are resolved from (default: "root")
/// - `DRIVE_AMBIGUITY_POLICY`: `reject` or `first` (default: "reject")
/// - `DRIVE_MAX_PATH_DEPTH`: Ancestor walk limit (default: 64)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - a configuration value is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("drive_run=info".parse()?)
                .add_directive("drive_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("DRIVE_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".into());
    let public_url =
        std::env::var("DRIVE_PUBLIC_URL").unwrap_or_else(|_| "http://localhost:8000".into());
    let secrets_file =
        std::env::var("CLIENT_SECRETS_FILE").unwrap_or_else(|_| "client_secret.json".into());

    let cfg = Arc::new(core_config_from_env_values(
        std::env::var("DRIVE_ROOT_ID").ok(),
        std::env::var("DRIVE_AMBIGUITY_POLICY").ok(),
        std::env::var("DRIVE_MAX_PATH_DEPTH").ok(),
    )?);

    let http = drive_core::google::http_client()?;
    let oauth = oauth_client(
        http.clone(),
        &secrets_file,
        &public_url,
        std::env::var("DRIVE_SCOPES").ok(),
    )?;

    let state = AppState::new(
        cfg,
        Arc::new(GoogleBackend::new(http)),
        oauth.map(Arc::new),
    );
    let app = api_rest::router(state);

    tracing::info!("++ Starting drive REST API on {}", rest_addr);
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
