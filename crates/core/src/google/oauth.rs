//! OAuth 2.0 authorization-code flow and token refresh.

use super::check_status;
use crate::constants::DEFAULT_SCOPES;
use crate::credential::Credential;
use crate::{DriveError, DriveResult};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::path::Path;

/// OAuth client registration, as found in a downloaded `client_secret.json`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ClientSecrets {
    pub client_id: String,
    pub client_secret: String,
    pub auth_uri: String,
    pub token_uri: String,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
}

#[derive(Deserialize)]
struct ClientSecretsFile {
    web: Option<ClientSecrets>,
    installed: Option<ClientSecrets>,
}

impl ClientSecrets {
    /// Parses the provider's client secrets format (`{"web": {...}}` or `{"installed": {...}}`).
    pub fn from_json(raw: &str) -> DriveResult<Self> {
        let file: ClientSecretsFile = serde_json::from_str(raw)?;
        file.web.or(file.installed).ok_or_else(|| {
            DriveError::InvalidInput("client secrets must contain a 'web' or 'installed' entry".into())
        })
    }

    pub fn from_file(path: &Path) -> DriveResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(DriveError::FileRead)?;
        Self::from_json(&raw)
    }
}

/// Everything needed to run the login flow, resolved at startup.
#[derive(Clone, Debug)]
pub struct OAuthSettings {
    pub secrets: ClientSecrets,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
}

impl OAuthSettings {
    pub fn new(secrets: ClientSecrets, redirect_uri: impl Into<String>) -> Self {
        Self {
            secrets,
            redirect_uri: redirect_uri.into(),
            scopes: DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        if !scopes.is_empty() {
            self.scopes = scopes;
        }
        self
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: Option<String>,
}

pub struct OAuthClient {
    http: reqwest::Client,
    settings: OAuthSettings,
}

impl OAuthClient {
    pub fn new(http: reqwest::Client, settings: OAuthSettings) -> Self {
        Self { http, settings }
    }

    pub fn settings(&self) -> &OAuthSettings {
        &self.settings
    }

    /// The consent page URL. Requests offline access so a refresh token is issued.
    pub fn authorization_url(&self, state: &str) -> DriveResult<String> {
        let scope = self.settings.scopes.join(" ");
        let url = reqwest::Url::parse_with_params(
            &self.settings.secrets.auth_uri,
            &[
                ("response_type", "code"),
                ("client_id", self.settings.secrets.client_id.as_str()),
                ("redirect_uri", self.settings.redirect_uri.as_str()),
                ("scope", scope.as_str()),
                ("state", state),
                ("access_type", "offline"),
                ("include_granted_scopes", "true"),
            ],
        )
        .map_err(|e| DriveError::InvalidInput(format!("invalid auth_uri: {e}")))?;
        Ok(url.into())
    }

    /// Exchanges an authorization code for a credential.
    pub async fn exchange_code(&self, code: &str) -> DriveResult<Credential> {
        let secrets = &self.settings.secrets;
        let response = self
            .http
            .post(&secrets.token_uri)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", secrets.client_id.as_str()),
                ("client_secret", secrets.client_secret.as_str()),
                ("redirect_uri", self.settings.redirect_uri.as_str()),
            ])
            .send()
            .await?;
        let token: TokenResponse = check_status(response).await?.json().await?;
        tracing::info!("exchanged authorization code for credential");
        Ok(credential_from_token(token, None, &self.settings, Utc::now()))
    }

    /// Returns a refreshed copy of `credential`.
    pub async fn refresh(&self, credential: &Credential) -> DriveResult<Credential> {
        let refresh_token = credential
            .refresh_token
            .as_deref()
            .ok_or(DriveError::Unauthenticated)?;
        let response = self
            .http
            .post(&credential.token_uri)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
                ("client_id", credential.client_id.as_str()),
                ("client_secret", credential.client_secret.as_str()),
            ])
            .send()
            .await?;
        let token: TokenResponse = check_status(response).await?.json().await?;
        tracing::debug!("refreshed credential");
        Ok(credential_from_token(
            token,
            Some(credential),
            &self.settings,
            Utc::now(),
        ))
    }
}

/// Builds a credential from a token response. A refresh response that omits the refresh token or
/// scopes keeps the previous ones.
fn credential_from_token(
    token: TokenResponse,
    previous: Option<&Credential>,
    settings: &OAuthSettings,
    now: DateTime<Utc>,
) -> Credential {
    let scopes = match token.scope {
        Some(scope) => scope.split_whitespace().map(str::to_string).collect(),
        None => previous
            .map(|p| p.scopes.clone())
            .unwrap_or_else(|| settings.scopes.clone()),
    };

    Credential {
        token: token.access_token,
        refresh_token: token
            .refresh_token
            .or_else(|| previous.and_then(|p| p.refresh_token.clone())),
        token_uri: previous
            .map(|p| p.token_uri.clone())
            .unwrap_or_else(|| settings.secrets.token_uri.clone()),
        client_id: settings.secrets.client_id.clone(),
        client_secret: settings.secrets.client_secret.clone(),
        scopes,
        expiry: token.expires_in.map(|secs| now + Duration::seconds(secs)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SECRETS: &str = r#"{
        "web": {
            "client_id": "abc.apps.googleusercontent.com",
            "client_secret": "s3cret",
            "auth_uri": "https://accounts.google.com/o/oauth2/auth",
            "token_uri": "https://oauth2.googleapis.com/token",
            "redirect_uris": ["http://localhost:8000/callback"]
        }
    }"#;

    fn settings() -> OAuthSettings {
        OAuthSettings::new(
            ClientSecrets::from_json(SECRETS).unwrap(),
            "http://localhost:8000/callback",
        )
    }

    #[test]
    fn parses_web_and_installed_secrets() {
        let web = ClientSecrets::from_json(SECRETS).unwrap();
        assert_eq!(web.client_id, "abc.apps.googleusercontent.com");

        let installed = ClientSecrets::from_json(&SECRETS.replace("\"web\"", "\"installed\"")).unwrap();
        assert_eq!(installed, web);

        assert!(matches!(
            ClientSecrets::from_json(r#"{"other": {}}"#),
            Err(DriveError::InvalidInput(_))
        ));
    }

    #[test]
    fn reads_secrets_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SECRETS.as_bytes()).unwrap();
        let secrets = ClientSecrets::from_file(file.path()).unwrap();
        assert_eq!(secrets.client_secret, "s3cret");

        assert!(matches!(
            ClientSecrets::from_file(Path::new("/definitely/not/here.json")),
            Err(DriveError::FileRead(_))
        ));
    }

    #[test]
    fn authorization_url_requests_offline_access() {
        let client = OAuthClient::new(reqwest::Client::new(), settings());
        let url = reqwest::Url::parse(&client.authorization_url("xyz").unwrap()).unwrap();
        let params: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();

        assert_eq!(url.host_str(), Some("accounts.google.com"));
        assert_eq!(params["state"], "xyz");
        assert_eq!(params["access_type"], "offline");
        assert_eq!(params["redirect_uri"], "http://localhost:8000/callback");
        assert!(params["scope"].contains("https://www.googleapis.com/auth/drive"));
    }

    #[test]
    fn scope_override_ignores_empty_list() {
        let s = settings().with_scopes(vec![]);
        assert_eq!(s.scopes.len(), DEFAULT_SCOPES.len());
        let s = settings().with_scopes(vec!["openid".into()]);
        assert_eq!(s.scopes, ["openid"]);
    }

    #[test]
    fn initial_token_builds_full_credential() {
        let now = Utc::now();
        let token = TokenResponse {
            access_token: "at".into(),
            expires_in: Some(3600),
            refresh_token: Some("rt".into()),
            scope: Some("openid https://www.googleapis.com/auth/drive".into()),
        };
        let cred = credential_from_token(token, None, &settings(), now);

        assert_eq!(cred.token, "at");
        assert_eq!(cred.refresh_token.as_deref(), Some("rt"));
        assert_eq!(cred.token_uri, "https://oauth2.googleapis.com/token");
        assert_eq!(cred.scopes.len(), 2);
        assert_eq!(cred.expiry, Some(now + Duration::seconds(3600)));
    }

    #[test]
    fn refresh_keeps_previous_refresh_token_and_scopes() {
        let now = Utc::now();
        let previous = Credential {
            token: "old".into(),
            refresh_token: Some("rt".into()),
            token_uri: "https://example.test/token".into(),
            client_id: "abc.apps.googleusercontent.com".into(),
            client_secret: "s3cret".into(),
            scopes: vec!["openid".into()],
            expiry: None,
        };
        let token = TokenResponse {
            access_token: "new".into(),
            expires_in: None,
            refresh_token: None,
            scope: None,
        };
        let cred = credential_from_token(token, Some(&previous), &settings(), now);

        assert_eq!(cred.token, "new");
        assert_eq!(cred.refresh_token.as_deref(), Some("rt"));
        assert_eq!(cred.token_uri, "https://example.test/token");
        assert_eq!(cred.scopes, ["openid"]);
        assert_eq!(cred.expiry, None);
    }
}
