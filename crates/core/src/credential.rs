//! Delegated-authorization credential.
//!
//! A [`Credential`] is created by the login callback, stored in the caller's session, replaced in
//! place whenever it is refreshed, and handed to the core per request. The core never keeps one
//! beyond the request that received it.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Refresh a little before the provider would reject the token.
const EXPIRY_SKEW_SECONDS: i64 = 30;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub token_uri: String,
    pub client_id: String,
    pub client_secret: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
}

impl Credential {
    /// True once `now` is within the skew window of the expiry. Credentials without an expiry
    /// never expire locally.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry
            .is_some_and(|expiry| expiry - Duration::seconds(EXPIRY_SKEW_SECONDS) <= now)
    }

    pub fn can_refresh(&self) -> bool {
        self.refresh_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        self.is_expired(now) && self.can_refresh()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "<redacted>"),
            )
            .field("token_uri", &self.token_uri)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("scopes", &self.scopes)
            .field("expiry", &self.expiry)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential(expiry: Option<DateTime<Utc>>, refresh: Option<&str>) -> Credential {
        Credential {
            token: "ya29.secret".into(),
            refresh_token: refresh.map(str::to_string),
            token_uri: "https://oauth2.googleapis.com/token".into(),
            client_id: "client".into(),
            client_secret: "shh".into(),
            scopes: vec!["openid".into()],
            expiry,
        }
    }

    #[test]
    fn expiry_respects_skew() {
        let now = Utc::now();
        assert!(!credential(None, None).is_expired(now));
        assert!(!credential(Some(now + Duration::minutes(10)), None).is_expired(now));
        assert!(credential(Some(now + Duration::seconds(10)), None).is_expired(now));
        assert!(credential(Some(now - Duration::minutes(1)), None).is_expired(now));
    }

    #[test]
    fn refresh_needs_a_refresh_token() {
        let now = Utc::now();
        let past = Some(now - Duration::minutes(1));
        assert!(!credential(past, None).needs_refresh(now));
        assert!(!credential(past, Some("")).needs_refresh(now));
        assert!(credential(past, Some("1//refresh")).needs_refresh(now));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let rendered = format!("{:?}", credential(None, Some("1//refresh")));
        assert!(!rendered.contains("ya29.secret"));
        assert!(!rendered.contains("1//refresh"));
        assert!(!rendered.contains("shh"));
        assert!(rendered.contains("client"));
    }
}
