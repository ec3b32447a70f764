//! Session cookie handling.
//!
//! The server keeps credentials in memory keyed by an opaque session id; the browser only ever
//! holds that id, in the [`SESSION_COOKIE`] cookie.

pub const SESSION_COOKIE: &str = "drive_session";

/// Extracts the session id from a `Cookie` header value.
pub fn session_id_from_cookies(header: &str) -> Option<&str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value that stores `session_id` for the whole site.
pub fn session_cookie(session_id: &str) -> String {
    format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; SameSite=Lax")
}

/// Compares the `state` returned to the callback with the one issued at login.
pub fn state_matches(expected: Option<&str>, provided: &str) -> bool {
    match expected {
        Some(expected) => !provided.is_empty() && expected == provided,
        None => false,
    }
}
