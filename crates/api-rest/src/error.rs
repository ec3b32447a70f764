//! Mapping of core errors onto HTTP responses.

use api_shared::ErrorRes;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use drive_core::DriveError;

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn unauthenticated() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Not authenticated")
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

/// HTTP status for a core error. Upstream statuses are passed through.
///
/// A match whose path could not be built is a gateway failure, never `404`, so it cannot be
/// mistaken for an empty search.
pub fn status_for(err: &DriveError) -> StatusCode {
    match err {
        DriveError::PathNotFound { .. }
        | DriveError::ObjectNotFound(_)
        | DriveError::SheetNotFound(_) => StatusCode::NOT_FOUND,
        DriveError::AmbiguousPath { .. } => StatusCode::CONFLICT,
        DriveError::WrongKind { .. } | DriveError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        DriveError::Unauthenticated => StatusCode::UNAUTHORIZED,
        DriveError::AncestorLookup { source, .. } => match **source {
            DriveError::Unauthenticated => StatusCode::UNAUTHORIZED,
            _ => StatusCode::BAD_GATEWAY,
        },
        DriveError::Remote { status, .. } => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        DriveError::Http(_) => StatusCode::BAD_GATEWAY,
        DriveError::DepthExceeded { .. }
        | DriveError::CyclicAncestry { .. }
        | DriveError::Decode(_)
        | DriveError::FileRead(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DriveError> for ApiError {
    fn from(err: DriveError) -> Self {
        let status = status_for(&err);
        tracing::error!(%status, "request failed: {err}");
        let detail = match err {
            DriveError::Unauthenticated => "Not authenticated".to_string(),
            DriveError::WrongKind { expected, .. } => {
                format!("File is not a {expected}.")
            }
            other => other.to_string(),
        };
        Self::new(status, detail)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorRes {
            detail: self.detail,
        });
        if self.status == StatusCode::UNAUTHORIZED {
            (self.status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response()
        } else {
            (self.status, body).into_response()
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_to_statuses() {
        let cases = [
            (
                DriveError::PathNotFound {
                    resolved: "/a".into(),
                    segment: "b".into(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                DriveError::AmbiguousPath {
                    resolved: "".into(),
                    segment: "a".into(),
                    candidates: 2,
                },
                StatusCode::CONFLICT,
            ),
            (
                DriveError::WrongKind {
                    id: "x".into(),
                    expected: "document",
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                DriveError::DepthExceeded {
                    id: "x".into(),
                    max_depth: 3,
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                DriveError::Remote {
                    status: 403,
                    detail: "forbidden".into(),
                },
                StatusCode::FORBIDDEN,
            ),
            (
                DriveError::Remote {
                    status: 42,
                    detail: "".into(),
                },
                StatusCode::BAD_GATEWAY,
            ),
            (DriveError::Unauthenticated, StatusCode::UNAUTHORIZED),
        ];
        for (err, status) in cases {
            assert_eq!(status_for(&err), status, "{err}");
        }
    }

    #[test]
    fn failed_ancestor_lookup_is_a_gateway_error() {
        let missing = DriveError::AncestorLookup {
            id: "sum".into(),
            source: Box::new(DriveError::ObjectNotFound("q1".into())),
        };
        assert_eq!(status_for(&missing), StatusCode::BAD_GATEWAY);

        let expired = DriveError::AncestorLookup {
            id: "sum".into(),
            source: Box::new(DriveError::Unauthenticated),
        };
        assert_eq!(status_for(&expired), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn unauthorized_response_carries_challenge() {
        let response = ApiError::from(DriveError::Unauthenticated).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
    }

    #[test]
    fn wrong_kind_detail_names_the_expected_kind() {
        let err = ApiError::from(DriveError::WrongKind {
            id: "x".into(),
            expected: "spreadsheet",
        });
        assert_eq!(err.detail(), "File is not a spreadsheet.");
    }
}
