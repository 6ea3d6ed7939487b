use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::http::{self};
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use super::ApiResponseBody;
use crate::domain::user::ports::AuthServicePort;
use crate::domain::user::ports::UserRepository;
use crate::inbound::http::router::AppState;

/// Validate the token carried in the `Authorization` header.
///
/// Every failure mode (missing/unreadable header, malformed token, bad
/// signature, expiry, stale subject) collapses to the same unauthorized
/// `{valid: false}` response; detail is logged, never returned.
pub async fn validate<R: UserRepository>(
    State(state): State<AppState<R>>,
    headers: HeaderMap,
) -> Response {
    let Some(token) = bearer_token(&headers) else {
        return invalid_token_response();
    };

    match state.auth_service.validate(token).await {
        Ok(identity) => (
            StatusCode::OK,
            Json(ApiResponseBody::new(
                StatusCode::OK,
                ValidateResponseData {
                    valid: true,
                    display_name: Some(identity.display_name),
                    email: Some(identity.email.as_str().to_string()),
                    authority: Some(identity.authority),
                },
            )),
        )
            .into_response(),
        Err(_) => invalid_token_response(),
    }
}

/// Extract the token from the `Authorization` header, stripping the
/// `Bearer ` prefix when present. A bare token is accepted as-is.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(http::header::AUTHORIZATION)?.to_str().ok()?;
    Some(value.strip_prefix("Bearer ").unwrap_or(value))
}

fn invalid_token_response() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponseBody::new(
            StatusCode::UNAUTHORIZED,
            ValidateResponseData {
                valid: false,
                display_name: None,
                email: None,
                authority: None,
            },
        )),
    )
        .into_response()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidateResponseData {
    pub valid: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub authority: Option<String>,
}
