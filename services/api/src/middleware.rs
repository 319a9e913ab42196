//! Authorization gate for routes that change appointments

use axum::{
    body::Body,
    extract::State,
    http::{Request, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use tracing::warn;
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

pub const LOGIN_REQUIRED: &str = "Login required to access this route";

/// Authenticated user information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

/// Reject the request unless it carries a valid session token
///
/// The `Authorization` header holds the raw token; a `Bearer ` prefix is
/// accepted and stripped. On success the token's user is inserted into the
/// request extensions as [`AuthUser`].
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .map(|value| value.to_str())
        .transpose()
        .map_err(|_| {
            ApiError::Unauthorized(
                "Token verification failed: authorization header is not valid text".to_string(),
            )
        })?;

    let token = header
        .map(|value| value.trim())
        .map(|value| value.strip_prefix("Bearer ").unwrap_or(value).trim())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::Unauthorized(LOGIN_REQUIRED.to_string()))?;

    let claims = state.credentials.tokens().verify_token(token).map_err(|e| {
        warn!("Rejected session token: {}", e);
        ApiError::from(e)
    })?;

    req.extensions_mut().insert(AuthUser {
        id: claims.user_id,
        email: claims.email,
    });

    Ok(next.run(req).await)
}
