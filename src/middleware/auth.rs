use axum::{
    extract::{FromRef, FromRequestParts},
    http::header,
};

use crate::{dto::auth::TokenType, error::AppError, jwt::JwtKeys, state::AppState};

/// Caller identified by a valid access token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i32,
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(value: &str) -> Result<&str, AppError> {
    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid Authorization scheme".into()))?
        .trim();
    if token.is_empty() {
        return Err(AppError::Unauthorized("Missing bearer token".into()));
    }
    Ok(token)
}

pub fn authenticate(keys: &JwtKeys, header_value: &str) -> Result<AuthUser, AppError> {
    let token = bearer_token(header_value)?;
    let claims = keys.verify(token, TokenType::Access)?;
    Ok(AuthUser {
        user_id: claims.user_id()?,
    })
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;
    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid Authorization header".into()))?;

        let state = AppState::from_ref(state);
        authenticate(&state.jwt, auth_str)
    }
}
