use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::{entity::users, jwt::TokenPair};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    #[default]
    Simple,
    Bronze,
    Silver,
    Gold,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Simple => "simple",
            UserStatus::Bronze => "bronze",
            UserStatus::Silver => "silver",
            UserStatus::Gold => "gold",
        }
    }
}

/// Registration payload. `password` is write-only: it is hashed and never
/// echoed back. Length limits mirror the `users` columns.
#[derive(Deserialize, Debug, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(
        length(max = 150, message = "username must be at most 150 characters"),
        custom(function = "not_blank", message = "username may not be blank")
    )]
    pub username: String,
    #[validate(
        email(message = "Enter a valid email address"),
        length(max = 254, message = "email must be at most 254 characters")
    )]
    pub email: String,
    #[validate(length(min = 1, message = "password may not be blank"))]
    pub password: String,
    #[serde(default)]
    #[validate(length(max = 150, message = "first_name must be at most 150 characters"))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 150, message = "last_name must be at most 150 characters"))]
    pub last_name: String,
    #[validate(range(min = 0, max = 150, message = "age must be between 0 and 150"))]
    pub age: Option<i16>,
    #[validate(length(max = 32, message = "phone_number must be at most 32 characters"))]
    pub phone_number: Option<String>,
    pub status: Option<UserStatus>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenUser {
    pub username: String,
    pub email: String,
}

/// Payload returned by registration and login.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthTokens {
    pub user: TokenUser,
    pub access: String,
    pub refresh: String,
}

impl AuthTokens {
    pub fn new(user: &users::Model, tokens: TokenPair) -> Self {
        Self {
            user: TokenUser {
                username: user.username.clone(),
                email: user.email.clone(),
            },
            access: tokens.access,
            refresh: tokens.refresh,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AccessToken {
    pub access: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub token_type: TokenType,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}
