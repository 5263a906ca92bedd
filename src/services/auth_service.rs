use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, Set, SqlErr,
    ActiveValue::NotSet,
};
use validator::Validate;

use crate::{
    audit,
    dto::auth::{
        AccessToken, AuthTokens, LoginRequest, RefreshRequest, RegisterRequest, TokenType,
    },
    entity::users::{self, ActiveModel, Entity as Users},
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
    state::AppState,
};

const INVALID_CREDENTIALS: &str = "No active account found with the given credentials";

pub fn validate_registration(payload: &RegisterRequest) -> AppResult<()> {
    payload.validate()?;
    Ok(())
}

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<AuthTokens>> {
    validate_registration(&payload)?;
    let RegisterRequest {
        username,
        email,
        password,
        first_name,
        last_name,
        age,
        phone_number,
        status,
    } = payload;
    let username = username.trim().to_string();
    let email = email.trim().to_string();

    let exist: Option<(String, String)> =
        sqlx::query_as("SELECT username, email FROM users WHERE username = $1 OR email = $2")
            .bind(username.as_str())
            .bind(email.as_str())
            .fetch_optional(&state.pool)
            .await?;

    if let Some((taken_username, _)) = exist {
        let field = if taken_username == username { "Username" } else { "Email" };
        return Err(AppError::BadRequest(format!("{field} is already taken")));
    }

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();

    let active = ActiveModel {
        id: NotSet,
        username: Set(username),
        email: Set(email),
        password_hash: Set(password_hash),
        first_name: Set(first_name),
        last_name: Set(last_name),
        age: Set(age),
        phone_number: Set(phone_number),
        status: Set(status.unwrap_or_default().as_str().to_string()),
        is_active: Set(true),
        date_registered: NotSet,
    };
    let user = active.insert(&state.orm).await.map_err(unique_violation)?;
    tracing::info!(user_id = user.id, username = %user.username, "user registered");

    let tokens = state.jwt.issue_pair(user.id)?;

    audit::record(
        &state.pool,
        Some(user.id),
        "user_register",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "User created",
        AuthTokens::new(&user, tokens),
        Some(Meta::empty()),
    ))
}

pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<AuthTokens>> {
    let LoginRequest { username, password } = payload;
    let user = Users::find()
        .filter(users::Column::Username.eq(username.trim()))
        .one(&state.orm)
        .await?;

    let user = match user {
        Some(u) => u,
        None => return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into())),
    };

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    let argon2 = Argon2::default();
    if argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
    }

    if !user.is_active {
        tracing::info!(user_id = user.id, "login rejected for inactive user");
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
    }

    let tokens = state.jwt.issue_pair(user.id)?;

    audit::record(
        &state.pool,
        Some(user.id),
        "user_login",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Logged in",
        AuthTokens::new(&user, tokens),
        Some(Meta::empty()),
    ))
}

pub async fn refresh_access(
    state: &AppState,
    payload: RefreshRequest,
) -> AppResult<ApiResponse<AccessToken>> {
    let claims = state.jwt.verify(&payload.refresh, TokenType::Refresh)?;
    let user_id = claims.user_id()?;

    let user = Users::find_by_id(user_id).one(&state.orm).await?;
    match user {
        Some(u) if u.is_active => {}
        _ => return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into())),
    }

    let access = state.jwt.issue(user_id, TokenType::Access)?;
    Ok(ApiResponse::success(
        "Token refreshed",
        AccessToken { access },
        Some(Meta::empty()),
    ))
}

fn unique_violation(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::BadRequest("Username or email is already taken".into())
        }
        _ => AppError::OrmError(err),
    }
}
