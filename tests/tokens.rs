use chrono::Duration;
use storeshop_api::{
    dto::auth::{RegisterRequest, TokenType},
    error::AppError,
    jwt::JwtKeys,
    middleware::auth::{authenticate, bearer_token},
    services::auth_service::validate_registration,
};

fn keys() -> JwtKeys {
    JwtKeys::new("test-secret", Duration::minutes(5), Duration::days(1))
}

#[test]
fn issued_pair_verifies_by_kind() {
    let keys = keys();
    let pair = keys.issue_pair(42).expect("tokens");
    assert_ne!(pair.access, pair.refresh);

    let access = keys.verify(&pair.access, TokenType::Access).expect("access");
    assert_eq!(access.user_id().unwrap(), 42);
    assert_eq!(access.token_type, TokenType::Access);
    assert!(access.exp > access.iat);

    let refresh = keys.verify(&pair.refresh, TokenType::Refresh).expect("refresh");
    assert_eq!(refresh.user_id().unwrap(), 42);
    assert!(refresh.exp > access.exp);
    assert_ne!(refresh.jti, access.jti);
}

#[test]
fn token_kinds_are_not_interchangeable() {
    let keys = keys();
    let pair = keys.issue_pair(1).unwrap();

    assert!(matches!(
        keys.verify(&pair.refresh, TokenType::Access),
        Err(AppError::Unauthorized(_))
    ));
    assert!(matches!(
        keys.verify(&pair.access, TokenType::Refresh),
        Err(AppError::Unauthorized(_))
    ));
}

#[test]
fn expired_and_foreign_tokens_are_rejected() {
    let expired = JwtKeys::new("test-secret", Duration::minutes(-10), Duration::days(1));
    let token = expired.issue(1, TokenType::Access).unwrap();
    assert!(keys().verify(&token, TokenType::Access).is_err());

    let other = JwtKeys::new("another-secret", Duration::minutes(5), Duration::days(1));
    let token = other.issue(1, TokenType::Access).unwrap();
    assert!(keys().verify(&token, TokenType::Access).is_err());

    assert!(keys().verify("not-a-jwt", TokenType::Access).is_err());
}

#[test]
fn bearer_header_parsing() {
    assert_eq!(bearer_token("Bearer abc.def").unwrap(), "abc.def");
    assert!(bearer_token("Basic abc").is_err());
    assert!(bearer_token("Bearer   ").is_err());
}

#[test]
fn authenticate_accepts_only_access_tokens() {
    let keys = keys();
    let pair = keys.issue_pair(7).unwrap();

    let user = authenticate(&keys, &format!("Bearer {}", pair.access)).expect("auth user");
    assert_eq!(user.user_id, 7);

    let err = authenticate(&keys, &format!("Bearer {}", pair.refresh)).unwrap_err();
    assert_eq!(err.status(), axum::http::StatusCode::UNAUTHORIZED);
}

fn registration() -> RegisterRequest {
    RegisterRequest {
        username: "ferris".into(),
        email: "ferris@example.com".into(),
        password: "crab-rave".into(),
        first_name: "Ferris".into(),
        last_name: "Crab".into(),
        age: Some(9),
        phone_number: None,
        status: None,
    }
}

#[test]
fn registration_validation() {
    assert!(validate_registration(&registration()).is_ok());

    let blank_username = RegisterRequest {
        username: "  ".into(),
        ..registration()
    };
    assert!(matches!(
        validate_registration(&blank_username),
        Err(AppError::BadRequest(_))
    ));

    let bad_email = RegisterRequest {
        email: "ferris".into(),
        ..registration()
    };
    assert!(validate_registration(&bad_email).is_err());

    let empty_password = RegisterRequest {
        password: String::new(),
        ..registration()
    };
    assert!(validate_registration(&empty_password).is_err());

    let bad_age = RegisterRequest {
        age: Some(-1),
        ..registration()
    };
    assert!(validate_registration(&bad_age).is_err());
}

#[test]
fn registration_respects_column_limits() {
    let long_email = RegisterRequest {
        email: format!("{}@example.com", "f".repeat(250)),
        ..registration()
    };
    assert!(matches!(
        validate_registration(&long_email),
        Err(AppError::BadRequest(_))
    ));

    let long_first_name = RegisterRequest {
        first_name: "F".repeat(151),
        ..registration()
    };
    assert!(validate_registration(&long_first_name).is_err());

    let long_username = RegisterRequest {
        username: "f".repeat(151),
        ..registration()
    };
    assert!(validate_registration(&long_username).is_err());

    let long_phone = RegisterRequest {
        phone_number: Some("5".repeat(33)),
        ..registration()
    };
    assert!(validate_registration(&long_phone).is_err());

    let old = RegisterRequest {
        age: Some(151),
        ..registration()
    };
    assert!(validate_registration(&old).is_err());

    let at_limits = RegisterRequest {
        first_name: "F".repeat(150),
        phone_number: Some("5".repeat(32)),
        age: Some(150),
        ..registration()
    };
    assert!(validate_registration(&at_limits).is_ok());
}
