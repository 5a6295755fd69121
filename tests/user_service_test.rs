use airline_booking_service::{
    models::user::{UserLoginRequest, UserProfile, UserRegistrationRequest},
    services::user_service::UserService,
    utils::error::AppError,
    utils::jwt,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use test_context::{test_context, AsyncTestContext};

mod common {
    pub mod test_utils;
}
use common::test_utils::{seeded_stores, test_config};

struct UserServiceContext {
    user_service: UserService,
    config: airline_booking_service::config::AppConfig,
}

#[async_trait]
impl AsyncTestContext for UserServiceContext {
    async fn setup() -> Self {
        let config = test_config();
        let stores = seeded_stores().await;
        let user_service = UserService::new(stores.users.clone(), config.auth.clone());

        UserServiceContext {
            user_service,
            config,
        }
    }

    async fn teardown(self) {}
}

fn registration(username: &str, email: &str) -> UserRegistrationRequest {
    UserRegistrationRequest {
        username: username.to_string(),
        email: email.to_string(),
        password: "test_password123".to_string(),
        profile: UserProfile::default(),
    }
}

#[test_context(UserServiceContext)]
#[tokio::test]
async fn test_user_registration_success(ctx: &UserServiceContext) -> Result<(), AppError> {
    let mut request = registration("test_user_registration", "Register@Example.com");
    request.profile = UserProfile {
        name: Some("Nigar".to_string()),
        surname: Some("Huseynova".to_string()),
        date_of_birth: NaiveDate::from_ymd_opt(1992, 4, 11),
        ..UserProfile::default()
    };

    let response = ctx.user_service.register_user(request).await?;

    assert!(response.user.id > 0, "User ID should be positive");
    assert_eq!(response.user.username, "test_user_registration");
    // Emails are stored lowercased
    assert_eq!(response.user.email, "register@example.com");
    assert!(!response.user.document_id.is_empty());

    let claims = jwt::verify_token(&ctx.config.auth, &response.jwt)?;
    assert_eq!(claims.sub, response.user.id);

    let profile = ctx.user_service.get_profile(response.user.id).await?;
    assert_eq!(profile.profile.name.as_deref(), Some("Nigar"));
    assert_eq!(profile.profile.surname.as_deref(), Some("Huseynova"));
    assert_eq!(profile.profile.date_of_birth, NaiveDate::from_ymd_opt(1992, 4, 11));

    Ok(())
}

#[test_context(UserServiceContext)]
#[tokio::test]
async fn test_duplicate_username_registration(ctx: &UserServiceContext) -> Result<(), AppError> {
    ctx.user_service
        .register_user(registration("duplicate_user", "first@example.com"))
        .await?;

    let result = ctx
        .user_service
        .register_user(registration("duplicate_user", "second@example.com"))
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    Ok(())
}

#[test_context(UserServiceContext)]
#[tokio::test]
async fn test_duplicate_email_registration(ctx: &UserServiceContext) -> Result<(), AppError> {
    ctx.user_service
        .register_user(registration("first_owner", "shared@example.com"))
        .await?;

    let result = ctx
        .user_service
        .register_user(registration("second_owner", "SHARED@example.com"))
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    Ok(())
}

#[test_context(UserServiceContext)]
#[tokio::test]
async fn test_registration_rejects_invalid_fields(ctx: &UserServiceContext) -> Result<(), AppError> {
    let mut short_password = registration("short_password", "short@example.com");
    short_password.password = "abc".to_string();
    let result = ctx.user_service.register_user(short_password).await;
    assert!(matches!(result, Err(AppError::ValidationError(_))));

    let bad_email = registration("bad_email", "not-an-email");
    let result = ctx.user_service.register_user(bad_email).await;
    assert!(matches!(result, Err(AppError::ValidationError(_))));

    Ok(())
}

#[test_context(UserServiceContext)]
#[tokio::test]
async fn test_login_with_username_or_email(ctx: &UserServiceContext) -> Result<(), AppError> {
    let registered = ctx
        .user_service
        .register_user(registration("test_login_user", "login@example.com"))
        .await?;

    for identifier in ["test_login_user", "login@example.com", "LOGIN@example.com"] {
        let response = ctx
            .user_service
            .login_user(UserLoginRequest {
                identifier: identifier.to_string(),
                password: "test_password123".to_string(),
            })
            .await?;
        assert_eq!(response.user.id, registered.user.id);
        assert!(!response.jwt.is_empty());
    }

    Ok(())
}

#[test_context(UserServiceContext)]
#[tokio::test]
async fn test_login_wrong_password(ctx: &UserServiceContext) -> Result<(), AppError> {
    ctx.user_service
        .register_user(registration("test_wrong_password", "wrong@example.com"))
        .await?;

    let result = ctx
        .user_service
        .login_user(UserLoginRequest {
            identifier: "test_wrong_password".to_string(),
            password: "wrong_password".to_string(),
        })
        .await;

    assert_eq!(
        result.err(),
        Some(AppError::AuthError("Invalid credentials".to_string()))
    );
    Ok(())
}

#[test_context(UserServiceContext)]
#[tokio::test]
async fn test_login_unknown_user(ctx: &UserServiceContext) -> Result<(), AppError> {
    let result = ctx
        .user_service
        .login_user(UserLoginRequest {
            identifier: "nobody".to_string(),
            password: "whatever123".to_string(),
        })
        .await;

    assert!(matches!(result, Err(AppError::AuthError(_))));
    Ok(())
}

#[test_context(UserServiceContext)]
#[tokio::test]
async fn test_profile_for_missing_user(ctx: &UserServiceContext) -> Result<(), AppError> {
    let result = ctx.user_service.get_profile(9_999).await;
    assert!(matches!(result, Err(AppError::AuthError(_))));
    Ok(())
}
