use crate::models::user::{
    AuthResponse, UserLoginRequest, UserProfileResponse, UserRegistrationRequest,
};
use crate::services::user_service::UserService;
use crate::utils::error::AppError;
use crate::utils::jwt::AuthenticatedUser;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

/// Register a new user
#[openapi(tag = "Users")]
#[post("/auth/local/register", format = "json", data = "<request>")]
pub async fn register(
    request: Json<UserRegistrationRequest>,
    user_service: &State<UserService>,
) -> Result<Json<AuthResponse>, AppError> {
    let response = user_service.register_user(request.into_inner()).await?;
    Ok(Json(response))
}

/// Login with username or email
#[openapi(tag = "Users")]
#[post("/auth/local", format = "json", data = "<request>")]
pub async fn login(
    request: Json<UserLoginRequest>,
    user_service: &State<UserService>,
) -> Result<Json<AuthResponse>, AppError> {
    let response = user_service.login_user(request.into_inner()).await?;
    Ok(Json(response))
}

/// Profile of the signed-in user
#[openapi(tag = "Users")]
#[get("/users/me")]
pub async fn me(
    auth: AuthenticatedUser,
    user_service: &State<UserService>,
) -> Result<Json<UserProfileResponse>, AppError> {
    let profile = user_service.get_profile(auth.user_id).await?;
    Ok(Json(profile))
}
