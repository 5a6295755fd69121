use crate::config::AuthConfig;
use crate::models::user::{
    AuthResponse, NewUser, UserLoginRequest, UserProfileResponse, UserRegistrationRequest,
};
use crate::store::UserRepository;
use crate::utils::error::{AppError, AppResult};
use crate::utils::jwt;
use bcrypt::{hash, verify};
use std::sync::Arc;
use validator::Validate;

pub struct UserService {
    users: Arc<dyn UserRepository>,
    auth: AuthConfig,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, auth: AuthConfig) -> Self {
        UserService { users, auth }
    }

    // Register a new user and sign them in
    pub async fn register_user(&self, request: UserRegistrationRequest) -> AppResult<AuthResponse> {
        request.validate()?;

        // Check if username or email already exists
        if self
            .users
            .username_or_email_taken(&request.username, &request.email)
            .await?
        {
            return Err(AppError::Conflict("Username or email already exists".into()));
        }

        // Hash password
        let password_hash = hash(request.password.as_bytes(), self.auth.password_cost)
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let user = self
            .users
            .insert_user(&NewUser {
                document_id: uuid::Uuid::new_v4().to_string(),
                username: request.username,
                email: request.email.to_lowercase(),
                password_hash,
                profile: request.profile,
            })
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "registered user");

        Ok(AuthResponse {
            jwt: jwt::generate_token(&self.auth, user.id)?,
            user: (&user).into(),
        })
    }

    // Login with username or email
    pub async fn login_user(&self, request: UserLoginRequest) -> AppResult<AuthResponse> {
        let user = self
            .users
            .find_user_by_identifier(request.identifier.trim())
            .await?
            .ok_or_else(|| AppError::AuthError("Invalid credentials".into()))?;

        // Verify password
        let password_matches = verify(request.password.as_bytes(), &user.password)
            .map_err(|e| AppError::AuthError(e.to_string()))?;

        if !password_matches {
            tracing::warn!(user_id = user.id, "login rejected");
            return Err(AppError::AuthError("Invalid credentials".into()));
        }

        Ok(AuthResponse {
            jwt: jwt::generate_token(&self.auth, user.id)?,
            user: (&user).into(),
        })
    }

    pub async fn get_profile(&self, user_id: i32) -> AppResult<UserProfileResponse> {
        let user = self
            .users
            .find_user_by_id(user_id)
            .await?
            // Token for a user that no longer exists
            .ok_or_else(|| AppError::AuthError("User not found".into()))?;
        Ok((&user).into())
    }
}
