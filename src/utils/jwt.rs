use crate::config::AuthConfig;
use crate::utils::error::AppError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::Request;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32, // user_id
    pub exp: usize,
}

#[derive(Debug)]
pub struct AuthenticatedUser {
    pub user_id: i32,
}

pub fn generate_token(config: &AuthConfig, user_id: i32) -> Result<String, AppError> {
    let expiration = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::hours(config.expiration_hours))
        .ok_or_else(|| AppError::AuthError("Invalid token expiration".into()))?
        .timestamp() as usize;

    let claims = Claims {
        sub: user_id,
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::AuthError(e.to_string()))
}

pub fn verify_token(config: &AuthConfig, token: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::AuthError("Invalid or expired token".into()))
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthenticatedUser {
    type Error = AppError;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let token = match request.headers().get_one("Authorization") {
            Some(token) if token.starts_with("Bearer ") => &token[7..],
            _ => {
                return Outcome::Error((
                    Status::Unauthorized,
                    AppError::AuthError("Missing bearer token".into()),
                ))
            }
        };

        let config = match request.rocket().state::<AuthConfig>() {
            Some(config) => config,
            None => {
                return Outcome::Error((
                    Status::InternalServerError,
                    AppError::AuthError("Authentication is not configured".into()),
                ))
            }
        };

        match verify_token(config, token) {
            Ok(claims) => Outcome::Success(AuthenticatedUser { user_id: claims.sub }),
            Err(e) => Outcome::Error((Status::Unauthorized, e)),
        }
    }
}
