use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub document_id: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub document_number: Option<String>,
    pub document_expiry: Option<NaiveDate>,
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

// Profile fields accepted at registration besides the credentials
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct UserProfile {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub document_number: Option<String>,
    pub document_expiry: Option<NaiveDate>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub document_id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub profile: UserProfile,
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct UserRegistrationRequest {
    #[validate(length(min = 3, max = 64, message = "username must be 3-64 characters"))]
    pub username: String,
    #[validate(email(message = "email is not valid"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    #[serde(flatten)]
    pub profile: UserProfile,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UserLoginRequest {
    // Username or email
    pub identifier: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct UserSummary {
    pub id: i32,
    pub document_id: String,
    pub username: String,
    pub email: String,
}

/// What the client keeps after logging in: the user plus the bearer token.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AuthResponse {
    pub jwt: String,
    pub user: UserSummary,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct UserProfileResponse {
    #[serde(flatten)]
    pub user: UserSummary,
    #[serde(flatten)]
    pub profile: UserProfile,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        UserSummary {
            id: user.id,
            document_id: user.document_id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

impl From<&User> for UserProfileResponse {
    fn from(user: &User) -> Self {
        UserProfileResponse {
            user: user.into(),
            profile: UserProfile {
                name: user.name.clone(),
                surname: user.surname.clone(),
                date_of_birth: user.date_of_birth,
                gender: user.gender.clone(),
                document_number: user.document_number.clone(),
                document_expiry: user.document_expiry,
                phone_number: user.phone_number.clone(),
            },
            created_at: user.created_at,
        }
    }
}
