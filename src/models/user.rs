//! User model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppError;

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

text_enum_sqlx!(Role);

/// Full user model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    /// Hashed password (argon2)
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub is_active: bool,
    pub role: Role,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    /// Profile picture URL
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterUser {
    #[validate(length(min = 3, max = 50, message = "Username must be between 3 and 50 characters"))]
    pub username: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    /// `user` (default) or `admin`
    pub role: Option<String>,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    #[validate(url(message = "Profile picture must be a valid URL"))]
    pub profile_picture: Option<String>,
}

/// Profile update request; absent fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProfile {
    #[validate(length(max = 100, message = "Full name must be at most 100 characters"))]
    pub full_name: Option<String>,
    #[validate(length(max = 1000, message = "Bio must be at most 1000 characters"))]
    pub bio: Option<String>,
    pub location: Option<String>,
    #[validate(url(message = "Profile picture must be a valid URL"))]
    pub profile_picture: Option<String>,
}

/// Role change request (admin only)
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRole {
    /// `user` or `admin`
    pub role: String,
}

/// JWT Claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    /// Username
    pub sub: String,
    pub user_id: i32,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Build claims for a user, valid for `ttl_minutes` from now
    pub fn for_user(user: &User, ttl_minutes: u64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: user.username.clone(),
            user_id: user.id,
            role: user.role,
            iat: now,
            exp: now + (ttl_minutes as i64) * 60,
        }
    }

    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Require admin privileges
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Authorization("Admin access required".to_string()))
        }
    }

    /// Whether the caller may act on records owned by `user_id`
    pub fn can_act_for(&self, user_id: i32) -> bool {
        self.is_admin() || self.user_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    fn sample_user(role: Role) -> User {
        User {
            id: 7,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: String::new(),
            is_active: true,
            role,
            full_name: None,
            bio: None,
            location: None,
            profile_picture: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn role_parsing_is_case_insensitive() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("User".parse::<Role>(), Ok(Role::User));
        assert!("librarian".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let mut user = sample_user(Role::User);
        user.password_hash = "$argon2id$secret".to_string();
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "user");
    }

    #[test]
    fn claims_round_trip_through_token() {
        let claims = UserClaims::for_user(&sample_user(Role::Admin), 30);
        let token = claims.create_token(SECRET).unwrap();
        let decoded = UserClaims::from_token(&token, SECRET).unwrap();

        assert_eq!(decoded.sub, "alice");
        assert_eq!(decoded.user_id, 7);
        assert_eq!(decoded.role, Role::Admin);
        assert_eq!(decoded.exp - decoded.iat, 30 * 60);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = UserClaims::for_user(&sample_user(Role::User), 30)
            .create_token(SECRET)
            .unwrap();
        assert!(UserClaims::from_token(&token, "another-secret").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut claims = UserClaims::for_user(&sample_user(Role::User), 30);
        claims.iat -= 7200;
        claims.exp = claims.iat + 60;
        let token = claims.create_token(SECRET).unwrap();
        assert!(UserClaims::from_token(&token, SECRET).is_err());
    }

    #[test]
    fn ownership_and_admin_checks() {
        let user = UserClaims::for_user(&sample_user(Role::User), 30);
        assert!(user.can_act_for(7));
        assert!(!user.can_act_for(8));
        assert!(user.require_admin().is_err());

        let admin = UserClaims::for_user(&sample_user(Role::Admin), 30);
        assert!(admin.can_act_for(8));
        assert!(admin.require_admin().is_ok());
    }

    #[test]
    fn registration_validation() {
        let request = RegisterUser {
            username: "al".to_string(),
            email: "not-an-email".to_string(),
            password: "123".to_string(),
            role: None,
            full_name: None,
            bio: None,
            location: None,
            profile_picture: None,
        };
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields.len(), 3);
    }

    #[test]
    fn registration_profile_picture_must_be_a_url() {
        let mut request = RegisterUser {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "secret1".to_string(),
            role: None,
            full_name: None,
            bio: None,
            location: None,
            profile_picture: Some("not a url".to_string()),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("profile_picture"));

        request.profile_picture = Some("https://example.com/alice.png".to_string());
        assert!(request.validate().is_ok());
    }
}
