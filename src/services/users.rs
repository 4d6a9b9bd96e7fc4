//! Authentication and user management service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{RegisterUser, Role, UpdateProfile, User, UserClaims},
    repository::{users::NewUser, Repository},
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    config: AuthConfig,
}

impl UsersService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Register a new account
    pub async fn register(&self, request: RegisterUser) -> AppResult<User> {
        let role = match request.role.as_deref() {
            None => Role::User,
            Some(raw) => raw
                .parse::<Role>()
                .map_err(|_| AppError::Validation("Invalid role".to_string()))?,
        };

        if role == Role::Admin && !self.config.allow_admin_registration {
            return Err(AppError::Authorization(
                "Admin registration is disabled".to_string(),
            ));
        }

        if self.repository.users.email_exists(&request.email).await? {
            return Err(AppError::Duplicate("Email already registered".to_string()));
        }
        if self.repository.users.username_exists(&request.username).await? {
            return Err(AppError::Duplicate("Username already registered".to_string()));
        }

        let password_hash = hash_password(&request.password)?;

        let user = self
            .repository
            .users
            .create(&NewUser {
                username: &request.username,
                email: &request.email,
                password_hash: &password_hash,
                role,
                full_name: request.full_name.as_deref(),
                bio: request.bio.as_deref(),
                location: request.location.as_deref(),
                profile_picture: request.profile_picture.as_deref(),
            })
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, role = %user.role, "User registered");
        Ok(user)
    }

    /// Authenticate by username and password, returning a signed token
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<(String, User)> {
        let user = self
            .repository
            .users
            .get_by_username(username)
            .await?
            .ok_or_else(|| AppError::Authentication("Incorrect username or password".to_string()))?;

        if !verify_password(&user.password_hash, password)? {
            return Err(AppError::Authentication(
                "Incorrect username or password".to_string(),
            ));
        }

        if !user.is_active {
            return Err(AppError::Authentication("Account is disabled".to_string()));
        }

        let token = self.create_token_for_user(&user)?;
        Ok((token, user))
    }

    fn create_token_for_user(&self, user: &User) -> AppResult<String> {
        UserClaims::for_user(user, self.config.jwt_expiration_minutes)
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    /// Get a user as seen by `claims`: self or admin only
    pub async fn get_user(&self, claims: &UserClaims, id: i32) -> AppResult<User> {
        let user = self.repository.users.get_by_id(id).await?;
        if !claims.can_act_for(user.id) {
            return Err(AppError::Authorization(
                "Not authorized to view this profile".to_string(),
            ));
        }
        Ok(user)
    }

    /// Update profile fields: self or admin only
    pub async fn update_profile(&self, claims: &UserClaims, id: i32, profile: UpdateProfile) -> AppResult<User> {
        let user = self.repository.users.get_by_id(id).await?;
        if !claims.can_act_for(user.id) {
            return Err(AppError::Authorization(
                "Not authorized to update this profile".to_string(),
            ));
        }
        self.repository.users.update_profile(id, &profile).await
    }

    /// Change a user's role
    pub async fn update_role(&self, id: i32, role: &str) -> AppResult<User> {
        let role = role
            .parse::<Role>()
            .map_err(|_| AppError::Validation("Invalid role".to_string()))?;

        let user = self.repository.users.update_role(id, role).await?;
        tracing::info!(user_id = user.id, role = %user.role, "User role changed");
        Ok(user)
    }

    /// List all users
    pub async fn list(&self) -> AppResult<Vec<User>> {
        self.repository.users.list().await
    }
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Check a password against a stored Argon2 hash
pub fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
