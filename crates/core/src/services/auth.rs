//! Credential service.
//!
//! Password hashing, bearer-token issue/validation, and the
//! register/login flows built on top of them.

use std::str::FromStr;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use draftsmith_common::{AppError, AppResult, Config};
use draftsmith_db::{entities::user, repositories::UserRepository};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Bearer token claim set.
///
/// `sub` is the string-encoded user ID regardless of its native numeric
/// type; signing with a numeric subject trips type checks in common JWT
/// implementations, so the normalization is deliberate.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
}

/// Credential service: hashes passwords and issues/resolves bearer tokens.
///
/// Stateless aside from the signing secret and algorithm, both fixed at
/// construction and never rotated within a process lifetime.
#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    secret: String,
    algorithm: Algorithm,
    token_ttl: chrono::Duration,
}

/// Input for registering a new user.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    #[validate(length(max = 255))]
    pub full_name: Option<String>,
}

/// Input for logging in.
#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

impl AuthService {
    /// Create a new credential service from the process configuration.
    pub fn new(user_repo: UserRepository, config: &Config) -> AppResult<Self> {
        let algorithm = Algorithm::from_str(&config.auth.algorithm).map_err(|_| {
            AppError::Config(format!(
                "Unknown signing algorithm: {}",
                config.auth.algorithm
            ))
        })?;

        Ok(Self {
            user_repo,
            secret: config.auth.secret_key.clone(),
            algorithm,
            token_ttl: chrono::Duration::minutes(config.auth.access_token_expire_minutes),
        })
    }

    /// Register a new user.
    pub async fn register(&self, input: RegisterInput) -> AppResult<user::Model> {
        input.validate()?;

        if self.user_repo.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::BadRequest("Email already registered".to_string()));
        }

        let hashed = hash_password(&input.password)?;

        self.user_repo
            .create(input.email, input.full_name, hashed)
            .await
    }

    /// Authenticate by email and password, returning the user and a fresh
    /// bearer token.
    ///
    /// Unknown email and wrong password produce the same error.
    pub async fn login(&self, input: LoginInput) -> AppResult<(user::Model, String)> {
        let invalid = || AppError::BadRequest("Incorrect email or password".to_string());

        let user = self
            .user_repo
            .find_by_email(&input.email)
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(&input.password, &user.hashed_password) {
            return Err(invalid());
        }

        let token = self.issue_token(user.id)?;

        Ok((user, token))
    }

    /// Issue a signed, time-limited token for a user.
    pub fn issue_token(&self, user_id: i32) -> AppResult<String> {
        let expires_at = chrono::Utc::now() + self.token_ttl;

        let claims = Claims {
            sub: user_id.to_string(),
            exp: usize::try_from(expires_at.timestamp())
                .map_err(|_| AppError::Internal("Token expiry before epoch".to_string()))?,
        };

        jsonwebtoken::encode(
            &Header::new(self.algorithm),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Failed to sign token: {e}")))
    }

    /// Verify a token's signature and expiry and parse the subject back to
    /// its native ID type. Any failure is a uniform credential error.
    pub fn decode_token(&self, token: &str) -> AppResult<i32> {
        let data = jsonwebtoken::decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::new(self.algorithm),
        )
        .map_err(|_| AppError::Unauthorized)?;

        data.claims
            .sub
            .parse::<i32>()
            .map_err(|_| AppError::Unauthorized)
    }

    /// Resolve a token to its user. A valid token whose subject no longer
    /// exists is treated the same as an invalid one.
    pub async fn resolve_token(&self, token: &str) -> AppResult<user::Model> {
        let user_id = self.decode_token(token)?;

        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::Unauthorized)
    }
}

/// Hash a password with argon2id. Each call generates a fresh salt.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a stored digest.
///
/// A malformed digest verifies as false rather than erroring, so a
/// corrupted row can never be mistaken for a server fault at login time.
#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
