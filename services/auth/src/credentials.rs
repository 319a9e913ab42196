//! Registration and login on top of a user store
//!
//! Passwords are hashed with Argon2id and a random salt before they reach the
//! store. Login never reveals whether the email exists: an unknown email and a
//! wrong password both fail with [`AuthError::InvalidCredentials`].

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use common::error::DatabaseError;
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    error::AuthError,
    jwt::TokenService,
    models::{NewUser, User},
    repositories::UserRepository,
    validation::{validate_email, validate_password},
};

/// Well-formed Argon2id hash with default parameters that matches no password
///
/// Verified against on unknown-email logins so both failure paths pay for one
/// Argon2 check.
const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$3lyuACm+gmYFZFbjn+o83A$uAAyPUG9qtV895spzcHLHM+70r3Ct85dZwqdv4cqOqg";

/// Registers users and exchanges credentials for session tokens
#[derive(Clone)]
pub struct CredentialService {
    users: Arc<dyn UserRepository>,
    tokens: TokenService,
}

impl CredentialService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: TokenService) -> Self {
        Self { users, tokens }
    }

    /// Token service used to issue and verify sessions
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Validate, hash and store a new credential
    pub async fn register(&self, email: &str, password: &str) -> Result<User, AuthError> {
        validate_email(email).map_err(AuthError::Validation)?;
        validate_password(password).map_err(AuthError::Validation)?;

        let password_hash = hash_password(password)?;
        let new_user = NewUser {
            email: email.to_string(),
            password_hash,
        };

        match self.users.create(&new_user).await {
            Ok(user) => {
                info!("Registered user {}", user.id);
                Ok(user)
            }
            Err(DatabaseError::Conflict(_)) => Err(AuthError::DuplicateEmail),
            Err(e) => Err(AuthError::Database(e)),
        }
    }

    /// Check an email/password pair and issue a session token
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let Some(user) = self.users.find_by_email(email).await? else {
            verify_password(DUMMY_PASSWORD_HASH, password)?;
            warn!("Login attempt for unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(&user.password_hash, password)? {
            warn!("Login attempt with wrong password for user {}", user.id);
            return Err(AuthError::InvalidCredentials);
        }

        info!("User {} logged in", user.id);
        self.tokens.issue_token(user.id, &user.email)
    }
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Internal(format!("Failed to hash password: {}", e)))?
        .to_string();

    Ok(password_hash)
}

fn verify_password(password_hash: &str, password: &str) -> Result<bool, AuthError> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| AuthError::Internal(format!("Failed to parse password hash: {}", e)))?;

    let argon2 = Argon2::default();
    Ok(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
