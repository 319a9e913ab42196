//! Errors raised while registering users, logging in and checking tokens

use common::error::DatabaseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Login attempted without an email or password
    #[error("Email and password are required")]
    MissingCredentials,

    /// Unknown email or wrong password; deliberately the same message for both
    #[error("Invalid login credentials")]
    InvalidCredentials,

    /// Registration input failed a format rule
    #[error("{0}")]
    Validation(String),

    #[error("Email already registered")]
    DuplicateEmail,

    /// The token signature, format or expiry did not check out
    #[error("Token verification failed: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Auth configuration error: {0}")]
    Configuration(String),

    /// Hashing or signing failed
    #[error("{0}")]
    Internal(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}
