//! Authentication for the clinic appointments service
//!
//! This crate owns user credentials and session tokens: Argon2 password
//! hashing, HS256 token issuing and verification, and the user stores the
//! credentials live in. It has no HTTP surface of its own; the API service
//! mounts the login and registration routes and the authorization gate.

pub mod credentials;
pub mod error;
pub mod jwt;
pub mod models;
pub mod repositories;
pub mod validation;

pub use credentials::CredentialService;
pub use error::AuthError;
pub use jwt::{Claims, TokenConfig, TokenService};
