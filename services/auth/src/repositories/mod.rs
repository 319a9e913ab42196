//! User credential storage

use async_trait::async_trait;
use common::error::DatabaseResult;

use crate::models::{NewUser, User};

pub mod memory;
pub mod user;

pub use memory::InMemoryUserRepository;
pub use user::PgUserRepository;

/// Store for user credentials, keyed by email
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user; a taken email fails with `DatabaseError::Conflict`
    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User>;

    /// Find a user by exact email
    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>>;
}
