//! Authentication models

pub mod user;

pub use user::{LoginCredentials, NewUser, User};
