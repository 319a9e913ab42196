//! Clinic appointments API
//!
//! HTTP service for creating, updating, deleting and searching clinic
//! appointments. Changes require a session token obtained from `/login`;
//! reads and searches are open.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;

pub use routes::create_router;
pub use state::AppState;
