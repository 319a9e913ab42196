//! Common library for the clinic appointments service
//!
//! This crate holds what the service crates share: PostgreSQL connectivity,
//! schema bootstrap and the error type every backing store reports.

pub mod database;
pub mod error;
