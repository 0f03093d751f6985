//! # Taskboard Shared Library
//!
//! Types and building blocks shared by the Taskboard API server:
//!
//! - `models`: domain models (`User`, `Task`, pagination envelope)
//! - `repository`: persistence traits plus PostgreSQL and in-memory
//!   implementations
//! - `auth`: password hashing, JWT token manager, Bearer-auth middleware
//! - `db`: connection pool and migrations

pub mod auth;
pub mod db;
pub mod models;
pub mod repository;

/// Current version of the Taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
