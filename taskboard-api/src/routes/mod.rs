/// API route handlers
///
/// Handlers are thin adapters: decode the request, call the service, map the
/// result to JSON. Business rules live in the services; status-code mapping
/// lives in `crate::error`.
///
/// # Modules
///
/// - `health`: health check
/// - `auth`: registration and login
/// - `users`: profile read/update
/// - `tasks`: task CRUD with pagination
pub mod auth;
pub mod health;
pub mod tasks;
pub mod users;
