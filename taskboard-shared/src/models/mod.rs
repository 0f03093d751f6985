/// Domain models for Taskboard
///
/// # Models
///
/// - `user`: User accounts
/// - `task`: Tasks with owner scoping and status
/// - `pagination`: Generic pagination envelope for list endpoints
pub mod pagination;
pub mod task;
pub mod user;
