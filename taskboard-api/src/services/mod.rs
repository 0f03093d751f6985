/// Business-logic services
///
/// Services sit between the HTTP handlers and the repositories. Handlers
/// never contain business rules; repositories never contain them either.
/// Concrete repositories are injected through the constructors, so every
/// service runs unchanged against PostgreSQL or the in-memory test
/// implementations.
///
/// # Modules
///
/// - `auth`: registration, login, credential rules
/// - `tasks`: task CRUD, ownership enforcement, pagination
/// - `users`: profile reads and edits
pub mod auth;
pub mod tasks;
pub mod users;
