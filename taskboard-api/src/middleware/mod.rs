/// Custom middleware for the API server
///
/// - `recovery`: panic recovery at the outermost layer of the pipeline
///
/// Request logging and timeouts come from `tower-http` and are wired in
/// `app::build_router`; Bearer authentication lives in
/// `taskboard_shared::auth::middleware` and is applied per route group.
pub mod recovery;
