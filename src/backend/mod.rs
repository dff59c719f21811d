/// Backend submodules for running chat API requests off the UI thread
///
/// - `handlers`: runs one `BackendAction` against the API and reports the outcome
/// - `main_loop`: Tokio runtime and action dispatch loop
mod handlers;
mod main_loop;

use std::time::Duration;

// Re-export the main backend entry points
pub use handlers::handle_backend_action;
pub use main_loop::run_backend;

/// Where and how the backend talks to the chat server.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub api_base: String,
    pub request_timeout: Duration,
}
