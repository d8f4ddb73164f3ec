pub mod app;
pub mod backend;
pub mod commands;
pub mod config;
pub mod error;
pub mod form;
pub mod notify;
pub mod state;
pub mod views;

#[cfg(test)]
mod testing;

pub use app::App;
pub use commands::ImageFile;
pub use config::ClientConfig;
pub use error::{AppError, AppResult, BackendError};
pub use form::{OrderForm, ProviderForm};

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global tracing subscriber. Output goes to stderr so that
/// stdout stays clean for tables and JSON.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,repairtrack_client=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
