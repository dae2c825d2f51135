// Infrastructure layer modules
pub mod config;
pub mod logging;
pub mod runtime;

// Re-exports
pub use config::{AdapterConfig, MODE_ENV_VAR, Mode, ModeParseError};
pub use logging::init_logging;
pub use runtime::run;
