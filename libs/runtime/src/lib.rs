//! Process-level plumbing shared by the server binary: layered configuration,
//! home directory resolution, logging initialization and shutdown signals.

pub mod config;
pub mod logging;
pub mod paths;
pub mod shutdown;

pub use config::{
    default_logging_config, ApiConfig, AppConfig, CliArgs, DatabaseConfig, LoggingConfig,
    Section, ServerConfig,
};
pub use logging::{init_default_logging, init_logging_from_config};
pub use paths::{resolve_home_dir, HomeDirError};
pub use shutdown::wait_for_shutdown;
