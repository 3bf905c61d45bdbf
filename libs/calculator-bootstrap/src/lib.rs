//! Host bootstrap for the calculator service
//!
//! ## Modules
//!
//! - [`config`]: layered application configuration and typed module config access
//! - [`logging`]: `tracing` subscriber setup
//! - [`signals`]: shutdown signal handling

pub mod config;
pub mod logging;
pub mod signals;

pub use config::{
    AppConfig, CliArgs, ConfigError, ConfigProvider, LogFormat, LoggingConfig, PORT_ENV,
    ServerConfig, module_config_or_default,
};
pub use logging::init_logging;
pub use signals::{ShutdownSignal, cancel_on_shutdown, wait_for_shutdown};
