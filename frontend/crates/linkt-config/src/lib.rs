mod api_config;
mod config;
mod error;
mod log_level;
mod logging_config;
mod scanner_config;
mod session_config;

#[cfg(test)]
mod tests;

pub use api_config::ApiConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use scanner_config::ScannerConfig;
pub use session_config::SessionConfig;

pub const CONFIG_DIR_ENV: &str = "LINKT_CONFIG_DIR";
pub const DEFAULT_CONFIG_DIR_NAME: &str = ".linkt";
pub const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
const DEFAULT_SESSION_DIR: &str = "session";
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_LOG_COLORED: bool = true;
