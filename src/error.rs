use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Invalid configuration value: {0}")]
    ValidationError(String),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Errors that can occur when compiling a configured search pattern
#[derive(Error, Debug)]
pub enum PatternError {
    #[error("Invalid regular expression '{0}': {1}")]
    InvalidSyntax(String, #[source] regex::Error),
}

/// Errors that can occur when reading attribute values from a bean
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("Bean is no longer registered: {0}")]
    BeanVanished(String),

    #[error("Failed to read attribute '{0}': {1}")]
    AttributeAccess(String, String),

    #[error("Invalid attribute pattern: {0}")]
    InvalidPattern(#[from] PatternError),
}

/// A single failure recorded during one scan
///
/// Scans never abort on failure; each skipped rule or bean is recorded
/// as one `ScanError` in the tick's report instead.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Skipped rule '{0}': {1}")]
    Rule(String, #[source] PatternError),

    #[error("Cannot read attribute values for bean '{0}': {1}")]
    Bean(String, #[source] ReadError),
}
