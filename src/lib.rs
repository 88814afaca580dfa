/// Error types for the probe
pub mod error;

/// Core bean and reading data types
pub mod beans;

/// Configuration management
pub mod config;

/// Search rule parsing
pub mod rules;

/// Bean registry contract and in-process implementation
pub mod registry;

/// Bean and attribute selection
pub mod scanner;

/// Scan coordination
pub mod probe;

/// Reading sinks
pub mod sink;

/// Tick scheduling
pub mod scheduler;

// Re-export commonly used types
pub use error::{ConfigError, PatternError, ReadError, ScanError};
