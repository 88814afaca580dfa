use clap::Parser;
use jmx2log::beans::{AttributeValue, BeanName};
use jmx2log::config::Config;
use jmx2log::error::ConfigError;
use jmx2log::probe::JmxLogProbe;
use jmx2log::registry::{LocalRegistry, RegisteredBean};
use jmx2log::rules::SearchRule;
use jmx2log::scheduler::Scheduler;
use jmx2log::sink::LogSink;
use log::{error, info, warn};
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Instant;

/// Command-line arguments for the jmx2log probe
#[derive(Parser)]
#[command(
    name = "jmx2log",
    about = "Managed-bean log probe - writes bean attribute values continuously to the log",
    long_about = "Scans an in-process managed-bean registry on a fixed interval, matches bean \
                  and attribute names against configured regex pairs, and writes one log line \
                  per attribute value."
)]
struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Configuration file path (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(
        short,
        long,
        help = "Enable verbose logging output (sets RUST_LOG=debug)"
    )]
    verbose: bool,
}

impl Cli {
    /// Validate the CLI arguments
    ///
    /// # Returns
    ///
    /// `Ok(())` if all arguments are valid, `Err(String)` with error message otherwise
    fn validate(&self) -> Result<(), String> {
        if let Some(ref config_path) = self.config {
            // Missing files are handled gracefully by load_config, which
            // warns and falls back to defaults; only reject directories.
            if config_path.exists() {
                if !config_path.is_file() {
                    return Err(format!(
                        "Configuration path is not a file: {}",
                        config_path.display()
                    ));
                }

                if let Some(extension) = config_path.extension() {
                    if extension != "toml" {
                        warn!(
                            "Configuration file does not have .toml extension: {}",
                            config_path.display()
                        );
                    }
                }
            }
        }

        Ok(())
    }

    /// Convert config path to string safely, handling non-UTF-8 paths
    ///
    /// # Returns
    ///
    /// `Ok(Some(path_str))` if config is provided and valid UTF-8,
    /// `Ok(None)` if no config provided,
    /// `Err(String)` if config path contains invalid UTF-8
    fn config_path_str(&self) -> Result<Option<&str>, String> {
        match &self.config {
            Some(path) => match path.to_str() {
                Some(path_str) => Ok(Some(path_str)),
                None => Err(format!(
                    "Configuration file path contains invalid UTF-8 characters: {}",
                    path.display()
                )),
            },
            None => Ok(None),
        }
    }
}

/// Load configuration from file or use defaults
///
/// # Arguments
///
/// * `config_path` - Optional path to configuration file
///
/// # Returns
///
/// Loaded configuration, or the default configuration if the file is
/// missing or invalid
fn load_config(config_path: Option<&str>) -> Result<Config, ConfigError> {
    match config_path {
        Some(path) => {
            info!("Loading configuration from: {}", path);
            match Config::from_file(std::path::Path::new(path)) {
                Ok(config) => Ok(config),
                Err(ConfigError::ReadError(_)) => {
                    warn!(
                        "Configuration file '{}' not found or unreadable, using defaults",
                        path
                    );
                    Ok(Config::default())
                }
                Err(e) => {
                    error!("Configuration error in '{}': {}", path, e);
                    warn!("Using default configuration due to invalid config file");
                    Ok(Config::default())
                }
            }
        }
        None => {
            info!("Using default configuration");
            Ok(Config::default())
        }
    }
}

/// Register the probe's own runtime beans
///
/// Gives the standalone binary live values to scan; an embedding
/// application registers its own beans next to these.
fn register_runtime_beans(registry: &LocalRegistry) {
    let started = Instant::now();
    registry.register(
        RegisteredBean::new(BeanName::new(r#"jmx2log:type=runtime,id="probe""#))
            .with_value("Pid", i64::from(std::process::id()))
            .with_supplier("UptimeSeconds", move || {
                Ok(AttributeValue::Integer(started.elapsed().as_secs() as i64))
            }),
    );
}

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    if cli.verbose {
        std::env::set_var("RUST_LOG", "debug");
    }
    env_logger::init();

    info!("Starting jmx2log probe");

    // Validate CLI arguments
    if let Err(e) = cli.validate() {
        error!("Invalid arguments: {}", e);
        std::process::exit(1);
    }

    // Load configuration with safe path handling
    let config_path = match cli.config_path_str() {
        Ok(path) => path,
        Err(e) => {
            error!("Invalid configuration path: {}", e);
            std::process::exit(1);
        }
    };

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let rules = SearchRule::parse_all(&config.search.configs);
    info!("Configured {} search rule(s)", rules.len());

    let registry = Arc::new(LocalRegistry::new());
    register_runtime_beans(&registry);

    let probe = Arc::new(JmxLogProbe::new(
        rules,
        registry,
        Arc::new(LogSink::new()),
    ));
    let mut scheduler = Scheduler::new(config.interval(), probe);
    scheduler.start();

    // Set up signal handling for graceful shutdown (SIGINT)
    let (shutdown_sender, shutdown_receiver) = mpsc::channel();
    ctrlc::set_handler(move || {
        info!("Received interrupt signal (SIGINT), shutting down gracefully...");
        if let Err(e) = shutdown_sender.send(()) {
            error!("Failed to send shutdown signal: {}", e);
        }
    })
    .expect("Error setting SIGINT handler for graceful shutdown");

    info!("jmx2log is running. Press Ctrl+C to stop.");

    // Wait for shutdown
    if let Err(e) = shutdown_receiver.recv() {
        error!("Error waiting for shutdown: {}", e);
    }

    scheduler.stop();
    info!("jmx2log shutdown complete");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_validation_with_existing_file() {
        let temp_file = std::env::temp_dir().join("test_jmx2log_config.toml");
        std::fs::write(&temp_file, "[scheduler]\ninterval_seconds = 30").unwrap();

        let cli = Cli {
            config: Some(temp_file.clone()),
            verbose: false,
        };

        assert!(cli.validate().is_ok());

        std::fs::remove_file(&temp_file).unwrap();
    }

    #[test]
    fn test_cli_validation_with_missing_file() {
        let cli = Cli {
            config: Some(PathBuf::from("/nonexistent/config.toml")),
            verbose: false,
        };

        // Should not fail - missing files are handled gracefully
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_cli_validation_with_directory() {
        let cli = Cli {
            config: Some(PathBuf::from("/tmp")),
            verbose: false,
        };

        // Should fail - directories are not valid config files
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_cli_validation_no_config() {
        let cli = Cli {
            config: None,
            verbose: false,
        };

        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_config_path_str_with_valid_path() {
        let cli = Cli {
            config: Some(PathBuf::from("config.toml")),
            verbose: false,
        };

        let result = cli.config_path_str().unwrap();
        assert_eq!(result, Some("config.toml"));
    }

    #[test]
    fn test_load_config_missing_file_falls_back_to_defaults() {
        let config = load_config(Some("/nonexistent/jmx2log.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_runtime_beans_are_registered() {
        use jmx2log::registry::MBeanRegistry;

        let registry = LocalRegistry::new();
        register_runtime_beans(&registry);

        let beans = registry.find_beans("jmx2log:.*").unwrap();
        assert_eq!(beans.len(), 1);

        let readings = registry.find_attributes(&beans[0], ".*").unwrap();
        let names: Vec<&str> = readings.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Pid", "UptimeSeconds"]);
    }
}
