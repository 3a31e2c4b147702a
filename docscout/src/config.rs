use config::{Config as ConfigBuilder, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Configuration for an interactive session.
///
/// Loaded from multiple locations in order of precedence:
/// 1. Custom config file specified via `--config`
/// 2. Local `.docscout.yaml` in the current directory
/// 3. Global `$CONFIG_DIR/docscout/config.yaml`
///
/// CLI arguments take precedence over file values; the merging behavior is
/// defined in `merge_with_cli`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Number of worker threads per search
    /// Defaults to number of CPU cores if not specified
    #[serde(default = "default_thread_count")]
    pub thread_count: NonZeroUsize,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory to seed the session with, skipping the initial prompt
    /// when it validates
    #[serde(default)]
    pub default_directory: Option<PathBuf>,
}

fn default_thread_count() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            thread_count: default_thread_count(),
            log_level: default_log_level(),
            default_directory: None,
        }
    }
}

impl SessionConfig {
    /// Loads configuration from the default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Loads configuration from a specific file, falling back through the
    /// default cascade for anything it doesn't set
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        let config_files = [
            // Global config
            dirs::config_dir().map(|p| p.join("docscout/config.yaml")),
            // Local config
            Some(PathBuf::from(".docscout.yaml")),
            // Custom config
            config_path.map(PathBuf::from),
        ];

        for path in config_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        builder.build()?.try_deserialize()
    }

    /// Merges CLI arguments with configuration file values
    pub fn merge_with_cli(mut self, cli: CliOverrides) -> Self {
        // CLI values take precedence over config file values
        if let Some(threads) = cli.thread_count {
            self.thread_count = threads;
        }
        if let Some(level) = cli.log_level {
            self.log_level = level;
        }
        if let Some(dir) = cli.default_directory {
            self.default_directory = Some(dir);
        }
        self
    }
}

/// Values the user passed explicitly on the command line; unset fields
/// fall back to the configuration file, then to the defaults.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub thread_count: Option<NonZeroUsize>,
    pub log_level: Option<String>,
    pub default_directory: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_load_config_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.yaml");
        let config_content = r#"
            thread_count: 4
            log_level: "debug"
            default_directory: "/srv/docs"
        "#;

        let mut file = File::create(&config_path).unwrap();
        file.write_all(config_content.as_bytes()).unwrap();

        let config = SessionConfig::load_from(Some(&config_path)).unwrap();
        assert_eq!(config.thread_count, NonZeroUsize::new(4).unwrap());
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.default_directory, Some(PathBuf::from("/srv/docs")));
    }

    #[test]
    fn test_default_values() {
        let config = SessionConfig::default();
        assert_eq!(config.thread_count, default_thread_count());
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.default_directory, None);
    }

    #[test]
    fn test_merge_with_cli() {
        let file_config = SessionConfig {
            thread_count: NonZeroUsize::new(4).unwrap(),
            log_level: "info".to_string(),
            default_directory: Some(PathBuf::from("/srv/docs")),
        };

        let overrides = CliOverrides {
            thread_count: Some(NonZeroUsize::new(8).unwrap()),
            log_level: None,
            default_directory: None,
        };

        let merged = file_config.merge_with_cli(overrides);
        assert_eq!(merged.thread_count, NonZeroUsize::new(8).unwrap()); // CLI value
        assert_eq!(merged.log_level, "info"); // File value (no CLI override)
        assert_eq!(merged.default_directory, Some(PathBuf::from("/srv/docs"))); // File value
    }

    #[test]
    fn test_invalid_config() {
        let config_content = r#"
            thread_count: "not a number"
        "#;

        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.yaml");
        let mut file = File::create(&config_path).unwrap();
        file.write_all(config_content.as_bytes()).unwrap();

        let result = SessionConfig::load_from(Some(&config_path));
        assert!(result.is_err(), "Expected error loading invalid config");
    }
}
