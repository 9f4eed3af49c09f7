use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

use crate::telemetry::parse_log_level;

pub const ENV_CONFIG_FILE: &str = "MFA_DISPATCH_CONFIG_FILE";
pub const ENV_LOG_LEVEL: &str = "MFA_DISPATCH_LOG_LEVEL";
const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Startup settings for MFA activation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    config_file: PathBuf,
    verbosity: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_FILE)
    }
}

impl Settings {
    #[must_use]
    pub fn new(config_file: impl Into<PathBuf>) -> Self {
        Self {
            config_file: config_file.into(),
            verbosity: 0,
        }
    }

    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    #[must_use]
    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    #[must_use]
    pub fn verbosity(&self) -> u8 {
        self.verbosity
    }

    /// Load settings from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let config_file =
            std::env::var(ENV_CONFIG_FILE).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        let verbosity = std::env::var(ENV_LOG_LEVEL).ok().map_or(0, |level| {
            parse_log_level(&level).unwrap_or_else(|err| {
                warn!("Ignoring {ENV_LOG_LEVEL}={level}: {err}");
                0
            })
        });

        Self::new(config_file).with_verbosity(verbosity)
    }

    /// Read the raw configuration blob handed to every provider.
    ///
    /// # Errors
    /// Returns an error if the configuration file cannot be read.
    #[instrument(skip(self), fields(config_file = %self.config_file.display()))]
    pub fn load_config_source(&self) -> Result<Vec<u8>> {
        let source = std::fs::read(&self.config_file).with_context(|| {
            format!(
                "Failed to read configuration file {}",
                self.config_file.display()
            )
        })?;

        debug!("loaded {} bytes of configuration", source.len());

        Ok(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        temp_env::with_vars(
            [(ENV_CONFIG_FILE, None::<&str>), (ENV_LOG_LEVEL, None::<&str>)],
            || {
                let settings = Settings::from_env();
                assert_eq!(settings, Settings::default());
                assert_eq!(settings.config_file(), Path::new("config.yaml"));
                assert_eq!(settings.verbosity(), 0);
            },
        );
    }

    #[test]
    fn test_from_env() {
        temp_env::with_vars(
            [
                (ENV_CONFIG_FILE, Some("/etc/mfa/config.yaml")),
                (ENV_LOG_LEVEL, Some("debug")),
            ],
            || {
                let settings = Settings::from_env();
                assert_eq!(settings.config_file(), Path::new("/etc/mfa/config.yaml"));
                assert_eq!(settings.verbosity(), 3);
            },
        );
    }

    #[test]
    fn test_from_env_invalid_log_level() {
        temp_env::with_vars([(ENV_LOG_LEVEL, Some("loud"))], || {
            assert_eq!(Settings::from_env().verbosity(), 0);
        });
    }

    #[test]
    fn test_load_config_source() -> Result<()> {
        let path = std::env::temp_dir().join(format!(
            "mfa-dispatch-settings-{}.yaml",
            std::process::id()
        ));
        std::fs::File::create(&path)?.write_all(b"mfa:\n  totp: {}\n")?;

        let source = Settings::new(&path).load_config_source();
        std::fs::remove_file(&path)?;

        assert_eq!(source?, b"mfa:\n  totp: {}\n".to_vec());
        Ok(())
    }

    #[test]
    fn test_load_config_source_missing() {
        let settings = Settings::new("/nonexistent/mfa-dispatch/config.yaml");
        let err = settings.load_config_source();
        assert!(err.is_err());
        assert!(err
            .map_err(|e| e.to_string())
            .unwrap_err()
            .contains("Failed to read configuration file"));
    }
}
