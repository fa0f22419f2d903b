/// CLI configuration
use crate::error::{CliError, Result};
use cadence_playback::PlayerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub player: PlayerConfig,

    #[serde(default)]
    pub device: DeviceSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CatalogSettings {
    /// JSON catalog loaded when `--catalog` is not given
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Behaviour of the simulated output device
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeviceSettings {
    /// Length reported for every source once playback starts
    #[serde(default = "default_duration_secs")]
    pub default_duration_secs: f64,

    /// Media URLs whose play requests are rejected
    #[serde(default)]
    pub failing_urls: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directives, overridden by `RUST_LOG`
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            default_duration_secs: default_duration_secs(),
            failing_urls: Vec::new(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// `path` must exist when given; otherwise `cadence.toml` in the working
    /// directory is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()).required(true));
            }
            None => {
                let default_path = PathBuf::from("cadence.toml");
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables, e.g. CADENCE_DEVICE__DEFAULT_DURATION_SECS
        settings = settings.add_source(
            config::Environment::with_prefix("CADENCE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("device.failing_urls"),
        );

        Ok(settings.build()?.try_deserialize()?)
    }

    /// Parse configuration from TOML text only
    pub fn from_toml(text: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(text, config::FileFormat::Toml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let duration = self.device.default_duration_secs;
        if !duration.is_finite() || duration <= 0.0 {
            return Err(CliError::Config(format!(
                "device.default_duration_secs must be positive, got {duration}"
            )));
        }

        if self.player.history_size == 0 {
            return Err(CliError::Config(
                "player.history_size must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_duration_secs() -> f64 {
    180.0
}

fn default_filter() -> String {
    "cadence=info,cadence_cli=info,cadence_playback=info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = CliConfig::from_toml("").unwrap();
        assert!(config.catalog.path.is_none());
        assert_eq!(config.player.history_size, 50);
        assert!(!config.player.autoplay_seeded);
        assert_eq!(config.device.default_duration_secs, 180.0);
        assert!(config.device.failing_urls.is_empty());
        assert_eq!(config.logging.filter, default_filter());
        config.validate().unwrap();
    }

    #[test]
    fn sections_override_defaults() {
        let config = CliConfig::from_toml(
            r#"
            [catalog]
            path = "songs.json"

            [player]
            autoplay_seeded = true

            [device]
            default_duration_secs = 12.5
            failing_urls = ["https://cdn.example/broken.mp3"]
            "#,
        )
        .unwrap();

        assert_eq!(config.catalog.path, Some(PathBuf::from("songs.json")));
        assert!(config.player.autoplay_seeded);
        assert_eq!(config.player.history_size, 50);
        assert_eq!(config.device.default_duration_secs, 12.5);
        assert_eq!(config.device.failing_urls.len(), 1);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = CliConfig::default();
        config.device.default_duration_secs = 0.0;
        assert!(matches!(config.validate(), Err(CliError::Config(_))));

        let mut config = CliConfig::default();
        config.player.history_size = 0;
        assert!(matches!(config.validate(), Err(CliError::Config(_))));
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let result = CliConfig::from_toml("[device\nbroken");
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
