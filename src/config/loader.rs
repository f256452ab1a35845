//! Configuration parsing

use std::str::FromStr;

use thiserror::Error;

use super::schema::Config;

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// TOML parsing error, including unparseable color values
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Config {
    /// Parse configuration from TOML text.
    ///
    /// # Example
    /// ```
    /// use pixelkit::config::Config;
    ///
    /// let config = Config::from_toml_str("[rotate]\nbackground = \"white\"").unwrap();
    /// assert_eq!(config.rotate.background.value(), 0xFFFFFFFF);
    /// assert_eq!(config.animation.default_duration, 0);
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Config, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        tracing::debug!(?config, "loaded configuration");
        Ok(config)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Config::from_toml_str(s)
    }
}
