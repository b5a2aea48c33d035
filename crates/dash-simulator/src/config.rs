//! Optional TOML configuration file

use std::io::ErrorKind;

use log::{info, warn};
use thiserror::Error;

use dash_core::config::{ConfigError, DashConfig};

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "DASH_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "dash.toml";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value: {0}")]
    Invalid(ConfigError),
}

/// Parse and validate a config document. Missing keys take their defaults.
pub fn parse(text: &str) -> Result<DashConfig, LoadError> {
    let config: DashConfig = toml::from_str(text)?;
    config.validate().map_err(LoadError::Invalid)?;
    Ok(config)
}

/// Load the config file, falling back to defaults when it is absent or bad.
pub fn load() -> DashConfig {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_owned());

    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("No config at {}, using defaults", path);
            return DashConfig::default();
        }
        Err(e) => {
            warn!("Failed to read {}: {}; using defaults", path, e);
            return DashConfig::default();
        }
    };

    match parse(&text) {
        Ok(config) => {
            info!("Loaded config from {}", path);
            config
        }
        Err(e) => {
            warn!("Ignoring {} ({}); using defaults", path, e);
            DashConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = parse(
            r#"
            [clock]
            timezone_hours = -5
            ntp_server = "time.example.org"

            [sensor]
            native_max = 4095
            "#,
        )
        .unwrap();

        assert_eq!(config.clock.timezone_hours, -5);
        assert_eq!(config.clock.ntp_server, "time.example.org");
        assert_eq!(config.clock.full_refresh_cycles, 50);
        assert_eq!(config.sensor.native_min, 0);
        assert_eq!(config.sensor.native_max, 4095);
        assert_eq!(config.battery.divider_ratio, 2);
    }

    #[test]
    fn test_empty_file_is_default() {
        let config = parse("").unwrap();
        assert_eq!(config.clock.utc_offset_secs(), 7200);
    }

    #[test]
    fn test_out_of_range_value_is_rejected() {
        let err = parse("[clock]\ntimezone_hours = 20\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::Invalid(ConfigError::TimezoneOutOfRange(20))
        ));
    }

    #[test]
    fn test_malformed_file_is_rejected() {
        let err = parse("[clock\n").unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
        assert!(err.to_string().starts_with("parse error: "));
    }

    #[test]
    fn test_invalid_value_message_names_the_problem() {
        let err = parse("[battery]\ndivider_ratio = 0\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value: Battery divider ratio must be non-zero"
        );
    }
}
