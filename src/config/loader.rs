//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use crate::config::schema::BridgeConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable selecting the HTTP listen port.
pub const PORT_ENV: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Env { var: &'static str, value: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Env { var, value } => {
                write!(f, "Invalid value '{}' for environment variable {}", value, var)
            }
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parse a configuration file without environment overrides or validation.
pub fn read_config(path: &Path) -> Result<BridgeConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Apply environment overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(config: &mut BridgeConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup(PORT_ENV).filter(|v| !v.is_empty()) {
        let port = value.trim().parse::<u16>();
        config.listener.port = port.map_err(|_| ConfigError::Env {
            var: PORT_ENV,
            value,
        })?;
    }
    Ok(())
}

/// Load the configuration the server runs with.
///
/// Starts from the file at `path` (or the defaults), applies environment
/// overrides and validates the result.
pub fn load_config(path: Option<&Path>) -> Result<BridgeConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => BridgeConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_port_override() {
        let mut config = BridgeConfig::default();
        apply_env_overrides(&mut config, env(&[("PORT", "8123")])).unwrap();
        assert_eq!(config.listener.port, 8123);
        assert_eq!(config.listener.bind_address(), "0.0.0.0:8123");
    }

    #[test]
    fn test_empty_port_keeps_default() {
        let mut config = BridgeConfig::default();
        apply_env_overrides(&mut config, env(&[("PORT", "")])).unwrap();
        assert_eq!(config.listener.port, 9009);

        apply_env_overrides(&mut config, env(&[])).unwrap();
        assert_eq!(config.listener.port, 9009);
    }

    #[test]
    fn test_invalid_port() {
        let mut config = BridgeConfig::default();
        let err = apply_env_overrides(&mut config, env(&[("PORT", "ninety")])).unwrap_err();
        assert!(matches!(err, ConfigError::Env { var: "PORT", .. }));
        assert!(err.to_string().contains("ninety"));
    }

    #[test]
    fn test_read_config_file() {
        let path = std::env::temp_dir().join(format!("backlight-{}.toml", uuid::Uuid::new_v4()));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[mqtt]\ntopic = \"cmd/backlight2\"").unwrap();

        let config = read_config(&path).unwrap();
        assert_eq!(config.mqtt.topic, "cmd/backlight2");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let err = read_config(Path::new("/nonexistent/backlight.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_parse_error() {
        let path = std::env::temp_dir().join(format!("backlight-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, "[listener\nport = 1").unwrap();

        let err = read_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        fs::remove_file(&path).unwrap();
    }
}
