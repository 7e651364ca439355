//! Configuration loader.

use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::schema::Config;

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path)?;
        let expanded = Self::expand_env_vars(&content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = regex::Regex::new(r"\$\{([^}]+)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.jobdeck`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_expand_path() {
        let expanded = ConfigLoader::expand_path("~/.jobdeck");
        assert!(!expanded.starts_with('~'));
    }

    #[test]
    fn test_load_basic_config() {
        let content = r#"
            [server]
            host = "0.0.0.0"
            port = 3000
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_load_full_config() {
        let content = r#"
            [server]
            host = "localhost"
            port = 9000

            [database]
            path = "/var/lib/jobdeck/jobs.db"

            [logging]
            dir = "/var/log/jobdeck"
            file = "service.log"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.server.host, "localhost");
        assert_eq!(config.database.path, "/var/lib/jobdeck/jobs.db");
        assert_eq!(config.logging.file, "service.log");
    }

    #[test]
    fn test_env_var_expansion() {
        unsafe {
            std::env::set_var("JOBDECK_TEST_DB", "expanded.db");
        }
        let content = r#"
            [database]
            path = "${JOBDECK_TEST_DB}"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.database.path, "expanded.db");
    }

    #[test]
    fn test_missing_env_var_is_an_error() {
        let content = r#"
            [database]
            path = "${JOBDECK_DEFINITELY_UNSET}"
        "#;
        let err = ConfigLoader::load_str(content).unwrap_err();
        assert!(matches!(err, ConfigError::EnvVarNotSet(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 4242").unwrap();
        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.server.port, 4242);
    }
}
