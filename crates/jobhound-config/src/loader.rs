//! Configuration loader.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::schema::Config;

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a TOML file, falling back to defaults when the
    /// file does not exist. A file that exists but fails to parse is an error.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::NotFound(_)) => Ok(Config::default()),
            other => other,
        }
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let mut config: Config = toml::from_str(&expanded)?;
        Self::expand_paths(&mut config);
        Ok(config)
    }

    /// Apply `~` expansion to every path-valued setting.
    fn expand_paths(config: &mut Config) {
        let expand = |p: &PathBuf| match p.to_str() {
            Some(s) => PathBuf::from(Self::expand_path(s)),
            None => p.clone(),
        };
        config.browser.chrome_path = config.browser.chrome_path.as_ref().map(expand);
        config.browser.profile_dir = config.browser.profile_dir.as_ref().map(expand);
        config.export.path = expand(&config.export.path);
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = regex::Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.jobhound`).
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
        assert!(config.browser.headless);
        assert_eq!(config.search.default_count, 50);
        assert_eq!(config.search.default_location, "Worldwide");
    }

    #[test]
    fn test_load_browser_section() {
        let content = r#"
            [browser]
            headless = false
            debug_port = 9444
            extra_args = ["--lang=en-US"]
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert!(!config.browser.headless);
        assert_eq!(config.browser.debug_port, 9444);
        assert_eq!(config.browser.extra_args, vec!["--lang=en-US".to_string()]);
    }

    #[test]
    fn test_load_search_and_selectors() {
        let content = r#"
            [search]
            poll_interval_millis = 500
            stall_cycles = 5

            [selectors]
            card = "li.job-card"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.search.poll_interval_millis, 500);
        assert_eq!(config.search.stall_cycles, 5);
        assert_eq!(config.selectors.card, "li.job-card");
        // untouched fields keep their defaults
        assert_eq!(config.selectors.date, "time");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[export]").unwrap();
        writeln!(file, "path = \"out/jobs.xlsx\"").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.export.path, std::path::PathBuf::from("out/jobs.xlsx"));
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/jobhound.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = ConfigLoader::load_or_default(Path::new("/nonexistent/jobhound.toml")).unwrap();
        assert_eq!(config.search.stall_cycles, 3);
    }

    #[test]
    fn test_load_or_default_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "invalid = [unclosed").unwrap();
        assert!(ConfigLoader::load_or_default(file.path()).is_err());
    }

    #[test]
    fn test_load_expands_home_in_paths() {
        let content = r#"
            [browser]
            profile_dir = "~/chrome-profile"

            [export]
            path = "~/jobs.xlsx"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        let profile = config.browser.profile_dir.unwrap();
        assert!(!profile.to_string_lossy().starts_with('~'));
        assert!(profile.ends_with("chrome-profile"));
        assert!(!config.export.path.to_string_lossy().starts_with('~'));
    }

    #[test]
    fn test_load_invalid_toml() {
        let result = ConfigLoader::load_str("invalid = [unclosed");
        assert!(result.is_err());
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: test-only variable name, not read by any other test
        unsafe {
            std::env::set_var("JOBHOUND_TEST_CHROME", "/opt/chrome");
        }
        let content = "chrome_path = \"${JOBHOUND_TEST_CHROME}\"";
        let expanded = ConfigLoader::expand_env_vars(content).unwrap();
        assert!(expanded.contains("/opt/chrome"));
        unsafe {
            std::env::remove_var("JOBHOUND_TEST_CHROME");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${NONEXISTENT_JOBHOUND_VAR_12345}\"";
        let result = ConfigLoader::expand_env_vars(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(_))));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = ConfigLoader::expand_path("~/jobs");
        assert!(!expanded.starts_with('~'));
        assert!(expanded.ends_with("/jobs"));
    }
}
