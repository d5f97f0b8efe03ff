//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Convert the first error, if any, into a `ConfigError`.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(e) => Err(ConfigError::InvalidValue {
                field: e.path,
                message: e.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_browser(config, &mut result);
        Self::validate_search(config, &mut result);
        Self::validate_selectors(config, &mut result);
        Self::validate_consent(config, &mut result);

        result
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        if config.browser.debug_port == 0 {
            result.add_error(ValidationError::new(
                "browser.debug_port",
                "Port cannot be 0",
            ));
        }

        if config.browser.launch_timeout_seconds == 0 {
            result.add_error(ValidationError::new(
                "browser.launch_timeout_seconds",
                "launch_timeout_seconds must be greater than 0",
            ));
        }

        if let Some(path) = &config.browser.chrome_path {
            if !path.exists() {
                result.add_warning(ValidationWarning::new(
                    "browser.chrome_path",
                    format!("Chrome executable does not exist: {:?}", path),
                ));
            }
        }
    }

    fn validate_search(config: &Config, result: &mut ValidationResult) {
        let search = &config.search;

        if !search.base_url.starts_with("http://") && !search.base_url.starts_with("https://") {
            result.add_error(ValidationError::new(
                "search.base_url",
                "base_url must start with http:// or https://",
            ));
        }

        if search.default_count == 0 {
            result.add_error(ValidationError::new(
                "search.default_count",
                "default_count must be greater than 0",
            ));
        }

        if search.default_count > 1000 {
            result.add_warning(ValidationWarning::new(
                "search.default_count",
                "default_count is very high (>1000), scrolling may take a long time",
            ));
        }

        if search.wait_timeout_seconds == 0 {
            result.add_error(ValidationError::new(
                "search.wait_timeout_seconds",
                "wait_timeout_seconds must be greater than 0",
            ));
        }

        if search.stall_cycles == 0 {
            result.add_error(ValidationError::new(
                "search.stall_cycles",
                "stall_cycles must be greater than 0",
            ));
        }

        if search.max_scroll_cycles == 0 {
            result.add_error(ValidationError::new(
                "search.max_scroll_cycles",
                "max_scroll_cycles must be greater than 0",
            ));
        }
    }

    fn validate_selectors(config: &Config, result: &mut ValidationResult) {
        for (name, value) in config.selectors.entries() {
            if value.trim().is_empty() {
                result.add_error(ValidationError::new(
                    format!("selectors.{}", name),
                    "Selector cannot be empty",
                ));
            }
        }
    }

    fn validate_consent(config: &Config, result: &mut ValidationResult) {
        if !config.consent.enabled {
            return;
        }

        if config.consent.selector.trim().is_empty() {
            result.add_error(ValidationError::new(
                "consent.selector",
                "Selector cannot be empty while consent handling is enabled",
            ));
        }

        if config.consent.phrases.is_empty() {
            result.add_warning(ValidationWarning::new(
                "consent.phrases",
                "No consent phrases configured, the consent overlay will never be dismissed",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
