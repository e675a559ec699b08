//! Configuration validation.

use crate::schema::{Config, WaitMode};

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
        Self::validate_shopper(config, &mut result);
        Self::validate_source(config, &mut result);
        Self::validate_email(config, &mut result);

        result
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        if config.browser.debug_port == 0 {
            result.add_error(ValidationError::new("browser.debug_port", "Port cannot be 0"));
        }

        if config.browser.viewport_width == 0 || config.browser.viewport_height == 0 {
            result.add_error(ValidationError::new(
                "browser.viewport",
                "Viewport dimensions must be greater than 0",
            ));
        }

        if !config.browser.headless {
            result.add_warning(ValidationWarning::new(
                "browser.headless",
                "Browser will open a visible window",
            ));
        }
    }

    fn validate_shopper(config: &Config, result: &mut ValidationResult) {
        if config.shopper.email.is_empty() {
            result.add_error(ValidationError::new("shopper.email", "Storefront email is required"));
        }

        if config.shopper.password.is_empty() {
            result.add_error(ValidationError::new(
                "shopper.password",
                "Storefront password is required",
            ));
        }

        if config.shopper.entry_url.is_empty() {
            result.add_error(ValidationError::new("shopper.entry_url", "Entry URL cannot be empty"));
        } else if !config.shopper.entry_url.starts_with("https://") {
            result.add_warning(ValidationWarning::new(
                "shopper.entry_url",
                "Entry URL is not https; credentials will be sent in clear text",
            ));
        }

        if config.shopper.wait == WaitMode::Poll && config.shopper.poll_interval_ms == 0 {
            result.add_error(ValidationError::new(
                "shopper.poll_interval_ms",
                "poll_interval_ms must be greater than 0",
            ));
        }
    }

    fn validate_source(config: &Config, result: &mut ValidationResult) {
        let source = &config.source;
        if source.spreadsheet_id.is_empty() {
            result.add_error(ValidationError::new(
                "source.spreadsheet_id",
                "Spreadsheet ID is required",
            ));
        }

        for (field, value) in [
            ("source.client_id", &source.client_id),
            ("source.client_secret", &source.client_secret),
            ("source.refresh_token", &source.refresh_token),
        ] {
            if value.is_empty() {
                result.add_error(ValidationError::new(field, "Google OAuth credential is required"));
            }
        }
    }

    fn validate_email(config: &Config, result: &mut ValidationResult) {
        let email = &config.email;
        if !email.enabled {
            result.add_warning(ValidationWarning::new(
                "email.enabled",
                "Trip summary email is disabled",
            ));
            return;
        }

        if email.smtp_port == 0 {
            result.add_error(ValidationError::new("email.smtp_port", "Port cannot be 0"));
        }

        if email.smtp_host.is_empty() {
            result.add_error(ValidationError::new("email.smtp_host", "SMTP host cannot be empty"));
        }

        if email.recipient.is_empty() {
            result.add_error(ValidationError::new("email.recipient", "Recipient is required"));
        }

        if email.username.is_empty() || email.password.is_empty() {
            result.add_error(ValidationError::new(
                "email.username",
                "SMTP username and password are required",
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.shopper.email = "shopper@example.com".to_string();
        config.shopper.password = "hunter2".to_string();
        config.source.spreadsheet_id = "1AbC".to_string();
        config.source.client_id = "client".to_string();
        config.source.client_secret = "secret".to_string();
        config.source.refresh_token = "refresh".to_string();
        config.email.username = "bot@example.com".to_string();
        config.email.password = "app-password".to_string();
        config.email.recipient = "family@example.com".to_string();
        config
    }

    #[test]
    fn test_valid_config() {
        let result = ConfigValidator::validate(&valid_config());
        assert!(result.is_valid(), "{:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_default_config_is_invalid() {
        let result = ConfigValidator::validate(&Config::default());
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.path == "shopper.email"));
        assert!(result.errors.iter().any(|e| e.path == "source.spreadsheet_id"));
    }

    #[test]
    fn test_zero_poll_interval() {
        let mut config = valid_config();
        config.shopper.poll_interval_ms = 0;
        let result = ConfigValidator::validate(&config);
        assert!(result.errors.iter().any(|e| e.path == "shopper.poll_interval_ms"));
    }

    #[test]
    fn test_zero_poll_interval_ignored_for_fixed_waits() {
        let mut config = valid_config();
        config.shopper.wait = WaitMode::Fixed;
        config.shopper.poll_interval_ms = 0;
        assert!(ConfigValidator::validate(&config).is_valid());
    }

    #[test]
    fn test_http_entry_url_warns() {
        let mut config = valid_config();
        config.shopper.entry_url = "http://shop.example.com/".to_string();
        let result = ConfigValidator::validate(&config);
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.path == "shopper.entry_url"));
    }

    #[test]
    fn test_disabled_email_skips_checks() {
        let mut config = valid_config();
        config.email.enabled = false;
        config.email.recipient.clear();
        let result = ConfigValidator::validate(&config);
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.path == "email.enabled"));
    }

    #[test]
    fn test_visible_browser_warns() {
        let mut config = valid_config();
        config.browser.headless = false;
        let result = ConfigValidator::validate(&config);
        assert!(result.warnings.iter().any(|w| w.path == "browser.headless"));
    }
}
