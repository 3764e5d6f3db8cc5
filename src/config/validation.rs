use crate::config::types::{
    BrowserConfig, Config, DelayConfig, DirectoryConfig, DiscoveryConfig, FieldTable, ReadMode,
};
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Longest settle delay accepted for any single step
const MAX_DELAY_MS: u64 = 120_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_browser_config(&config.browser)?;
    validate_directory_config(&config.directory)?;
    validate_delay_config(&config.delays)?;
    validate_discovery_config(&config.discovery)?;
    validate_field_table(&config.fields)?;
    Ok(())
}

/// Validates browser launch settings
fn validate_browser_config(config: &BrowserConfig) -> Result<(), ConfigError> {
    if config.navigation_timeout_ms < 1000 || config.navigation_timeout_ms > 300_000 {
        return Err(ConfigError::Validation(format!(
            "navigation_timeout_ms must be between 1000 and 300000, got {}",
            config.navigation_timeout_ms
        )));
    }

    if config.window_width == 0 || config.window_height == 0 {
        return Err(ConfigError::Validation(format!(
            "window size must be non-zero, got {}x{}",
            config.window_width, config.window_height
        )));
    }

    if let Some(path) = &config.executable {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "executable cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates the directory entry point and search view locators
fn validate_directory_config(config: &DirectoryConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' must use http or https",
            config.base_url
        )));
    }

    validate_xpath("search_input", &config.search_input)?;
    validate_xpath("listing_anchor", &config.listing_anchor)?;
    validate_xpath("listing_container", &config.listing_container)?;

    if config.name_attribute.trim().is_empty() {
        return Err(ConfigError::Validation(
            "name_attribute cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates settle delays
fn validate_delay_config(config: &DelayConfig) -> Result<(), ConfigError> {
    for (name, value) in config.all() {
        if value > MAX_DELAY_MS {
            return Err(ConfigError::Validation(format!(
                "{} must be <= {}ms, got {}ms",
                name, MAX_DELAY_MS, value
            )));
        }
    }
    Ok(())
}

/// Validates scroll loop tuning
fn validate_discovery_config(config: &DiscoveryConfig) -> Result<(), ConfigError> {
    if config.max_retries < 1 || config.max_retries > 10 {
        return Err(ConfigError::Validation(format!(
            "max_retries must be between 1 and 10, got {}",
            config.max_retries
        )));
    }

    if !config.scroll_delta_px.is_finite() || config.scroll_delta_px <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "scroll_delta_px must be a positive number, got {}",
            config.scroll_delta_px
        )));
    }

    Ok(())
}

/// Validates the field locator table
fn validate_field_table(table: &FieldTable) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for locator in table.iter() {
        if !seen.insert(locator.name) {
            return Err(ConfigError::InvalidLocator(format!(
                "field '{}' is listed more than once",
                locator.name
            )));
        }

        validate_xpath(locator.name.as_str(), &locator.xpath)?;

        match (&locator.read, &locator.attribute) {
            (ReadMode::Attribute, None) => {
                return Err(ConfigError::InvalidLocator(format!(
                    "field '{}' reads an attribute but names none",
                    locator.name
                )));
            }
            (ReadMode::Attribute, Some(attr)) if attr.trim().is_empty() => {
                return Err(ConfigError::InvalidLocator(format!(
                    "field '{}' has an empty attribute name",
                    locator.name
                )));
            }
            _ => {}
        }
    }

    Ok(())
}

/// Basic sanity check for an XPath expression
fn validate_xpath(name: &str, xpath: &str) -> Result<(), ConfigError> {
    let trimmed = xpath.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::InvalidLocator(format!(
            "{} cannot be empty",
            name
        )));
    }

    if !(trimmed.starts_with('/') || trimmed.starts_with('(')) {
        return Err(ConfigError::InvalidLocator(format!(
            "{} must be an absolute XPath, got '{}'",
            name, xpath
        )));
    }

    Ok(())
}
