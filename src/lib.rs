//! Mapscout: a map directory listing harvester
//!
//! This crate drives a headless browser through a map-based business directory,
//! discovers a bounded number of listings for a search query, opens each one and
//! extracts a flat record of its attributes for CSV export.

pub mod browser;
pub mod config;
pub mod events;
pub mod output;
pub mod record;
pub mod scraper;
pub mod state;

use thiserror::Error;

/// Main error type for Mapscout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to start browser: {0}")]
    Launch(String),

    #[error("Browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    #[error("Navigation to {url} timed out after {timeout_ms}ms")]
    Timeout { url: String, timeout_ms: u64 },

    #[error("No element matches {xpath}")]
    NoMatch { xpath: String },

    #[error("Page script failed: {0}")]
    Script(String),

    #[error("Invalid scrape request: {0}")]
    InvalidRequest(String),

    #[error("Field parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid field locator: {0}")]
    InvalidLocator(String),
}

/// Errors raised while turning raw page text into typed field values
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("review count {raw:?} is not a number")]
    ReviewCount { raw: String },

    #[error("rating {raw:?} is not a number")]
    Rating { raw: String },
}

/// Result type alias for Mapscout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use events::{EventBus, ScrapeEvent};
pub use record::{Coordinates, Record, RecordBuilder};
pub use scraper::{scrape, ScrapeReport, ScrapeRequest};
pub use state::DiscoveryState;
