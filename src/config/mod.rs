//! Configuration module for Mapscout
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! The directory's markup is outside our control, so every locator and settle
//! delay lives here rather than in the scraper.
//!
//! # Example
//!
//! ```no_run
//! use mapscout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("mapscout.toml")).unwrap();
//! println!("Scroll offset: {}", config.discovery.scroll_delta_px);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    BrowserConfig, Config, DelayConfig, DirectoryConfig, DiscoveryConfig, FieldKind,
    FieldLocator, FieldTable, ReadMode,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
