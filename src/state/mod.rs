//! State module for tracking scrape progress
//!
//! # Components
//!
//! - `DiscoveryState`: where the listing discovery loop stands
//! - `Observation` / `DiscoveryAction` / `Transition`: inputs and outputs of its
//!   pure transition function

mod discovery_state;

// Re-export main types
pub use discovery_state::{DiscoveryAction, DiscoveryState, Observation, Transition};
