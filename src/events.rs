//! Scrape event bus
//!
//! The scraper never talks to a display. It publishes [`ScrapeEvent`]s on a
//! `tokio::sync::broadcast` channel and whatever front end is attached (the
//! CLI logger, a test) subscribes. With no subscribers, events are dropped.

use crate::state::DiscoveryState;
use tokio::sync::broadcast;

const DEFAULT_CAPACITY: usize = 256;

/// Everything the scraper reports while it runs
#[derive(Debug, Clone, PartialEq)]
pub enum ScrapeEvent {
    /// The search query was typed and submitted
    SearchSubmitted { query: String },

    /// One scroll iteration finished
    ScrollProgress { iteration: u32, rendered: usize },

    /// A transient discovery failure consumed one retry
    DiscoveryRetry {
        attempt: u32,
        max_retries: u32,
        error: String,
    },

    /// Discovery stopped
    DiscoveryFinished {
        state: DiscoveryState,
        listings: usize,
    },

    /// A listing produced a record
    ListingExtracted {
        index: usize,
        name: Option<String>,
        fields_found: usize,
    },

    /// A listing was skipped after a per-listing failure
    ListingFailed { index: usize, error: String },

    /// Closing the browser session failed
    SessionCloseFailed { error: String },

    /// The whole invocation finished
    ScrapeFinished { records: usize, failures: usize },
}

impl ScrapeEvent {
    /// Returns true for events the operator should be warned about
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::DiscoveryRetry { .. } | Self::ListingFailed { .. } | Self::SessionCloseFailed { .. }
        )
    }
}

/// Broadcast channel carrying [`ScrapeEvent`]s
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ScrapeEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes an event; silently dropped when nobody listens
    pub fn emit(&self, event: ScrapeEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ScrapeEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
