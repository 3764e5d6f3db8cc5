//! Scrape orchestration
//!
//! Ties discovery and extraction together over one browser session:
//! - `discoverer`: search, scroll and collect listing handles
//! - `extractor`: turn one listing handle into a [`Record`]
//! - `fields`: parsers for review counts, ratings and coordinates
//!
//! Listings are processed strictly one after another on a single page, and
//! the session is closed exactly once whatever happens in between.

mod discoverer;
mod extractor;
pub mod fields;

use crate::browser::{BrowserSession, ChromiumSession};
use crate::config::Config;
use crate::events::{EventBus, ScrapeEvent};
use crate::record::Record;
use crate::state::DiscoveryState;
use crate::{Result, ScoutError};
use std::time::Duration;

pub use fields::{parse_coordinates, parse_rating, parse_review_count};

/// Upper bound on listings per invocation
pub const MAX_COUNT: usize = 100;

/// A validated search to run
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeRequest {
    query: String,
    count: usize,
}

impl ScrapeRequest {
    /// Creates a request for `count` listings matching `query`
    ///
    /// # Errors
    ///
    /// Returns `ScoutError::InvalidRequest` if the query is blank or `count`
    /// is outside `1..=100`.
    pub fn new(query: impl Into<String>, count: usize) -> Result<Self> {
        let query = query.into().trim().to_string();
        if query.is_empty() {
            return Err(ScoutError::InvalidRequest(
                "search query must not be empty".to_string(),
            ));
        }
        if !(1..=MAX_COUNT).contains(&count) {
            return Err(ScoutError::InvalidRequest(format!(
                "count must be between 1 and {}, got {}",
                MAX_COUNT, count
            )));
        }
        Ok(Self { query, count })
    }

    /// Restricts the search to a radius around the queried place
    pub fn with_radius(mut self, miles: u32) -> Self {
        self.query = format!("{} within {} miles", self.query, miles);
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

/// What one scrape produced
#[derive(Debug, Clone)]
pub struct ScrapeReport {
    /// Extracted records, in discovery order
    pub records: Vec<Record>,
    /// How discovery ended
    pub discovery_state: DiscoveryState,
    /// Listings skipped after a per-listing failure
    pub failures: usize,
}

/// Launches Chromium and runs a scrape with it
///
/// Failing to start the browser or to open the directory and submit the search
/// are hard errors; everything after that is reported through `events` and
/// reflected in the report.
pub async fn scrape(
    request: &ScrapeRequest,
    config: &Config,
    events: &EventBus,
) -> Result<ScrapeReport> {
    let session = ChromiumSession::launch(&config.browser).await?;
    run_scrape(session, request, config, events).await
}

/// Runs discovery then extraction over an already open session
///
/// Consumes the session and closes it before returning, on success and on
/// error alike.
pub async fn run_scrape<S: BrowserSession>(
    mut session: S,
    request: &ScrapeRequest,
    config: &Config,
    events: &EventBus,
) -> Result<ScrapeReport> {
    tracing::info!(
        "Scraping up to {} listings for {:?}",
        request.count(),
        request.query()
    );

    let discovery =
        match discoverer::discover(&mut session, request.query(), request.count(), config, events)
            .await
        {
            Ok(discovery) => discovery,
            Err(e) => {
                tracing::debug!("Search failed: {}", e);
                close_session(session, events).await;
                return Err(e);
            }
        };

    let mut records = Vec::with_capacity(discovery.handles.len());
    let mut failures = 0;

    for (index, handle) in discovery.handles.iter().enumerate() {
        match extractor::extract(&mut session, handle, config).await {
            Ok(record) => {
                tracing::debug!(
                    "Listing {}: {:?} ({} fields)",
                    index,
                    record.name(),
                    record.found_fields().len()
                );
                events.emit(ScrapeEvent::ListingExtracted {
                    index,
                    name: record.name().map(str::to_string),
                    fields_found: record.found_fields().len(),
                });
                records.push(record);
            }
            Err(e) => {
                failures += 1;
                tracing::debug!("Skipping listing {}: {}", index, e);
                events.emit(ScrapeEvent::ListingFailed {
                    index,
                    error: e.to_string(),
                });
            }
        }
    }

    close_session(session, events).await;

    tracing::info!(
        "Scrape complete: {} records, {} skipped",
        records.len(),
        failures
    );
    events.emit(ScrapeEvent::ScrapeFinished {
        records: records.len(),
        failures,
    });

    Ok(ScrapeReport {
        records,
        discovery_state: discovery.state,
        failures,
    })
}

async fn close_session<S: BrowserSession>(session: S, events: &EventBus) {
    if let Err(e) = session.close().await {
        tracing::debug!("Failed to close browser session: {}", e);
        events.emit(ScrapeEvent::SessionCloseFailed {
            error: e.to_string(),
        });
    }
}

/// Waits out a fixed settle delay
pub(crate) async fn settle(ms: u64) {
    if ms > 0 {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}
