//! Listing discovery
//!
//! Submits the search, then scrolls the results panel until enough listing
//! anchors are rendered, the count stops growing, or the retry budget runs
//! out. Every stopping decision comes from [`DiscoveryState::advance`]; this
//! module only performs the browser actions around it.

use super::settle;
use crate::browser::BrowserSession;
use crate::config::Config;
use crate::events::{EventBus, ScrapeEvent};
use crate::state::{DiscoveryAction, DiscoveryState, Observation};
use crate::{Result, ScoutError};

/// Outcome of the discovery phase
pub(crate) struct Discovery<H> {
    pub state: DiscoveryState,
    pub handles: Vec<H>,
}

/// Discovers at most `target` listing handles for `query`
///
/// Opening the directory and submitting the search happen once, up front, and
/// any failure there is returned as an error. After that, transient errors
/// consume the shared retry budget and an exhausted budget yields an empty
/// result.
pub(crate) async fn discover<S: BrowserSession>(
    session: &mut S,
    query: &str,
    target: usize,
    config: &Config,
    events: &EventBus,
) -> Result<Discovery<S::Handle>> {
    submit_search(session, query, config).await?;
    tracing::info!("Searched for {:?}", query);
    events.emit(ScrapeEvent::SearchSubmitted {
        query: query.to_string(),
    });

    let max_retries = config.discovery.max_retries;
    let mut baseline = 0;
    let mut retries_used = 0;
    let mut iteration = 0u32;
    let mut carried: Option<ScoutError> = None;

    loop {
        let step = match carried.take() {
            Some(e) => Err(e),
            None => scroll_and_count(session, config).await,
        };

        let (observation, error) = match step {
            Ok(rendered) => {
                iteration += 1;
                tracing::debug!("Scroll {}: {} listings rendered", iteration, rendered);
                events.emit(ScrapeEvent::ScrollProgress {
                    iteration,
                    rendered,
                });
                (Observation::Rendered(rendered), None)
            }
            Err(e) => (Observation::Failed, Some(e)),
        };

        let transition =
            DiscoveryState::advance(baseline, observation, target, retries_used, max_retries);
        baseline = transition.baseline;
        retries_used = transition.retries_used;

        if let Some(e) = &error {
            tracing::debug!(
                "Discovery attempt failed ({}/{}): {}",
                retries_used,
                max_retries,
                e
            );
            events.emit(ScrapeEvent::DiscoveryRetry {
                attempt: retries_used,
                max_retries,
                error: e.to_string(),
            });
        }

        match transition.action {
            DiscoveryAction::ScrollAgain => {}
            DiscoveryAction::Collect { limit } => {
                match session.elements(&config.directory.listing_container).await {
                    Ok(mut handles) => {
                        if let Some(limit) = limit {
                            if handles.len() < limit {
                                // listing-container must yield one node per anchor
                                tracing::warn!(
                                    "{} listing anchors rendered but only {} containers matched",
                                    baseline,
                                    handles.len()
                                );
                            }
                            handles.truncate(limit);
                        }
                        return Ok(finish(transition.state, handles, events));
                    }
                    // retried like any other transient failure
                    Err(e) => carried = Some(e),
                }
            }
            DiscoveryAction::Reload => {
                if let Err(e) = session.reload(config.browser.navigation_timeout()).await {
                    tracing::warn!("Reload failed: {}", e);
                }
                settle(config.delays.after_reload_ms).await;
            }
            DiscoveryAction::GiveUp => {
                return Ok(finish(transition.state, Vec::new(), events));
            }
        }
    }
}

fn finish<H>(state: DiscoveryState, handles: Vec<H>, events: &EventBus) -> Discovery<H> {
    tracing::info!("Discovery {} with {} listings", state, handles.len());
    events.emit(ScrapeEvent::DiscoveryFinished {
        state,
        listings: handles.len(),
    });
    Discovery { state, handles }
}

async fn submit_search<S: BrowserSession>(
    session: &mut S,
    query: &str,
    config: &Config,
) -> Result<()> {
    let directory = &config.directory;
    let delays = &config.delays;

    session
        .goto(&directory.base_url, config.browser.navigation_timeout())
        .await?;
    settle(delays.page_load_ms).await;

    session.fill(&directory.search_input, query).await?;
    settle(delays.after_fill_ms).await;

    session.press_key(&directory.search_input, "Enter").await?;
    settle(delays.after_search_ms).await;

    Ok(())
}

async fn scroll_and_count<S: BrowserSession>(session: &mut S, config: &Config) -> Result<usize> {
    let anchor = &config.directory.listing_anchor;

    // the wheel only scrolls the panel under the pointer
    session.hover(anchor).await?;
    session.wheel(config.discovery.scroll_delta_px).await?;
    settle(config.delays.after_scroll_ms).await;

    session.count(anchor).await
}
