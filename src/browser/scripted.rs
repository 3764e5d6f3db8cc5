//! In-memory browser session for tests
//!
//! Plays back a fixed script: how many listing anchors are rendered after each
//! scroll, which listings exist, and what each listing's detail panel shows.

use super::{BrowserSession, ReadTarget};
use crate::{Result, ScoutError};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// One scripted response to a listing count
#[derive(Debug, Clone, Copy)]
pub(crate) enum Step {
    Rendered(usize),
    Fail,
}

/// One listing as the scripted directory shows it
#[derive(Debug, Clone, Default)]
pub(crate) struct ScriptedListing {
    pub label: Option<String>,
    pub fields: HashMap<String, String>,
    pub url: Option<String>,
    pub fail_click: bool,
}

impl ScriptedListing {
    pub fn named(label: &str) -> Self {
        Self {
            label: Some(label.to_string()),
            ..Self::default()
        }
    }

    pub fn with_field(mut self, xpath: &str, value: &str) -> Self {
        self.fields.insert(xpath.to_string(), value.to_string());
        self
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    pub fn failing_click(mut self) -> Self {
        self.fail_click = true;
        self
    }
}

/// Call counters that outlive the session
#[derive(Debug, Clone, Default)]
pub(crate) struct CallCounts {
    pub searches: Arc<AtomicUsize>,
    pub scrolls: Arc<AtomicUsize>,
    pub reloads: Arc<AtomicUsize>,
    pub closes: Arc<AtomicUsize>,
}

impl CallCounts {
    pub fn searches(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }

    pub fn scrolls(&self) -> usize {
        self.scrolls.load(Ordering::SeqCst)
    }

    pub fn reloads(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ScriptedHandle(pub usize);

pub(crate) struct ScriptedSession {
    steps: VecDeque<Step>,
    rendered: usize,
    listings: Vec<ScriptedListing>,
    active: Option<usize>,
    navigation_fails: bool,
    element_failures: usize,
    close_fails: bool,
    calls: CallCounts,
}

impl ScriptedSession {
    pub fn new(steps: Vec<Step>, listings: Vec<ScriptedListing>) -> Self {
        Self {
            steps: steps.into(),
            rendered: 0,
            listings,
            active: None,
            navigation_fails: false,
            element_failures: 0,
            close_fails: false,
            calls: CallCounts::default(),
        }
    }

    /// Makes every navigation time out
    pub fn failing_navigation(mut self) -> Self {
        self.navigation_fails = true;
        self
    }

    /// Makes the first `n` container collections fail
    pub fn failing_elements(mut self, n: usize) -> Self {
        self.element_failures = n;
        self
    }

    pub fn failing_close(mut self) -> Self {
        self.close_fails = true;
        self
    }

    pub fn call_counts(&self) -> CallCounts {
        self.calls.clone()
    }
}

#[async_trait]
impl BrowserSession for ScriptedSession {
    type Handle = ScriptedHandle;

    async fn goto(&mut self, url: &str, timeout: Duration) -> Result<()> {
        if self.navigation_fails {
            return Err(ScoutError::Timeout {
                url: url.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            });
        }
        self.active = None;
        Ok(())
    }

    async fn reload(&mut self, _timeout: Duration) -> Result<()> {
        self.calls.reloads.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn fill(&mut self, _xpath: &str, _text: &str) -> Result<()> {
        Ok(())
    }

    async fn press_key(&mut self, _xpath: &str, _key: &str) -> Result<()> {
        self.calls.searches.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn hover(&mut self, _xpath: &str) -> Result<()> {
        Ok(())
    }

    async fn wheel(&mut self, _delta_y: f64) -> Result<()> {
        self.calls.scrolls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn count(&mut self, _xpath: &str) -> Result<usize> {
        // the last rendered count repeats once the script runs out
        match self.steps.pop_front() {
            Some(Step::Rendered(n)) => {
                self.rendered = n;
                Ok(n)
            }
            Some(Step::Fail) => Err(ScoutError::Script("scripted failure".to_string())),
            None => Ok(self.rendered),
        }
    }

    async fn elements(&mut self, _xpath: &str) -> Result<Vec<ScriptedHandle>> {
        if self.element_failures > 0 {
            self.element_failures -= 1;
            return Err(ScoutError::Script("node is detached from document".to_string()));
        }
        let visible = self.rendered.min(self.listings.len());
        Ok((0..visible).map(ScriptedHandle).collect())
    }

    async fn click(&mut self, handle: &ScriptedHandle) -> Result<()> {
        let listing = self
            .listings
            .get(handle.0)
            .ok_or_else(|| ScoutError::Script("detached handle".to_string()))?;
        if listing.fail_click {
            return Err(ScoutError::Script("element is not clickable".to_string()));
        }
        self.active = Some(handle.0);
        Ok(())
    }

    async fn handle_attribute(
        &mut self,
        handle: &ScriptedHandle,
        _name: &str,
    ) -> Result<Option<String>> {
        Ok(self.listings.get(handle.0).and_then(|l| l.label.clone()))
    }

    async fn read_first(&mut self, xpath: &str, _target: ReadTarget<'_>) -> Result<Option<String>> {
        Ok(self
            .active
            .and_then(|i| self.listings.get(i))
            .and_then(|l| l.fields.get(xpath).cloned()))
    }

    async fn current_url(&mut self) -> Result<Option<String>> {
        Ok(self
            .active
            .and_then(|i| self.listings.get(i))
            .and_then(|l| l.url.clone()))
    }

    async fn close(self) -> Result<()> {
        self.calls.closes.fetch_add(1, Ordering::SeqCst);
        if self.close_fails {
            return Err(ScoutError::Script("browser already gone".to_string()));
        }
        Ok(())
    }
}
