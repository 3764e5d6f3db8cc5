//! Browser session abstraction
//!
//! Defines the `BrowserSession` trait the scraper drives. The live
//! implementation is [`chromium::ChromiumSession`]; unit tests use a scripted
//! session so discovery and extraction can run without a browser.
//!
//! All element lookups take XPath expressions, because the directory's
//! locators are configuration and XPath is what they are written in.

pub mod chromium;
#[cfg(test)]
pub(crate) mod scripted;

use crate::config::ReadMode;
use crate::Result;
use async_trait::async_trait;
use std::time::Duration;

pub use chromium::{find_chromium, ChromiumSession};

/// How to read a located element's value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadTarget<'a> {
    /// Rendered text of the element
    Text,
    /// Value of the named attribute
    Attribute(&'a str),
}

impl<'a> ReadTarget<'a> {
    /// Builds a read target from a configured read mode and optional attribute
    pub fn from_config(read: &ReadMode, attribute: Option<&'a str>) -> Self {
        match (read, attribute) {
            (ReadMode::Attribute, Some(name)) => Self::Attribute(name),
            _ => Self::Text,
        }
    }
}

/// A single live page the scraper drives
///
/// A `Handle` is an opaque reference to a listing element. It is only valid
/// for the session that produced it.
#[async_trait]
pub trait BrowserSession: Send {
    type Handle: Send + Sync;

    /// Navigate to `url`, failing if it does not load within `timeout`
    async fn goto(&mut self, url: &str, timeout: Duration) -> Result<()>;

    /// Reload the current page
    async fn reload(&mut self, timeout: Duration) -> Result<()>;

    /// Type `text` into the first element matching `xpath`
    async fn fill(&mut self, xpath: &str, text: &str) -> Result<()>;

    /// Press a named key (e.g. "Enter") on the first element matching `xpath`
    async fn press_key(&mut self, xpath: &str, key: &str) -> Result<()>;

    /// Move the pointer over the first element matching `xpath`
    async fn hover(&mut self, xpath: &str) -> Result<()>;

    /// Dispatch a vertical mouse wheel event at the pointer position
    async fn wheel(&mut self, delta_y: f64) -> Result<()>;

    /// Number of elements currently matching `xpath`
    async fn count(&mut self, xpath: &str) -> Result<usize>;

    /// Handles for every element matching `xpath`, in document order
    async fn elements(&mut self, xpath: &str) -> Result<Vec<Self::Handle>>;

    /// Click a handle
    async fn click(&mut self, handle: &Self::Handle) -> Result<()>;

    /// Read an attribute of a handle
    async fn handle_attribute(&mut self, handle: &Self::Handle, name: &str)
        -> Result<Option<String>>;

    /// Read the first element matching `xpath`
    ///
    /// Returns `Ok(None)` when nothing matches or the element has no such
    /// value; errors are reserved for a broken session.
    async fn read_first(&mut self, xpath: &str, target: ReadTarget<'_>) -> Result<Option<String>>;

    /// URL of the current page
    async fn current_url(&mut self) -> Result<Option<String>>;

    /// Release the session; called exactly once per scrape
    async fn close(self) -> Result<()>
    where
        Self: Sized;
}
