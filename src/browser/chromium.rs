//! Chromium-backed browser session using chromiumoxide.

use super::{BrowserSession, ReadTarget};
use crate::config::BrowserConfig;
use crate::{Result, ScoutError};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig as LaunchConfig};
use chromiumoxide::cdp::browser_protocol::input::{
    DispatchMouseEventParams, DispatchMouseEventType,
};
use chromiumoxide::element::Element;
use chromiumoxide::layout::Point;
use chromiumoxide::page::Page;
use futures::StreamExt;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Find the Chromium binary path.
pub fn find_chromium() -> Option<PathBuf> {
    // 1. MAPSCOUT_CHROMIUM_PATH env
    if let Ok(p) = std::env::var("MAPSCOUT_CHROMIUM_PATH") {
        let path = PathBuf::from(&p);
        if path.exists() {
            return Some(path);
        }
    }

    // 2. System PATH
    for name in ["google-chrome", "chromium", "chromium-browser"] {
        if let Ok(path) = which::which(name) {
            return Some(path);
        }
    }

    // 3. Common macOS location
    if cfg!(target_os = "macos") {
        let common = PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome");
        if common.exists() {
            return Some(common);
        }
    }

    None
}

/// Shape of every value read back from the page
#[derive(Debug, Deserialize)]
struct ScriptValue {
    value: Option<String>,
}

/// A single Chromium browser with one page
pub struct ChromiumSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    pointer: Option<Point>,
}

impl ChromiumSession {
    /// Launches Chromium and opens a blank page
    ///
    /// Any failure here is a hard error: nothing can be scraped without a
    /// session.
    pub async fn launch(config: &BrowserConfig) -> Result<Self> {
        let executable = config
            .executable
            .clone()
            .or_else(find_chromium)
            .ok_or_else(|| {
                ScoutError::Launch(
                    "Chromium not found; set browser.executable or MAPSCOUT_CHROMIUM_PATH"
                        .to_string(),
                )
            })?;

        let mut builder = LaunchConfig::builder()
            .chrome_executable(executable)
            .window_size(config.window_width, config.window_height)
            .request_timeout(config.navigation_timeout())
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions");
        if !config.headless {
            builder = builder.with_head();
        }
        let launch = builder
            .build()
            .map_err(|e| ScoutError::Launch(format!("invalid browser config: {e}")))?;

        let (browser, mut handler) = Browser::launch(launch)
            .await
            .map_err(|e| ScoutError::Launch(e.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("browser handler event error: {}", e);
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| ScoutError::Launch(format!("failed to open page: {e}")))?;

        tracing::debug!("Chromium session started");

        Ok(Self {
            browser,
            page,
            handler,
            pointer: None,
        })
    }

    async fn first(&self, xpath: &str) -> Result<Element> {
        if self.count_matches(xpath).await? == 0 {
            return Err(ScoutError::NoMatch {
                xpath: xpath.to_string(),
            });
        }
        Ok(self.page.find_xpath(xpath).await?)
    }

    async fn count_matches(&self, xpath: &str) -> Result<usize> {
        let script = format!(
            "document.evaluate({}, document, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null).snapshotLength",
            js_string(xpath)?
        );
        self.page
            .evaluate(script)
            .await?
            .into_value::<usize>()
            .map_err(|e| ScoutError::Script(format!("count for {xpath}: {e}")))
    }
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    type Handle = Element;

    async fn goto(&mut self, url: &str, timeout: Duration) -> Result<()> {
        match tokio::time::timeout(timeout, self.page.goto(url)).await {
            Ok(Ok(_)) => {
                self.pointer = None;
                Ok(())
            }
            Ok(Err(e)) => Err(e.into()),
            Err(_) => Err(ScoutError::Timeout {
                url: url.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            }),
        }
    }

    async fn reload(&mut self, timeout: Duration) -> Result<()> {
        let url = self
            .current_url()
            .await?
            .ok_or_else(|| ScoutError::Script("page has no URL to reload".to_string()))?;
        self.goto(&url, timeout).await
    }

    async fn fill(&mut self, xpath: &str, text: &str) -> Result<()> {
        let input = self.first(xpath).await?;
        input.click().await?;
        input
            .call_js_fn("function() { this.value = ''; }", false)
            .await?;
        input.type_str(text).await?;
        Ok(())
    }

    async fn press_key(&mut self, xpath: &str, key: &str) -> Result<()> {
        let element = self.first(xpath).await?;
        element.press_key(key).await?;
        Ok(())
    }

    async fn hover(&mut self, xpath: &str) -> Result<()> {
        let element = self.first(xpath).await?;
        element.scroll_into_view().await?;
        let point = element.clickable_point().await?;
        self.page.move_mouse(point).await?;
        self.pointer = Some(point);
        Ok(())
    }

    async fn wheel(&mut self, delta_y: f64) -> Result<()> {
        let point = self.pointer.unwrap_or(Point { x: 0.0, y: 0.0 });
        let params = DispatchMouseEventParams::builder()
            .r#type(DispatchMouseEventType::MouseWheel)
            .x(point.x)
            .y(point.y)
            .delta_x(0.0)
            .delta_y(delta_y)
            .build()
            .map_err(ScoutError::Script)?;
        self.page.execute(params).await?;
        Ok(())
    }

    async fn count(&mut self, xpath: &str) -> Result<usize> {
        self.count_matches(xpath).await
    }

    async fn elements(&mut self, xpath: &str) -> Result<Vec<Element>> {
        // an empty DOM search result is an error in CDP, so check first
        if self.count_matches(xpath).await? == 0 {
            return Ok(Vec::new());
        }
        Ok(self.page.find_xpaths(xpath).await?)
    }

    async fn click(&mut self, handle: &Element) -> Result<()> {
        handle.click().await?;
        Ok(())
    }

    async fn handle_attribute(&mut self, handle: &Element, name: &str) -> Result<Option<String>> {
        Ok(handle.attribute(name).await?)
    }

    async fn read_first(&mut self, xpath: &str, target: ReadTarget<'_>) -> Result<Option<String>> {
        let read = match target {
            ReadTarget::Text => "node.innerText ?? node.textContent".to_string(),
            ReadTarget::Attribute(name) => format!("node.getAttribute({})", js_string(name)?),
        };
        let script = format!(
            "(() => {{ const node = document.evaluate({}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue; return {{ value: node ? {} : null }}; }})()",
            js_string(xpath)?,
            read
        );
        let value = self
            .page
            .evaluate(script)
            .await?
            .into_value::<ScriptValue>()
            .map_err(|e| ScoutError::Script(format!("read of {xpath}: {e}")))?;
        Ok(value.value)
    }

    async fn current_url(&mut self) -> Result<Option<String>> {
        Ok(self.page.url().await?.map(|u| u.to_string()))
    }

    async fn close(mut self) -> Result<()> {
        if let Err(e) = self.page.close().await {
            tracing::debug!("page close error: {}", e);
        }
        let closed = self.browser.close().await;
        if let Err(e) = self.browser.wait().await {
            tracing::debug!("browser exit wait error: {}", e);
        }
        self.handler.abort();
        closed?;
        tracing::debug!("Chromium session closed");
        Ok(())
    }
}

/// Quotes `value` as a JavaScript string literal
fn js_string(value: &str) -> Result<String> {
    serde_json::to_string(value).map_err(|e| ScoutError::Script(e.to_string()))
}
