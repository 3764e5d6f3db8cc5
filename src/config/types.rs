use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for Mapscout
///
/// Every section falls back to its defaults, so an empty file (or no file at
/// all) targets the public map directory with the stock locators.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub browser: BrowserConfig,
    pub directory: DirectoryConfig,
    pub delays: DelayConfig,
    pub discovery: DiscoveryConfig,
    #[serde(rename = "field")]
    pub fields: FieldTable,
}

/// Headless browser launch settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Explicit Chromium binary; looked up on PATH when unset
    pub executable: Option<PathBuf>,

    /// Run without a visible window
    pub headless: bool,

    /// Upper bound for a single navigation (milliseconds)
    #[serde(rename = "navigation-timeout-ms")]
    pub navigation_timeout_ms: u64,

    #[serde(rename = "window-width")]
    pub window_width: u32,

    #[serde(rename = "window-height")]
    pub window_height: u32,
}

impl BrowserConfig {
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            executable: None,
            headless: true,
            navigation_timeout_ms: 60_000,
            window_width: 1280,
            window_height: 900,
        }
    }
}

/// Where the directory lives and how its search view is structured
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Landing page of the directory
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// XPath of the search text input
    #[serde(rename = "search-input")]
    pub search_input: String,

    /// XPath matching every rendered listing anchor in the results panel
    #[serde(rename = "listing-anchor")]
    pub listing_anchor: String,

    /// XPath matching the clickable container around each listing anchor
    ///
    /// Must match one node per anchor. Anchors sharing a parent collapse into a
    /// single container, and discovery then returns fewer handles than the
    /// rendered anchor count.
    #[serde(rename = "listing-container")]
    pub listing_container: String,

    /// Attribute on a listing container that carries the listing name
    #[serde(rename = "name-attribute")]
    pub name_attribute: String,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.google.com/maps".to_string(),
            search_input: r#"//input[@id="searchboxinput"]"#.to_string(),
            listing_anchor: r#"//a[contains(@href, "https://www.google.com/maps/place")]"#
                .to_string(),
            listing_container: r#"//a[contains(@href, "https://www.google.com/maps/place")]/.."#
                .to_string(),
            name_attribute: "aria-label".to_string(),
        }
    }
}

/// Fixed settle delays inserted after page-mutating actions (milliseconds)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DelayConfig {
    #[serde(rename = "page-load-ms")]
    pub page_load_ms: u64,

    #[serde(rename = "after-fill-ms")]
    pub after_fill_ms: u64,

    #[serde(rename = "after-search-ms")]
    pub after_search_ms: u64,

    #[serde(rename = "after-scroll-ms")]
    pub after_scroll_ms: u64,

    #[serde(rename = "after-click-ms")]
    pub after_click_ms: u64,

    #[serde(rename = "after-reload-ms")]
    pub after_reload_ms: u64,
}

impl DelayConfig {
    /// All delays set to zero, for scripted sessions
    pub fn none() -> Self {
        Self {
            page_load_ms: 0,
            after_fill_ms: 0,
            after_search_ms: 0,
            after_scroll_ms: 0,
            after_click_ms: 0,
            after_reload_ms: 0,
        }
    }

    /// Every delay with its config key, in pipeline order
    pub fn all(&self) -> [(&'static str, u64); 6] {
        [
            ("page-load-ms", self.page_load_ms),
            ("after-fill-ms", self.after_fill_ms),
            ("after-search-ms", self.after_search_ms),
            ("after-scroll-ms", self.after_scroll_ms),
            ("after-click-ms", self.after_click_ms),
            ("after-reload-ms", self.after_reload_ms),
        ]
    }
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            page_load_ms: 5000,
            after_fill_ms: 3000,
            after_search_ms: 5000,
            after_scroll_ms: 3000,
            after_click_ms: 5000,
            after_reload_ms: 5000,
        }
    }
}

/// Scroll loop tuning
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Transient failures tolerated during one discovery phase
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Vertical wheel offset used to trigger lazy loading
    #[serde(rename = "scroll-delta-px")]
    pub scroll_delta_px: f64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            scroll_delta_px: 10_000.0,
        }
    }
}

/// The record fields that can be read from a listing's detail panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Address,
    Website,
    PhoneNumber,
    ReviewsCount,
    ReviewsAverage,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Address => "address",
            Self::Website => "website",
            Self::PhoneNumber => "phone_number",
            Self::ReviewsCount => "reviews_count",
            Self::ReviewsAverage => "reviews_average",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the value of a located element is read
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadMode {
    /// The element's rendered text
    Text,
    /// One of the element's attributes (named by `FieldLocator::attribute`)
    Attribute,
}

/// One row of the field table: which field, where it lives, how to read it
#[derive(Debug, Clone, Deserialize)]
pub struct FieldLocator {
    pub name: FieldKind,
    pub xpath: String,
    pub read: ReadMode,
    #[serde(default)]
    pub attribute: Option<String>,
}

impl FieldLocator {
    pub fn text(name: FieldKind, xpath: &str) -> Self {
        Self {
            name,
            xpath: xpath.to_string(),
            read: ReadMode::Text,
            attribute: None,
        }
    }

    pub fn attribute(name: FieldKind, xpath: &str, attribute: &str) -> Self {
        Self {
            name,
            xpath: xpath.to_string(),
            read: ReadMode::Attribute,
            attribute: Some(attribute.to_string()),
        }
    }
}

/// Ordered list of field locators applied to every listing
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct FieldTable(pub Vec<FieldLocator>);

impl FieldTable {
    pub fn iter(&self) -> std::slice::Iter<'_, FieldLocator> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for FieldTable {
    fn default() -> Self {
        Self(vec![
            FieldLocator::text(
                FieldKind::Address,
                r#"//button[@data-item-id="address"]//div[contains(@class, "fontBodyMedium")]"#,
            ),
            FieldLocator::text(
                FieldKind::Website,
                r#"//a[@data-item-id="authority"]//div[contains(@class, "fontBodyMedium")]"#,
            ),
            FieldLocator::text(
                FieldKind::PhoneNumber,
                r#"//button[contains(@data-item-id, "phone:tel:")]//div[contains(@class, "fontBodyMedium")]"#,
            ),
            FieldLocator::text(
                FieldKind::ReviewsCount,
                r#"//button[@jsaction="pane.reviewChart.moreReviews"]//span"#,
            ),
            FieldLocator::attribute(
                FieldKind::ReviewsAverage,
                r#"//div[@jsaction="pane.reviewChart.moreReviews"]//div[@role="img"]"#,
                "aria-label",
            ),
        ])
    }
}
