//! Integration tests for the scraper
//!
//! These tests use wiremock to serve a small directory page and drive a real
//! Chromium against it. They need a local Chromium, so they are ignored by
//! default: run with `cargo test -- --ignored`.

use mapscout::config::{Config, DelayConfig, DirectoryConfig};
use mapscout::{scrape, DiscoveryState, EventBus, ScrapeEvent, ScrapeRequest};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A directory page shaped like the real one: a search box, a results panel
/// filled on Enter, and a detail panel filled when a listing is clicked.
const DIRECTORY_PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
  <input id="searchboxinput" type="text">
  <div id="results" style="height: 400px; overflow-y: scroll"></div>
  <div id="detail"></div>
  <script>
    const LISTINGS = [
      {
        name: "Alpha Pizza",
        slug: "Alpha+Pizza",
        at: "40.7128,-74.0060,17z",
        detail:
          '<button data-item-id="address"><div class="fontBodyMedium">1 Main St, New York</div></button>' +
          '<a data-item-id="authority"><div class="fontBodyMedium">alphapizza.test</div></a>' +
          '<button data-item-id="phone:tel:+12125550100"><div class="fontBodyMedium">(212) 555-0100</div></button>' +
          '<button jsaction="pane.reviewChart.moreReviews"><span>1,234 reviews</span></button>' +
          '<div jsaction="pane.reviewChart.moreReviews"><div role="img" aria-label="4,5 stars"></div></div>'
      },
      {
        name: "Bravo Slice",
        slug: "Bravo+Slice",
        at: "north,south",
        detail: '<button data-item-id="address"><div class="fontBodyMedium">2 Side Ave</div></button>'
      },
      {
        name: "Charlie Crust",
        slug: "Charlie+Crust",
        at: "40.7306,-74.0021,15z",
        detail: ''
      }
    ];

    function showDetail(listing, event) {
      event.preventDefault();
      document.getElementById("detail").innerHTML = listing.detail;
      history.pushState({}, "", "/maps/place/" + listing.slug + "/@" + listing.at + "/data=!4m2");
    }

    document.getElementById("searchboxinput").addEventListener("keydown", (event) => {
      if (event.key !== "Enter") return;
      const results = document.getElementById("results");
      results.innerHTML = "";
      for (const listing of LISTINGS) {
        const container = document.createElement("div");
        container.setAttribute("aria-label", listing.name);
        container.style.height = "120px";
        const anchor = document.createElement("a");
        anchor.href = "https://www.google.com/maps/place/" + listing.slug;
        anchor.textContent = listing.name;
        container.appendChild(anchor);
        container.addEventListener("click", (e) => showDetail(listing, e));
        results.appendChild(container);
      }
    });
  </script>
</body>
</html>
"#;

fn fixture_config(base_url: String) -> Config {
    Config {
        directory: DirectoryConfig {
            base_url,
            ..DirectoryConfig::default()
        },
        delays: DelayConfig {
            page_load_ms: 500,
            after_fill_ms: 100,
            after_search_ms: 300,
            after_scroll_ms: 200,
            after_click_ms: 300,
            after_reload_ms: 500,
        },
        ..Config::default()
    }
}

async fn directory_server() -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/maps"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(DIRECTORY_PAGE, "text/html"))
        .mount(&mock_server)
        .await;
    mock_server
}

#[tokio::test]
#[ignore] // Requires Chromium to be installed
async fn test_scrape_fixture_directory() {
    let mock_server = directory_server().await;
    let config = fixture_config(format!("{}/maps", mock_server.uri()));
    let request = ScrapeRequest::new("pizza", 3).expect("valid request");
    let events = EventBus::new();
    let mut rx = events.subscribe();

    let report = scrape(&request, &config, &events)
        .await
        .expect("scrape should run");

    assert_eq!(report.discovery_state, DiscoveryState::Satisfied);
    assert_eq!(report.failures, 0);
    assert_eq!(report.records.len(), 3);

    let alpha = &report.records[0];
    assert_eq!(alpha.name(), Some("Alpha Pizza"));
    assert_eq!(alpha.address(), Some("1 Main St, New York"));
    assert_eq!(alpha.website(), Some("alphapizza.test"));
    assert_eq!(alpha.phone_number(), Some("(212) 555-0100"));
    assert_eq!(alpha.reviews_count(), Some(1234));
    assert_eq!(alpha.reviews_average(), Some(4.5));
    assert_eq!(alpha.latitude(), Some(40.7128));
    assert_eq!(alpha.longitude(), Some(-74.0060));

    // malformed coordinates leave both unset, the rest of the record survives
    let bravo = &report.records[1];
    assert_eq!(bravo.name(), Some("Bravo Slice"));
    assert_eq!(bravo.address(), Some("2 Side Ave"));
    assert_eq!(bravo.website(), None);
    assert_eq!(bravo.coordinates(), None);

    let charlie = &report.records[2];
    assert_eq!(charlie.name(), Some("Charlie Crust"));
    assert_eq!(charlie.address(), None);
    assert_eq!(charlie.latitude(), Some(40.7306));

    let mut saw_search = false;
    while let Ok(event) = rx.try_recv() {
        if matches!(event, ScrapeEvent::SearchSubmitted { .. }) {
            saw_search = true;
        }
    }
    assert!(saw_search);
}

#[tokio::test]
#[ignore] // Requires Chromium to be installed
async fn test_scrape_plateaus_below_target() {
    let mock_server = directory_server().await;
    let config = fixture_config(format!("{}/maps", mock_server.uri()));
    let request = ScrapeRequest::new("pizza", 10).expect("valid request");
    let events = EventBus::new();

    let report = scrape(&request, &config, &events)
        .await
        .expect("scrape should run");

    assert_eq!(report.discovery_state, DiscoveryState::Plateaued);
    assert_eq!(report.records.len(), 3);
}
