//! Per-listing extraction
//!
//! Opens one listing's detail panel and applies the configured field table to
//! it. Any error aborts the listing as a whole; a missing field does not.

use super::fields::{parse_coordinates, parse_rating, parse_review_count};
use super::settle;
use crate::browser::{BrowserSession, ReadTarget};
use crate::config::{Config, FieldKind};
use crate::record::{Record, RecordBuilder};
use crate::{ParseError, Result};

/// Builds a record for the listing behind `handle`
pub(crate) async fn extract<S: BrowserSession>(
    session: &mut S,
    handle: &S::Handle,
    config: &Config,
) -> Result<Record> {
    session.click(handle).await?;
    settle(config.delays.after_click_ms).await;

    let mut builder = Record::builder();

    let label = session
        .handle_attribute(handle, &config.directory.name_attribute)
        .await?;
    if let Some(name) = non_empty(label) {
        builder = builder.name(name);
    }

    for locator in config.fields.iter() {
        let target = ReadTarget::from_config(&locator.read, locator.attribute.as_deref());
        let Some(raw) = non_empty(session.read_first(&locator.xpath, target).await?) else {
            tracing::trace!("Field {} not found", locator.name);
            continue;
        };
        builder = apply_field(builder, locator.name, raw)?;
    }

    let coordinates = match session.current_url().await {
        Ok(url) => url.as_deref().and_then(parse_coordinates),
        Err(e) => {
            tracing::debug!("Could not read listing URL: {}", e);
            None
        }
    };

    Ok(builder.coordinates(coordinates).build())
}

fn apply_field(
    builder: RecordBuilder,
    kind: FieldKind,
    raw: String,
) -> std::result::Result<RecordBuilder, ParseError> {
    Ok(match kind {
        FieldKind::Address => builder.address(raw),
        FieldKind::Website => builder.website(raw),
        FieldKind::PhoneNumber => builder.phone_number(raw),
        FieldKind::ReviewsCount => builder.reviews_count(parse_review_count(&raw)?),
        FieldKind::ReviewsAverage => builder.reviews_average(parse_rating(&raw)?),
    })
}

/// Trims a raw value, treating blank text as absent
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
