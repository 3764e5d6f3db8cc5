//! Parsers turning raw listing text into typed field values

use crate::record::Coordinates;
use crate::ParseError;

/// Parses a review count such as `"1,234 reviews"` or `"(87)"`
///
/// Only the first whitespace-separated token counts. Thousands separators and
/// surrounding parentheses are stripped before parsing.
pub fn parse_review_count(raw: &str) -> Result<u64, ParseError> {
    let token = raw.split_whitespace().next().unwrap_or_default();
    let digits: String = token
        .trim_matches(|c| c == '(' || c == ')')
        .chars()
        .filter(|c| *c != ',')
        .collect();

    digits.parse().map_err(|_| ParseError::ReviewCount {
        raw: raw.to_string(),
    })
}

/// Parses an average rating such as `"4.5 stars"` or `"4,5 stars"`
pub fn parse_rating(raw: &str) -> Result<f64, ParseError> {
    let token = raw.split_whitespace().next().unwrap_or_default();
    token
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseError::Rating {
            raw: raw.to_string(),
        })
}

/// Extracts coordinates from a listing URL like `.../@40.7128,-74.0060,17z/...`
///
/// Returns `None` when the `/@` marker is missing or the segment after it does
/// not start with two numbers.
pub fn parse_coordinates(url: &str) -> Option<Coordinates> {
    let (_, tail) = url.rsplit_once("/@")?;
    let segment = tail.split('/').next()?;
    let mut tokens = segment.split(',');

    let latitude = tokens.next()?.trim().parse::<f64>().ok()?;
    let longitude = tokens.next()?.trim().parse::<f64>().ok()?;
    if !latitude.is_finite() || !longitude.is_finite() {
        return None;
    }

    Some(Coordinates {
        latitude,
        longitude,
    })
}
