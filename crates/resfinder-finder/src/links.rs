//! `tel:` and directions URLs for a selected resource.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use resfinder_core::Coordinate;

const DIRECTIONS_BASE: &str = "https://www.google.com/maps/dir/";

/// Characters left bare in a directions path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b',');

/// Digits of `number`, keeping a leading `+` for international numbers.
#[must_use]
pub fn dial_string(number: &str) -> String {
    let trimmed = number.trim_start();
    let mut out = String::with_capacity(trimmed.len());
    if trimmed.starts_with('+') {
        out.push('+');
    }
    out.extend(trimmed.chars().filter(char::is_ascii_digit));
    out
}

/// `tel:` URI for `number`, or `None` when it has no digits to dial.
#[must_use]
pub fn tel_uri(number: &str) -> Option<String> {
    let dial = dial_string(number);
    dial.bytes()
        .any(|b| b.is_ascii_digit())
        .then(|| format!("tel:{dial}"))
}

/// Turn-by-turn directions from `origin` to a street address.
#[must_use]
pub fn directions_url(origin: Coordinate, destination: &str) -> String {
    format!(
        "{DIRECTIONS_BASE}{},{}/{}",
        origin.latitude(),
        origin.longitude(),
        utf8_percent_encode(destination.trim(), PATH_SEGMENT)
    )
}
