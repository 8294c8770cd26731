//! Valid-time resolution: parsing the compact Zulu range carried in a
//! layer's `valid_time` attribute and rendering it for display.
//!
//! The raw attribute looks like `"00Z 01/15/24 - 08Z 01/17/24"`: two tokens
//! separated by a hyphen, each token a two-digit UTC hour with a `Z`
//! designator followed by an `MM/DD/YY` date (years offset from 2000).
//! Display output is fixed to US Eastern time with standard DST rules.

use std::future::Future;

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::America::New_York;

use crate::error::LayerError;

/// Separator used between the formatted start and end instants. The upstream
/// data uses a plain hyphen on the wire; display output uses an en-dash.
const RANGE_SEPARATOR: &str = " \u{2013} ";

/// A forecast validity window: start and end instants, minute precision,
/// UTC-rooted at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidTimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ValidTimeRange {
    /// Parse a raw `valid_time` attribute value.
    ///
    /// The two timestamp tokens are split on the single `-` range separator
    /// (dates use `/`, so the hyphen is unambiguous), with surrounding
    /// whitespace tolerated.
    pub fn parse(raw: &str) -> Result<Self, LayerError> {
        let (start, end) = raw
            .split_once('-')
            .ok_or_else(|| LayerError::Parse(raw.to_string()))?;

        Ok(Self {
            start: parse_token(start.trim())?,
            end: parse_token(end.trim())?,
        })
    }

    /// Render the window as a single Eastern-time display string, e.g.
    /// `"Sun Jan 14 07:00PM ET – Wed Jan 17 03:00AM ET"`.
    pub fn display(&self) -> String {
        format!(
            "{}{}{}",
            format_eastern(self.start),
            RANGE_SEPARATOR,
            format_eastern(self.end)
        )
    }
}

/// Parse one timestamp token of the form `"<HH>Z <MM>/<DD>/<YY>"` into an
/// absolute UTC instant. The triple is taken as UTC directly; no timezone
/// shift is applied at parse time.
///
/// Malformed tokens (missing `Z` or space, non-numeric or out-of-range
/// components, non-existent calendar dates) are upstream data corruption and
/// map to [`LayerError::Parse`] with no recovery.
pub fn parse_token(token: &str) -> Result<DateTime<Utc>, LayerError> {
    let malformed = || LayerError::Parse(token.to_string());

    let (zulu, date) = token.split_once(' ').ok_or_else(malformed)?;
    let hour: u32 = zulu
        .strip_suffix('Z')
        .ok_or_else(malformed)?
        .parse()
        .map_err(|_| malformed())?;
    if hour > 23 {
        return Err(malformed());
    }

    let mut parts = date.split('/');
    let (mm, dd, yy) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(mm), Some(dd), Some(yy), None) => (mm, dd, yy),
        _ => return Err(malformed()),
    };
    let month: u32 = mm.parse().map_err(|_| malformed())?;
    let day: u32 = dd.parse().map_err(|_| malformed())?;
    let year: i32 = yy.parse().map_err(|_| malformed())?;

    // Rejects impossible dates (month 13, Feb 30, ...) via chrono.
    Utc.with_ymd_and_hms(2000 + year, month, day, hour, 0, 0)
        .single()
        .ok_or_else(malformed)
}

/// Format an instant in US Eastern time as
/// `"<ShortWeekday> <ShortMonth> <Day> <HH>:<MM><AM/PM> ET"`.
///
/// Deterministic for a fixed instant: the only inputs are the instant and
/// the IANA rule table for America/New_York compiled into chrono-tz.
pub fn format_eastern(instant: DateTime<Utc>) -> String {
    let eastern = instant.with_timezone(&New_York);
    format!("{} ET", eastern.format("%a %b %-d %I:%M%p"))
}

/// Resolve one layer's display label: invoke the fetch capability once,
/// parse the raw range, and format both ends.
///
/// This is a pure transformation apart from the single fetch call. Fetch
/// failures, empty result sets, and malformed tokens all propagate; no
/// default string is synthesized and no retry is attempted here — any retry
/// policy belongs to the fetch collaborator, and the placeholder-vs-error
/// decision belongs to the caller.
pub async fn resolve_valid_time<F, Fut>(fetch: F) -> Result<String, LayerError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<String, LayerError>>,
{
    let raw = fetch().await?;
    let range = ValidTimeRange::parse(&raw)?;
    Ok(range.display())
}
