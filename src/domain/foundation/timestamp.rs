//! Timestamp value object and the lenient parser used for upstream dates.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::errors::ValidationError;

/// Naive layouts accepted after RFC3339 fails. `%.f` makes the fraction optional.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Formats as RFC3339, which the search engine's date fields accept.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }

    /// Parses the timestamp layouts the submission system is known to emit.
    ///
    /// Accepted, in order:
    /// - RFC3339 with offset, including nanosecond precision
    /// - `YYYY-MM-DDTHH:MM:SS[.ffffff]` (interpreted as UTC)
    /// - `YYYY-MM-DD HH:MM:SS[.ffffff]` (interpreted as UTC)
    ///
    /// An empty string or the literal `null` means "no timestamp" and yields
    /// `Ok(None)`.
    pub fn parse_flexible(raw: &str) -> Result<Option<Self>, ValidationError> {
        let s = raw.trim().trim_matches('"');
        if s.is_empty() || s == "null" {
            return Ok(None);
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Some(Self(dt.with_timezone(&Utc))));
        }

        NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
            .map(|naive| Some(Self(naive.and_utc())))
            .ok_or_else(|| ValidationError::invalid_format("timestamp", format!("unrecognized '{}'", s)))
    }
}
