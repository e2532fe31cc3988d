//! Cell formatting helpers.

use chrono::DateTime;
use chrono::FixedOffset;
use chrono::Locale;
use chrono::NaiveDateTime;

use crate::model::Record;
use crate::render::Cell;
use crate::render::RowAction;
use crate::render::Tone;

/// Locale used for month names.
pub const DEFAULT_LOCALE: Locale = Locale::id_ID;

/// Parses an RFC 3339 timestamp, or a `YYYY-MM-DD HH:MM:SS` one taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value).ok().or_else(|| {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
            .ok()
            .map(|naive| naive.and_utc().fixed_offset())
    })
}

/// `14 Oktober 2026`.
pub fn date(value: &str) -> Option<String> {
    date_in(value, DEFAULT_LOCALE)
}

pub fn date_in(value: &str, locale: Locale) -> Option<String> {
    parse_timestamp(value).map(|dt| dt.format_localized("%d %B %Y", locale).to_string())
}

/// `14 Oktober 2026 09.30.00`.
pub fn date_time(value: &str) -> Option<String> {
    parse_timestamp(value).map(|dt| {
        dt.format_localized("%d %B %Y %H.%M.%S", DEFAULT_LOCALE)
            .to_string()
    })
}

/// Date cell for `field`; empty for null, raw text if unparseable.
pub fn date_cell(field: &'static str) -> impl Fn(&Record) -> Cell + Send + Sync + 'static {
    move |record| {
        let raw = record.text(field);
        Cell::Text(date(&raw).unwrap_or(raw))
    }
}

/// Date-time cell for `field`; empty for null, raw text if unparseable.
pub fn date_time_cell(field: &'static str) -> impl Fn(&Record) -> Cell + Send + Sync + 'static {
    move |record| {
        let raw = record.text(field);
        Cell::Text(date_time(&raw).unwrap_or(raw))
    }
}

/// Verification badge for `field`.
///
/// A set timestamp renders `Verified`. Otherwise the badge reads
/// `Not Verified` and carries a verify action for the row.
pub fn verification_cell(field: &'static str) -> impl Fn(&Record) -> Cell + Send + Sync + 'static {
    move |record| {
        let verified = record.get(field).is_some_and(|v| !v.is_null());
        if verified {
            Cell::Badge {
                label: "Verified".to_string(),
                tone: Tone::Success,
                action: None,
            }
        } else {
            Cell::Badge {
                label: "Not Verified".to_string(),
                tone: Tone::Danger,
                action: record.id().map(RowAction::Verify),
            }
        }
    }
}
