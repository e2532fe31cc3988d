//! Page envelope returned by list endpoints.

use serde::Deserialize;
use serde::Deserializer;

use crate::model::Record;

/// A page of list results with pagination metadata.
///
/// List endpoints answer with a length-aware paginator envelope:
///
/// ```json
/// { "data": [...], "current_page": 1, "per_page": 10, "total": 47, "from": 1, "to": 10 }
/// ```
///
/// or, in unpaginated mode (no `perPage` sent), with a bare array of records.
/// Both deserialize into a `PageEnvelope`; a bare array becomes a single page
/// holding every record.
///
/// `from` and `to` are 1-based positions of the first and last record on the
/// page within the whole result set, `0` when the page is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct PageEnvelope {
    records: Vec<Record>,
    current_page: u32,
    per_page: u32,
    total: u64,
    from: u64,
    to: u64,
}

impl PageEnvelope {
    /// Creates an envelope, normalising `from`/`to` so that `from <= to <= total`.
    pub fn new(records: Vec<Record>, current_page: u32, per_page: u32, total: u64, from: u64, to: u64) -> Self {
        let to = to.min(total);
        let from = from.min(to);
        Self {
            records,
            current_page: current_page.max(1),
            per_page: per_page.max(1),
            total,
            from,
            to,
        }
    }

    /// Wraps a complete, unpaginated result set.
    pub fn unpaginated(records: Vec<Record>) -> Self {
        let total = records.len() as u64;
        let per_page = u32::try_from(records.len()).unwrap_or(u32::MAX);
        Self::new(records, 1, per_page, total, total.min(1), total)
    }

    /// Returns the records in this page.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Consumes the envelope and returns the records.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Server-reported current page (1-based).
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Server-reported page size.
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Total number of matching records.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Position of the first record on this page (0 when empty).
    pub fn from(&self) -> u64 {
        self.from
    }

    /// Position of the last record on this page (0 when empty).
    pub fn to(&self) -> u64 {
        self.to
    }

    /// Returns `true` if this page has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of records in this page.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPage {
    Paginated(RawEnvelope),
    Bare(Vec<Record>),
}

#[derive(Deserialize)]
struct RawEnvelope {
    data: Vec<Record>,
    #[serde(deserialize_with = "lenient_u64")]
    current_page: u64,
    #[serde(deserialize_with = "lenient_u64")]
    per_page: u64,
    #[serde(deserialize_with = "lenient_u64")]
    total: u64,
    #[serde(default, deserialize_with = "lenient_opt_u64")]
    from: Option<u64>,
    #[serde(default, deserialize_with = "lenient_opt_u64")]
    to: Option<u64>,
}

impl<'de> Deserialize<'de> for PageEnvelope {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawPage::deserialize(deserializer)? {
            RawPage::Bare(records) => PageEnvelope::unpaginated(records),
            RawPage::Paginated(raw) => PageEnvelope::new(
                raw.data,
                u32::try_from(raw.current_page).unwrap_or(u32::MAX),
                u32::try_from(raw.per_page).unwrap_or(u32::MAX),
                raw.total,
                raw.from.unwrap_or(0),
                raw.to.unwrap_or(0),
            ),
        })
    }
}

/// Numbers may arrive as JSON numbers or numeric strings (`"10"`).
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    String(String),
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn lenient_opt_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::String(s)) => s.trim().parse().map(Some).map_err(serde::de::Error::custom),
    }
}
