//! In-memory DataEndpoint implementation

use std::cmp::Ordering;
use std::sync::RwLock;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering as AtomicOrdering;
use std::time::Duration;

use async_trait::async_trait;
use chrono::SecondsFormat;
use chrono::Utc;
use serde_json::Value;

use super::DataEndpoint;
use super::Direction;
use super::ListQuery;
use super::PageEnvelope;
use crate::error::ApiError;
use crate::model::Record;
use crate::model::RecordId;
use crate::model::value_text;

/// An in-process list endpoint over a vector of records.
///
/// Implements the same contract as the panel's HTTP endpoints:
///
/// - search is a case-insensitive substring match on the configured search
///   fields, OR-combined
/// - without a sort key, records come newest `created_at` first, ties broken
///   by `id` descending
/// - the requested page is clamped to the last page
/// - without `perPage`, the whole matching set is returned
///
/// Useful for tests, demos and embedding a table over local data.
///
/// # Example
///
/// ```
/// use rbac_lib::api::MemoryEndpoint;
/// use rbac_lib::model::Record;
///
/// let endpoint = MemoryEndpoint::new(vec![
///     Record::new().set("id", 1).set("name", "Administrators"),
///     Record::new().set("id", 2).set("name", "Users"),
/// ])
/// .search_fields(["name"]);
///
/// assert_eq!(endpoint.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MemoryEndpoint {
    records: RwLock<Vec<Record>>,
    search_fields: Vec<String>,
    verify_field: Option<String>,
    latency: Option<Duration>,
    list_calls: AtomicUsize,
    fail_lists: AtomicUsize,
}

impl MemoryEndpoint {
    /// Creates an endpoint over the given records.
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: RwLock::new(records),
            ..Default::default()
        }
    }

    /// Sets the fields matched by the global search.
    pub fn search_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Enables `verify`, which stamps the current time into `field`.
    pub fn verify_field(mut self, field: impl Into<String>) -> Self {
        self.verify_field = Some(field.into());
        self
    }

    /// Delays every list response, to simulate a slow server.
    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Makes the next `n` list requests fail with HTTP 500.
    pub fn fail_next_lists(&self, n: usize) {
        self.fail_lists.store(n, AtomicOrdering::SeqCst);
    }

    /// Number of list requests received so far.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(AtomicOrdering::SeqCst)
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    /// Returns `true` if no records are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a stored record by id.
    pub fn get(&self, id: &RecordId) -> Option<Record> {
        let records = self.records.read().ok()?;
        records.iter().find(|r| r.id().as_ref() == Some(id)).cloned()
    }

    fn matches(&self, record: &Record, needle: &str) -> bool {
        self.search_fields
            .iter()
            .any(|field| record.text(field).to_lowercase().contains(needle))
    }

    fn query_records(&self, query: &ListQuery) -> Result<Vec<Record>, ApiError> {
        let records = self
            .records
            .read()
            .map_err(|_| ApiError::http(500, "record store poisoned"))?;

        let needle = query.global_search.trim().to_lowercase();
        let mut matched: Vec<Record> = records
            .iter()
            .filter(|r| needle.is_empty() || self.matches(r, &needle))
            .cloned()
            .collect();

        matched.sort_by(|a, b| {
            let primary = match &query.order {
                Some(order) => {
                    let ord = compare_values(a.get(&order.column), b.get(&order.column));
                    match order.direction {
                        Direction::Asc => ord,
                        Direction::Desc => ord.reverse(),
                    }
                }
                None => Ordering::Equal,
            };
            primary.then_with(|| default_order(a, b))
        });

        Ok(matched)
    }
}

#[async_trait]
impl DataEndpoint for MemoryEndpoint {
    async fn list(&self, query: &ListQuery) -> Result<PageEnvelope, ApiError> {
        self.list_calls.fetch_add(1, AtomicOrdering::SeqCst);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let failing = self
            .fail_lists
            .fetch_update(AtomicOrdering::SeqCst, AtomicOrdering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(ApiError::http(500, "Server Error"));
        }

        let matched = self.query_records(query)?;

        let Some(per_page) = query.per_page else {
            return Ok(PageEnvelope::unpaginated(matched));
        };

        let per_page = per_page.max(1);
        let total = matched.len() as u64;
        let last_page = total.div_ceil(u64::from(per_page)).max(1);
        let page = u64::from(query.page).clamp(1, last_page);
        let offset = (page - 1) * u64::from(per_page);

        let records: Vec<Record> = matched
            .into_iter()
            .skip(offset as usize)
            .take(per_page as usize)
            .collect();
        let (from, to) = if records.is_empty() {
            (0, 0)
        } else {
            (offset + 1, offset + records.len() as u64)
        };

        Ok(PageEnvelope::new(records, page as u32, per_page, total, from, to))
    }

    async fn delete(&self, id: &RecordId) -> Result<(), ApiError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| ApiError::http(500, "record store poisoned"))?;
        let before = records.len();
        records.retain(|r| r.id().as_ref() != Some(id));
        if records.len() == before {
            return Err(ApiError::http(404, format!("record {} not found", id)));
        }
        Ok(())
    }

    async fn verify(&self, id: &RecordId) -> Result<(), ApiError> {
        let Some(field) = &self.verify_field else {
            return Err(ApiError::Unsupported("verify"));
        };
        let mut records = self
            .records
            .write()
            .map_err(|_| ApiError::http(500, "record store poisoned"))?;
        let record = records
            .iter_mut()
            .find(|r| r.id().as_ref() == Some(id))
            .ok_or_else(|| ApiError::http(404, format!("record {} not found", id)))?;
        record.insert(
            field.clone(),
            Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        );
        Ok(())
    }
}

/// Newest `created_at` first, then `id` descending.
fn default_order(a: &Record, b: &Record) -> Ordering {
    compare_values(b.get("created_at"), a.get("created_at"))
        .then_with(|| compare_values(b.get("id"), a.get("id")))
}

/// Orders JSON values: missing/null first, numbers numerically, strings
/// case-insensitively, anything else by its text.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.to_lowercase().cmp(&y.to_lowercase()),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(x), Some(y)) => value_text(x).cmp(&value_text(y)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SortKey;

    fn users() -> MemoryEndpoint {
        let records = (1..=12)
            .map(|i| {
                Record::new()
                    .set("id", i)
                    .set("name", format!("User {:02}", i))
                    .set("email", format!("user{}@{}.test", i, if i % 2 == 0 { "even" } else { "odd" }))
                    .set("created_at", format!("2024-01-{:02}T00:00:00.000000Z", i))
            })
            .collect();
        MemoryEndpoint::new(records).search_fields(["name", "email"])
    }

    fn ids(page: &PageEnvelope) -> Vec<i64> {
        page.records()
            .iter()
            .map(|r| r.get_i64("id").unwrap().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_default_order_is_newest_first() {
        let endpoint = users();
        let page = endpoint
            .list(&ListQuery { per_page: Some(3), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(ids(&page), [12, 11, 10]);
        assert_eq!((page.from(), page.to(), page.total()), (1, 3, 12));
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_and_or_combined() {
        let endpoint = users();
        let query = ListQuery {
            global_search: "EVEN".into(),
            per_page: Some(50),
            ..Default::default()
        };
        let page = endpoint.list(&query).await.unwrap();
        assert_eq!(page.total(), 6);

        let query = ListQuery {
            global_search: "user 03".into(),
            ..query
        };
        assert_eq!(ids(&endpoint.list(&query).await.unwrap()), [3]);
    }

    #[tokio::test]
    async fn test_explicit_sort_and_page_clamp() {
        let endpoint = users();
        let query = ListQuery {
            page: 99,
            per_page: Some(5),
            global_search: String::new(),
            order: Some(SortKey::asc("id")),
        };
        let page = endpoint.list(&query).await.unwrap();
        assert_eq!(page.current_page(), 3);
        assert_eq!(ids(&page), [11, 12]);
        assert_eq!((page.from(), page.to()), (11, 12));
    }

    #[tokio::test]
    async fn test_unpaginated_mode() {
        let endpoint = users();
        let page = endpoint
            .list(&ListQuery { per_page: None, ..Default::default() })
            .await
            .unwrap();
        assert_eq!(page.len(), 12);
        assert_eq!(page.total(), 12);
    }

    #[tokio::test]
    async fn test_delete_and_verify() {
        let endpoint = users().verify_field("email_verified_at");
        endpoint.delete(&RecordId::Int(4)).await.unwrap();
        assert_eq!(endpoint.len(), 11);
        assert!(endpoint.delete(&RecordId::Int(4)).await.is_err());

        endpoint.verify(&RecordId::Int(5)).await.unwrap();
        let record = endpoint.get(&RecordId::Int(5)).unwrap();
        assert!(record.get_datetime("email_verified_at").unwrap().is_some());
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let endpoint = users();
        endpoint.fail_next_lists(1);
        assert!(endpoint.list(&ListQuery::default()).await.is_err());
        assert!(endpoint.list(&ListQuery::default()).await.is_ok());
        assert_eq!(endpoint.list_calls(), 2);
    }
}
