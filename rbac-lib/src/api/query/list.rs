//! List request parameters.

use url::Url;

use super::SortKey;

/// Parameters of one list request.
///
/// Serialized as `page`, `perPage`, `globalSearch`, `orderBy` and
/// `orderDirection` query parameters. Without a sort key the ordering
/// parameters are omitted and the server's default order applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Requested page (1-based).
    pub page: u32,
    /// Page size; `None` requests the unpaginated result set.
    pub per_page: Option<u32>,
    /// Free-text search, empty for none.
    pub global_search: String,
    /// Requested ordering.
    pub order: Option<SortKey>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: Some(10),
            global_search: String::new(),
            order: None,
        }
    }
}

impl ListQuery {
    /// Returns the query parameters in wire order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string())];
        if let Some(per_page) = self.per_page {
            pairs.push(("perPage", per_page.to_string()));
        }
        pairs.push(("globalSearch", self.global_search.clone()));
        if let Some(order) = &self.order {
            pairs.push(("orderBy", order.column.clone()));
            pairs.push(("orderDirection", order.direction.as_str().to_string()));
        }
        pairs
    }

    /// Appends the parameters to a URL.
    pub fn apply_to(&self, url: &mut Url) {
        let mut query = url.query_pairs_mut();
        for (key, value) in self.query_pairs() {
            query.append_pair(key, &value);
        }
    }
}
