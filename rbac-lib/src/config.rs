//! Table configuration

use std::time::Duration;

/// What happens to fetch triggers that arrive while a fetch is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefetchPolicy {
    /// The trigger is dropped; the user must trigger again.
    #[default]
    Drop,
    /// The trigger marks the view stale and exactly one follow-up fetch runs
    /// with the latest state once the in-flight fetch resolves.
    Coalesce,
}

/// Configuration for a [`DataTable`](crate::table::DataTable).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use rbac_lib::config::{RefetchPolicy, TableConfig};
///
/// let config = TableConfig::default()
///     .with_per_page(25)
///     .with_fetch_timeout(Duration::from_secs(10))
///     .with_refetch(RefetchPolicy::Coalesce);
///
/// assert_eq!(config.per_page, 25);
/// ```
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Initial page size.
    ///
    /// Default: 10
    pub per_page: u32,

    /// Page sizes offered by the page-size selector.
    ///
    /// Default: 10, 25, 50, 100, 250, 500
    pub page_sizes: Vec<u32>,

    /// Upper bound for one list request.
    ///
    /// Default: 30 seconds
    pub fetch_timeout: Duration,

    /// Handling of triggers during an in-flight fetch.
    ///
    /// Default: [`RefetchPolicy::Drop`]
    pub refetch: RefetchPolicy,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            per_page: 10,
            page_sizes: vec![10, 25, 50, 100, 250, 500],
            fetch_timeout: Duration::from_secs(30),
            refetch: RefetchPolicy::Drop,
        }
    }
}

impl TableConfig {
    /// Creates a new table config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial page size (at least 1).
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    /// Sets the page sizes offered by the selector.
    ///
    /// Zero entries are discarded and the list is sorted and deduplicated.
    pub fn with_page_sizes(mut self, sizes: impl IntoIterator<Item = u32>) -> Self {
        let mut sizes: Vec<u32> = sizes.into_iter().filter(|&n| n > 0).collect();
        sizes.sort_unstable();
        sizes.dedup();
        self.page_sizes = sizes;
        self
    }

    /// Sets the fetch timeout.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Sets the refetch policy.
    pub fn with_refetch(mut self, policy: RefetchPolicy) -> Self {
        self.refetch = policy;
        self
    }

    /// Returns `true` if `n` is one of the offered page sizes.
    pub fn offers_page_size(&self, n: u32) -> bool {
        self.page_sizes.contains(&n)
    }
}
