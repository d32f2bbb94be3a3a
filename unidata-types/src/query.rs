use core::fmt;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Normalized filter, sort, and pagination parameters for one request.
///
/// All filters are optional and conjunctive. Unknown request parameters never
/// reach this struct: serde drops unrecognized fields during deserialization,
/// which is what keeps filtering permissive at the query layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySpec {
    /// Exact-match lookup by ticket identifier; short-circuits to at most one record.
    pub ticket_id: Option<u64>,
    /// Exact-match lookup by customer identifier; short-circuits to at most one record.
    pub customer_id: Option<u64>,
    /// Exact match on the `status` field.
    pub status: Option<String>,
    /// Exact match on the `priority` field.
    pub priority: Option<String>,
    /// Exact match on the `metric` field.
    pub metric: Option<String>,
    /// Inclusive lower bound on the record's date field (ISO-8601 date or datetime).
    pub start_date: Option<String>,
    /// Inclusive upper bound on the record's date field. A date-only value
    /// covers the entire day.
    pub end_date: Option<String>,
    /// Case-insensitive substring match across all string-valued fields.
    pub search: Option<String>,
    /// One-based page number.
    pub page: u32,
    /// Records per page; validated against the configured maximum.
    pub page_size: u32,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            ticket_id: None,
            customer_id: None,
            status: None,
            priority: None,
            metric: None,
            start_date: None,
            end_date: None,
            search: None,
            page: 1,
            page_size: 10,
        }
    }
}

impl QuerySpec {
    /// Set the `status` filter.
    #[must_use]
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Set the `priority` filter.
    #[must_use]
    pub fn priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Set the `metric` filter.
    #[must_use]
    pub fn metric(mut self, metric: impl Into<String>) -> Self {
        self.metric = Some(metric.into());
        self
    }

    /// Set the inclusive date range bounds.
    #[must_use]
    pub fn date_range(
        mut self,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        self.start_date = Some(start.into());
        self.end_date = Some(end.into());
        self
    }

    /// Set the free-text search filter.
    #[must_use]
    pub fn search(mut self, needle: impl Into<String>) -> Self {
        self.search = Some(needle.into());
        self
    }

    /// Set the page number.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Set the page size.
    #[must_use]
    pub const fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Compute the stable fingerprint of this spec.
    ///
    /// Present parameters are canonicalized into a key-sorted map before
    /// hashing, so two specs with the same filters always produce the same
    /// digest no matter how their parameters were supplied.
    #[must_use]
    pub fn fingerprint(&self) -> Fingerprint {
        let mut canonical: BTreeMap<&'static str, serde_json::Value> = BTreeMap::new();
        if let Some(v) = self.ticket_id {
            canonical.insert("ticket_id", v.into());
        }
        if let Some(v) = self.customer_id {
            canonical.insert("customer_id", v.into());
        }
        if let Some(v) = &self.status {
            canonical.insert("status", v.as_str().into());
        }
        if let Some(v) = &self.priority {
            canonical.insert("priority", v.as_str().into());
        }
        if let Some(v) = &self.metric {
            canonical.insert("metric", v.as_str().into());
        }
        if let Some(v) = &self.start_date {
            canonical.insert("start_date", v.as_str().into());
        }
        if let Some(v) = &self.end_date {
            canonical.insert("end_date", v.as_str().into());
        }
        if let Some(v) = &self.search {
            canonical.insert("search", v.as_str().into());
        }
        canonical.insert("page", self.page.into());
        canonical.insert("page_size", self.page_size.into());

        // BTreeMap serializes in key order, so the blob is canonical.
        let blob = serde_json::to_string(&canonical).unwrap_or_default();
        Fingerprint(blake3::hash(blob.as_bytes()).to_hex().to_string())
    }
}

/// Stable hash of a normalized [`QuerySpec`], used as the cache key component
/// for memoized pipeline output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// The hex digest as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
