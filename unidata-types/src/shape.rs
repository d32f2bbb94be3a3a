use core::fmt;

use serde::{Deserialize, Serialize};

/// Structural kind of a record collection.
///
/// Classified once per collection by the shape identifier and reported in
/// response metadata so voice clients can pick an appropriate rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum DataKind {
    /// Flat rows with scalar fields (customers, tickets).
    Tabular,
    /// Every record carries a timestamp field at a regular-ish cadence.
    TimeSeries,
    /// At least one record contains nested mapping or array values.
    Hierarchical,
}

impl DataKind {
    /// Stable identifier matching the wire `data_type` field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tabular => "tabular",
            Self::TimeSeries => "time_series",
            Self::Hierarchical => "hierarchical",
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative staleness of a source snapshot, derived from its last-write
/// time relative to now.
///
/// Thresholds are fixed: under one hour is fresh, one to twenty-four hours is
/// stale, anything older (or an unknown last-write) is very stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Freshness {
    /// Snapshot written less than an hour ago.
    Fresh,
    /// Snapshot written between one hour and one day ago.
    Stale,
    /// Snapshot older than a day, or with no known last-write time.
    VeryStale,
}

impl Freshness {
    /// Stable identifier matching the wire `staleness_indicator` field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fresh => "fresh",
            Self::Stale => "stale",
            Self::VeryStale => "very_stale",
        }
    }
}

impl fmt::Display for Freshness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
