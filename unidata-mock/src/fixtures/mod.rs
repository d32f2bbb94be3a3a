//! Deterministic fixture datasets.
//!
//! Values that would be random in a real backend (statuses, priorities,
//! metric values) follow fixed arithmetic patterns instead, so tests can
//! assert exact counts. Timestamps are derived from the `now` the caller
//! passes in, keeping freshness labels stable no matter when a test runs.

mod customers;
mod metrics;
mod tickets;

pub use customers::{ACTIVE_CUSTOMERS, NUM_CUSTOMERS, customers};
pub use metrics::{ANALYTICS_DAYS, METRIC_NAMES, analytics};
pub use tickets::{NUM_TICKETS, tickets};
