use chrono::{DateTime, Duration, Utc};
use serde_json::json;

/// Total customer records in the fixture.
pub const NUM_CUSTOMERS: u64 = 60;
/// How many of them carry `status: "active"` (ids 1 through 47).
pub const ACTIVE_CUSTOMERS: u64 = 47;

/// CRM customer records. Customer `i` was created `i` days before `now`.
#[must_use]
pub fn customers(now: DateTime<Utc>) -> Vec<serde_json::Value> {
    (1..=NUM_CUSTOMERS)
        .map(|i| {
            json!({
                "customer_id": i,
                "name": format!("Customer {i}"),
                "email": format!("user{i}@example.com"),
                "created_at": (now - Duration::days(i as i64)).to_rfc3339(),
                "status": if i <= ACTIVE_CUSTOMERS { "active" } else { "inactive" },
            })
        })
        .collect()
}
