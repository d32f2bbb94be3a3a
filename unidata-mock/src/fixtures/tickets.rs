use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use super::customers::ACTIVE_CUSTOMERS;

/// Total ticket records in the fixture.
pub const NUM_TICKETS: u64 = 50;

/// Support ticket records. Ticket `i` was opened `i` hours before `now`;
/// priority cycles low/medium/high and odd-numbered tickets are open.
#[must_use]
pub fn tickets(now: DateTime<Utc>) -> Vec<serde_json::Value> {
    const PRIORITIES: [&str; 3] = ["low", "medium", "high"];
    (1..=NUM_TICKETS)
        .map(|i| {
            json!({
                "ticket_id": i,
                "customer_id": (i % ACTIVE_CUSTOMERS) + 1,
                "subject": format!("Issue {i}"),
                "priority": PRIORITIES[(i % 3) as usize],
                "created_at": (now - Duration::hours(i as i64)).to_rfc3339(),
                "status": if i % 2 == 1 { "open" } else { "closed" },
            })
        })
        .collect()
}
