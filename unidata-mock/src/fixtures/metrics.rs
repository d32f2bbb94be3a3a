use chrono::{DateTime, Duration, Utc};
use serde_json::json;

/// Days of history per metric.
pub const ANALYTICS_DAYS: u64 = 30;
/// Metric names present in the analytics fixture.
pub const METRIC_NAMES: [&str; 5] = [
    "daily_active_users",
    "page_views",
    "api_calls",
    "error_rate",
    "avg_response_time_ms",
];

/// Daily analytics points: one record per metric per day, newest day first,
/// `METRIC_NAMES.len() * ANALYTICS_DAYS` records in total.
#[must_use]
pub fn analytics(now: DateTime<Utc>) -> Vec<serde_json::Value> {
    let today = now.date_naive();
    let mut records = Vec::with_capacity(METRIC_NAMES.len() * ANALYTICS_DAYS as usize);
    for (m, metric) in METRIC_NAMES.iter().enumerate() {
        for d in 0..ANALYTICS_DAYS {
            let date = today - Duration::days(d as i64);
            records.push(json!({
                "metric": metric,
                "date": date.format("%Y-%m-%d").to_string(),
                "value": value_for(m as u64, d),
            }));
        }
    }
    records
}

// Bounded, metric-dependent values in place of the randomness a real backend
// would show.
fn value_for(metric_index: u64, day: u64) -> serde_json::Value {
    match metric_index {
        // error_rate: 0.1..5.0, two decimals
        3 => json!(0.1 + ((day * 17 + metric_index) % 490) as f64 / 100.0),
        // avg_response_time_ms: 50..500
        4 => json!(50 + (day * 31 + metric_index) % 450),
        // counters: 100..1000
        _ => json!(100 + (day * 97 + metric_index * 13) % 900),
    }
}
