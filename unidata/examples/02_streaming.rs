use std::sync::Arc;

use unidata::{QuerySpec, Unidata};
use unidata_mock::AnalyticsSource;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Build the orchestrator with the analytics demo source.
    let unidata = Unidata::builder()
        .with_source(Arc::new(AnalyticsSource))
        .build()?;

    // 2. Stream one metric's full history: one JSON line per record, no
    // envelope, no pagination.
    let spec = QuerySpec::default().metric("page_views");
    let mut rx = unidata.resolve_stream("example", "analytics", &spec).await?;

    while let Some(record) = rx.recv().await {
        println!("{}", serde_json::to_string(&record)?);
    }

    Ok(())
}
