use std::sync::Arc;

use unidata::{QuerySpec, Unidata};
use unidata_mock::{AnalyticsSource, CrmSource, SupportSource};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // 1. Build the orchestrator and register the demo sources.
    let unidata = Unidata::builder()
        .with_source(Arc::new(CrmSource))
        .with_source(Arc::new(SupportSource))
        .with_source(Arc::new(AnalyticsSource))
        .build()?;

    // 2. First page of active customers, five at a time.
    let spec = QuerySpec::default().status("active").page(1).page_size(5);
    let envelope = unidata.resolve("example", "crm", &spec).await?;

    println!("{}", envelope.metadata.voice_context);
    println!("freshness: {}", envelope.metadata.data_freshness);
    for record in &envelope.data {
        println!("{}", serde_json::to_string(record)?);
    }

    // 3. The same query again is served from the cache.
    let again = unidata.resolve("example", "crm", &spec).await?;
    println!(
        "second call returned {} records (cached)",
        again.metadata.returned_results
    );

    Ok(())
}
