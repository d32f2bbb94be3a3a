//! unidata-mock
//!
//! Deterministic source connectors for tests and examples: three
//! fixture-backed sources matching the canonical demo datasets (CRM
//! customers, support tickets, daily analytics), plus caller-configured
//! [`StaticSource`] and [`FailingSource`] doubles for exercising
//! orchestrator control flow.
#![warn(missing_docs)]

/// Caller-configured connector doubles.
pub mod dynamic;
/// Deterministic fixture datasets.
pub mod fixtures;

pub use dynamic::{FailingSource, FailureMode, StaticSource};

use async_trait::async_trait;
use chrono::Duration;
use unidata_core::{Collection, SourceConnector, UnidataError};

/// CRM source serving the customer fixture. The snapshot was last written
/// 30 minutes ago, so it always reads as fresh.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrmSource;

#[async_trait]
impl SourceConnector for CrmSource {
    fn name(&self) -> &'static str {
        "crm"
    }

    fn vendor(&self) -> &'static str {
        "unidata-mock"
    }

    async fn fetch(&self) -> Result<Collection, UnidataError> {
        let now = chrono::Utc::now();
        Ok(Collection::new(fixtures::customers(now)).with_last_write(now - Duration::minutes(30)))
    }
}

/// Support source serving the ticket fixture, last written 30 minutes ago.
#[derive(Debug, Default, Clone, Copy)]
pub struct SupportSource;

#[async_trait]
impl SourceConnector for SupportSource {
    fn name(&self) -> &'static str {
        "support"
    }

    fn vendor(&self) -> &'static str {
        "unidata-mock"
    }

    async fn fetch(&self) -> Result<Collection, UnidataError> {
        let now = chrono::Utc::now();
        Ok(Collection::new(fixtures::tickets(now)).with_last_write(now - Duration::minutes(30)))
    }
}

/// Analytics source serving the daily metrics fixture. Its snapshot was last
/// written two hours ago, so it always reads as stale.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyticsSource;

#[async_trait]
impl SourceConnector for AnalyticsSource {
    fn name(&self) -> &'static str {
        "analytics"
    }

    fn vendor(&self) -> &'static str {
        "unidata-mock"
    }

    async fn fetch(&self) -> Result<Collection, UnidataError> {
        let now = chrono::Utc::now();
        Ok(Collection::new(fixtures::analytics(now)).with_last_write(now - Duration::hours(2)))
    }
}
