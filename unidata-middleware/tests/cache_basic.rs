use std::time::Duration;

use unidata_middleware::{CacheKey, QueryCache};
use unidata_types::{
    CacheConfig, DataKind, Freshness, Metadata, QuerySpec, ResponseEnvelope,
};

fn envelope(total: usize) -> ResponseEnvelope {
    ResponseEnvelope {
        data: Vec::new(),
        metadata: Metadata {
            total_results: total,
            returned_results: 0,
            data_freshness: "Data as of 2026-08-29T11:30:00Z".into(),
            staleness_indicator: Freshness::Fresh,
            data_type: DataKind::Tabular,
            voice_context: format!("Showing 0 of {total} tabular records. Unsorted."),
            page: 1,
            page_size: 10,
            total_pages: 1,
            has_next: false,
        },
    }
}

fn cfg() -> CacheConfig {
    CacheConfig {
        ttl: Duration::from_secs(60),
        max_entries: 16,
        shared_timeout: Duration::from_millis(250),
    }
}

#[tokio::test]
async fn put_then_get_hits() {
    let cache = QueryCache::new(&cfg());
    let key = CacheKey::new("crm", QuerySpec::default().fingerprint());

    cache.put(key.clone(), envelope(47)).await;
    let hit = cache.get(&key).await.unwrap();
    assert_eq!(hit.metadata.total_results, 47);
}

#[tokio::test]
async fn distinct_fingerprints_do_not_collide() {
    let cache = QueryCache::new(&cfg());
    let a = CacheKey::new("crm", QuerySpec::default().fingerprint());
    let b = CacheKey::new("crm", QuerySpec::default().page(2).fingerprint());

    cache.put(a.clone(), envelope(1)).await;
    assert!(cache.get(&a).await.is_some());
    assert!(cache.get(&b).await.is_none());
}

#[tokio::test]
async fn same_fingerprint_different_source_is_a_different_entry() {
    let cache = QueryCache::new(&cfg());
    let fp = QuerySpec::default().fingerprint();
    let crm = CacheKey::new("crm", fp.clone());
    let support = CacheKey::new("support", fp);

    cache.put(crm.clone(), envelope(1)).await;
    assert!(cache.get(&crm).await.is_some());
    assert!(cache.get(&support).await.is_none());
}

#[tokio::test]
async fn overwrite_replaces_the_entry() {
    let cache = QueryCache::new(&cfg());
    let key = CacheKey::new("crm", QuerySpec::default().fingerprint());

    cache.put(key.clone(), envelope(1)).await;
    cache.put(key.clone(), envelope(2)).await;
    assert_eq!(cache.get(&key).await.unwrap().metadata.total_results, 2);
}

#[tokio::test]
async fn lru_evicts_the_coldest_entry() {
    let cache = QueryCache::new(&CacheConfig {
        max_entries: 2,
        ..cfg()
    });
    let a = CacheKey::new("crm", QuerySpec::default().page(1).fingerprint());
    let b = CacheKey::new("crm", QuerySpec::default().page(2).fingerprint());
    let c = CacheKey::new("crm", QuerySpec::default().page(3).fingerprint());

    cache.put(a.clone(), envelope(1)).await;
    cache.put(b.clone(), envelope(2)).await;
    // Touch `a` so `b` is the eviction candidate.
    assert!(cache.get(&a).await.is_some());
    cache.put(c.clone(), envelope(3)).await;

    assert!(cache.get(&a).await.is_some());
    assert!(cache.get(&b).await.is_none());
    assert!(cache.get(&c).await.is_some());
}

#[test]
fn shared_key_is_namespaced_by_source() {
    let fp = QuerySpec::default().fingerprint();
    let key = CacheKey::new("crm", fp.clone());
    assert_eq!(key.shared_key(), format!("udc:data:crm:{fp}"));
}
