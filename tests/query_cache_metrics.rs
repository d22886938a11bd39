use blogdesk::cache::{CacheConfig, QueryCache, QueryKey};
use blogdesk::domain::resource::ResourceKind;
use blogdesk::infra::telemetry::{CACHE_HIT_TOTAL, CACHE_INVALIDATE_TOTAL, CACHE_MISS_TOTAL};
use metrics_util::debugging::{DebugValue, DebuggingRecorder, Snapshotter};

fn counter(snapshotter: &Snapshotter, name: &str, labels: &[(&str, &str)]) -> u64 {
    snapshotter
        .snapshot()
        .into_vec()
        .into_iter()
        .filter(|(key, _, _, _)| {
            let key = key.key();
            key.name() == name
                && labels.iter().all(|(label, value)| {
                    key.labels()
                        .any(|found| found.key() == *label && found.value() == *value)
                })
        })
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(count) => count,
            _ => 0,
        })
        .sum()
}

#[test]
fn hits_and_misses_are_counted_per_family() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        let cache = QueryCache::new(&CacheConfig::default());
        let key = QueryKey::list(ResourceKind::Tags, 0, 25, "");

        assert_eq!(cache.get::<Vec<u8>>(&key), None);
        cache.put(key.clone(), vec![1_u8, 2]);
        assert_eq!(cache.get::<Vec<u8>>(&key), Some(vec![1, 2]));
        assert_eq!(cache.get::<Vec<u8>>(&key), Some(vec![1, 2]));

        let detail = QueryKey::detail(ResourceKind::Blogs, 7);
        assert_eq!(cache.get::<String>(&detail), None);
    });

    let tags = [("family", "list"), ("resource", "tags")];
    assert_eq!(counter(&snapshotter, CACHE_MISS_TOTAL, &tags), 1);
    assert_eq!(counter(&snapshotter, CACHE_HIT_TOTAL, &tags), 2);
    assert_eq!(
        counter(
            &snapshotter,
            CACHE_MISS_TOTAL,
            &[("family", "detail"), ("resource", "blogs")]
        ),
        1
    );
}

#[test]
fn invalidations_are_counted_per_resource() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        let cache = QueryCache::new(&CacheConfig::default());
        let list = QueryKey::list(ResourceKind::Comments, 0, 25, "");
        let dropdown = QueryKey::dropdown(ResourceKind::Comments, "");
        let detail = QueryKey::detail(ResourceKind::Comments, 3);
        cache.put(list.clone(), 1_u32);
        cache.put(dropdown.clone(), 2_u32);
        cache.put(detail.clone(), 3_u32);

        assert_eq!(cache.invalidate(ResourceKind::Comments), 1);
        assert_eq!(cache.invalidate(ResourceKind::Comments), 2);

        assert_eq!(cache.get::<u32>(&list), None);
        assert_eq!(cache.get::<u32>(&dropdown), None);
        assert_eq!(cache.get::<u32>(&detail), Some(3));
    });

    assert_eq!(
        counter(
            &snapshotter,
            CACHE_INVALIDATE_TOTAL,
            &[("resource", "comments")]
        ),
        2
    );
}
