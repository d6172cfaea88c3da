use std::fs;
use std::sync::{Arc, Mutex};

use apartment_catalog::apartment::{ApartmentSortKey, ApartmentsFilters};
use apartment_catalog::source::{
    ApiConfig, CompositeObserver, JsonSource, LoadContext, LoadObserver, LoadSeverity, LoadStats,
    StaticSource,
};
use apartment_catalog::store::{ApartmentsStore, StoreOptions};
use apartment_catalog::types::{Pagination, RangeBound, Sorting};
use apartment_catalog::SourceError;

#[derive(Default)]
struct RecordingObserver {
    contexts: Mutex<Vec<LoadContext>>,
    successes: Mutex<Vec<LoadStats>>,
    failures: Mutex<Vec<LoadSeverity>>,
    alerts: Mutex<Vec<LoadSeverity>>,
}

impl LoadObserver for RecordingObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        self.contexts.lock().unwrap().push(ctx.clone());
        self.successes.lock().unwrap().push(stats);
    }

    fn on_failure(&self, _ctx: &LoadContext, severity: LoadSeverity, _error: &SourceError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &LoadContext, severity: LoadSeverity, _error: &SourceError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn store_with(observer: Arc<dyn LoadObserver>, alert_at_or_above: LoadSeverity) -> ApartmentsStore {
    ApartmentsStore::new(StoreOptions {
        observer: Some(observer),
        alert_at_or_above,
        ..Default::default()
    })
}

#[test]
fn loads_fixture_with_filters_sorting_and_page() {
    let source = JsonSource::new("tests/fixtures/apartments.json");
    let mut store = ApartmentsStore::default();

    let filters = ApartmentsFilters {
        area: RangeBound::new(Some(30.0), Some(90.0)),
        rooms_counts: vec![1, 2],
        ..Default::default()
    };
    let loaded = store
        .load_apartments(
            &source,
            &Pagination::new(1, 2),
            &Sorting::asc(ApartmentSortKey::Area),
            &filters,
        )
        .unwrap();

    assert!(loaded);
    // Compact (36), Corner (51), Garden (51), Loft (64).
    assert_eq!(store.total(), 4);
    let names: Vec<&str> = store.apartments().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Corner two-room", "Garden two-room"]);
}

#[test]
fn json_source_resolves_endpoint_under_root() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("apartments.json"),
        r#"[{"name":"Only","area":30,"rooms":1,"price":1}]"#,
    )
    .unwrap();

    let source = JsonSource::under(dir.path(), &ApiConfig::default());
    assert_eq!(source.path(), dir.path().join("apartments.json"));

    let mut store = ApartmentsStore::default();
    assert!(store.load_with_defaults(&source).unwrap());
    assert_eq!(store.total(), 1);
}

#[test]
fn null_body_is_reported_as_no_response() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("apartments.json");
    fs::write(&path, "null").unwrap();

    let obs = Arc::new(RecordingObserver::default());
    let mut store = store_with(obs.clone(), LoadSeverity::Critical);

    assert!(!store.load_with_defaults(&JsonSource::new(&path)).unwrap());
    let successes = obs.successes.lock().unwrap().clone();
    assert_eq!(successes.len(), 1);
    assert!(!successes[0].responded);
    assert!(store.apartments().is_empty());
}

#[test]
fn missing_file_is_critical_and_alerts() {
    let obs = Arc::new(RecordingObserver::default());
    let mut store = store_with(obs.clone(), LoadSeverity::Critical);

    let err = store
        .load_with_defaults(&JsonSource::new("tests/fixtures/does_not_exist.json"))
        .unwrap_err();
    assert!(matches!(err, SourceError::Io(_)));

    assert_eq!(*obs.failures.lock().unwrap(), vec![LoadSeverity::Critical]);
    assert_eq!(*obs.alerts.lock().unwrap(), vec![LoadSeverity::Critical]);
}

#[test]
fn malformed_payload_fails_without_alert_and_keeps_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("apartments.json");
    fs::write(&path, r#"[{"name":"NoPrice","area":30,"rooms":1}]"#).unwrap();

    let obs = Arc::new(RecordingObserver::default());
    let mut store = store_with(obs.clone(), LoadSeverity::Critical);
    store
        .load_with_defaults(&JsonSource::new("tests/fixtures/apartments.json"))
        .unwrap();
    let before_total = store.total();

    let err = store.load_with_defaults(&JsonSource::new(&path)).unwrap_err();
    assert!(matches!(err, SourceError::Json(_)));
    assert_eq!(*obs.failures.lock().unwrap(), vec![LoadSeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
    assert_eq!(store.total(), before_total);
}

#[test]
fn composite_observer_fans_out() {
    let a = Arc::new(RecordingObserver::default());
    let b = Arc::new(RecordingObserver::default());
    let observers: Vec<Arc<dyn LoadObserver>> = vec![a.clone(), b.clone()];
    let composite = CompositeObserver::new(observers);
    let mut store = store_with(Arc::new(composite), LoadSeverity::Error);

    store.load_with_defaults(&StaticSource::new(Vec::new())).unwrap();
    let _ = store.load_with_defaults(&JsonSource::new("tests/fixtures/missing.json"));

    for obs in [&a, &b] {
        assert_eq!(obs.successes.lock().unwrap().len(), 1);
        assert_eq!(*obs.alerts.lock().unwrap(), vec![LoadSeverity::Critical]);
    }
}

#[test]
fn observers_see_the_requested_page_and_ordering() {
    let a = Arc::new(RecordingObserver::default());
    let b = Arc::new(RecordingObserver::default());
    let observers: Vec<Arc<dyn LoadObserver>> = vec![a.clone(), b.clone()];
    let mut store = store_with(Arc::new(CompositeObserver::new(observers)), LoadSeverity::Critical);

    let filters = ApartmentsFilters {
        rooms_counts: vec![1, 2],
        ..Default::default()
    };
    let sorting = Sorting::desc(ApartmentSortKey::Price);
    let page = Pagination::new(2, 2);
    store
        .load_apartments(&JsonSource::new("tests/fixtures/apartments.json"), &page, &sorting, &filters)
        .unwrap();

    for obs in [&a, &b] {
        let contexts = obs.contexts.lock().unwrap();
        assert_eq!(contexts.len(), 1);
        let ctx = &contexts[0];
        assert_eq!(ctx.source, "tests/fixtures/apartments.json");
        assert_eq!(ctx.pagination, page);
        assert_eq!(ctx.sorting, sorting);
        assert_eq!(ctx.sort_label(), "price");
        assert!(ctx.filtered);

        let stats = obs.successes.lock().unwrap()[0];
        assert_eq!(stats.fetched, 7);
        // Studio, Corner, Loft, Garden and Compact have one or two rooms.
        assert_eq!(stats.total, 5);
        assert_eq!(stats.returned, 2);
        assert!(ctx.has_more_pages(&stats));
    }
}
