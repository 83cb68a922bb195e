use crate::*;
use cr_router::{route, ResolvedConfig, RouteDecision, Tier};
use std::sync::Arc;

fn decision(message: &str, latency_ms: f64) -> RouteDecision {
    let mut d = route(message, &ResolvedConfig::default());
    d.latency_ms = latency_ms;
    d
}

// ========== Stats ==========

#[test]
fn test_stats_start_empty() {
    let s = StatsTracker::new().snapshot();
    assert_eq!(s.total_routed, 0);
    assert_eq!(s.override_count, 0);
    assert_eq!(s.avg_latency_ms, 0.0);
    assert_eq!(s.tier_counts.len(), 5);
    assert!(Tier::ALL.iter().all(|t| s.count(*t) == 0));
}

#[test]
fn test_stats_record_counts() {
    let tracker = StatsTracker::new();
    tracker.record(&decision("hi", 1.0));
    tracker.record(&decision("What is the capital of Japan?", 1.0));
    tracker.record(&decision("ok", 1.0));

    let s = tracker.snapshot();
    assert_eq!(s.total_routed, 3);
    assert_eq!(s.override_count, 2);
    assert_eq!(s.count(Tier::Trivial), 2);
    assert_eq!(s.count(Tier::Simple), 1);
}

#[test]
fn test_stats_running_average() {
    let tracker = StatsTracker::new();
    for latency in [1.0, 2.0, 3.0, 6.0] {
        tracker.record(&decision("hi", latency));
    }
    assert!((tracker.snapshot().avg_latency_ms - 3.0).abs() < 1e-12);
}

#[test]
fn test_stats_reset() {
    let tracker = StatsTracker::new();
    tracker.record(&decision("hi", 0.5));
    tracker.reset();
    assert_eq!(tracker.snapshot(), RouterStats::default());
}

#[test]
fn test_stats_concurrent_record() {
    let tracker = Arc::new(StatsTracker::new());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let tracker = Arc::clone(&tracker);
            std::thread::spawn(move || {
                for _ in 0..250 {
                    tracker.record(&decision("ok", 2.0));
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    let s = tracker.snapshot();
    assert_eq!(s.total_routed, 1000);
    assert_eq!(s.override_count, 1000);
    assert!((s.avg_latency_ms - 2.0).abs() < 1e-9);
}

#[test]
fn test_stats_serialize() {
    let tracker = StatsTracker::new();
    tracker.record(&decision("hi", 1.5));
    let v = serde_json::to_value(tracker.snapshot()).unwrap();
    assert_eq!(v["totalRouted"], 1);
    assert_eq!(v["tierCounts"]["TRIVIAL"], 1);
    assert_eq!(v["tierCounts"]["EXPERT"], 0);
    assert_eq!(v["avgLatencyMs"], 1.5);
    assert_eq!(v["overrideCount"], 1);
}

// ========== Session Overrides ==========

#[test]
fn test_override_set_get() {
    let store = SessionOverrideStore::new();
    let set = store.set("s1", "big-model", Tier::Expert).unwrap();
    let got = store.get("s1").unwrap();
    assert_eq!(got, set);
    assert_eq!(got.model, "big-model");
    assert_eq!(got.tier, Tier::Expert);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_override_replace() {
    let store = SessionOverrideStore::new();
    let first = store.set("s1", "a", Tier::Simple).unwrap();
    let second = store.set("s1", "b", Tier::Complex).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("s1").unwrap().model, "b");
    assert!(second.updated_at >= first.updated_at);
}

#[test]
fn test_override_clear() {
    let store = SessionOverrideStore::new();
    store.set("s1", "a", Tier::Simple).unwrap();
    assert!(store.clear("s1").is_some());
    assert!(store.clear("s1").is_none());
    assert!(store.get("s1").is_none());
    assert!(store.is_empty());
}

#[test]
fn test_override_rejects_empty_id() {
    let store = SessionOverrideStore::new();
    assert!(matches!(store.set("", "a", Tier::Simple), Err(SessionError::InvalidSessionId(_))));
    assert!(matches!(store.set("  ", "a", Tier::Simple), Err(SessionError::InvalidSessionId(_))));
    assert!(store.is_empty());
}

#[test]
fn test_override_save_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("overrides.json");

    let store = SessionOverrideStore::new();
    store.set("alpha", "fast", Tier::Trivial).unwrap();
    store.set("beta", "deep", Tier::Expert).unwrap();
    store.save_to(&path).unwrap();

    let loaded = SessionOverrideStore::load_from(&path).unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded.get("alpha"), store.get("alpha"));
    assert_eq!(loaded.get("beta").unwrap().tier, Tier::Expert);

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"updatedAt\""));
    assert!(raw.contains("\"EXPERT\""));
}

#[test]
fn test_override_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = SessionOverrideStore::load_from(dir.path().join("nope.json")).err().unwrap();
    assert!(matches!(err, SessionError::Io(_)));
}

#[test]
fn test_override_load_rejects_bad_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "{\"s\": {\"model\": 1}}").unwrap();
    assert!(matches!(SessionOverrideStore::load_from(&path), Err(SessionError::Serialization(_))));

    std::fs::write(&path, "{\"\": {\"model\": \"m\", \"tier\": \"SIMPLE\", \"updatedAt\": \"2026-01-01T00:00:00Z\"}}").unwrap();
    assert!(matches!(SessionOverrideStore::load_from(&path), Err(SessionError::InvalidSessionId(_))));
}
