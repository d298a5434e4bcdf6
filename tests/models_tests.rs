// Model serialization tests (snapshot shape, error markers, container entries)

mod common;

use pretty_assertions::assert_eq;
use serde_json::json;
use sysmon::models::*;

#[test]
fn test_snapshot_has_exactly_four_top_level_keys() {
    let value = serde_json::to_value(common::sample_snapshot("3:45 pm")).unwrap();
    let mut keys: Vec<&str> = value
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    keys.sort();
    assert_eq!(
        keys,
        vec!["containers", "dns_filter_stats", "generated_at", "host_metrics"]
    );
}

#[test]
fn test_failed_source_serializes_as_error_object() {
    let r: SourceResult<DnsFilterStats> = SourceResult::err("connection refused");
    assert_eq!(
        serde_json::to_value(&r).unwrap(),
        json!({ "error": "connection refused" })
    );
}

#[test]
fn test_source_result_round_trips_both_variants() {
    let snap = common::sample_snapshot("9:05 am");
    let back: Snapshot = serde_json::from_str(&serde_json::to_string(&snap).unwrap()).unwrap();
    assert_eq!(back, snap);

    let failed: SourceResult<DnsFilterStats> =
        serde_json::from_value(json!({ "error": "boom" })).unwrap();
    assert_eq!(failed.error(), Some("boom"));
}

#[test]
fn test_source_result_from_result() {
    let ok: SourceResult<u32> = Ok::<u32, std::io::Error>(3).into();
    assert!(ok.is_ok());
    let err: SourceResult<u32> =
        Err::<u32, _>(std::io::Error::other("disk on fire")).into();
    assert_eq!(err.error(), Some("disk on fire"));
}

#[test]
fn test_container_status_serialization() {
    let c = ContainerStatus::from_status_text("pihole", "Up 3 days (healthy)");
    assert_eq!(
        serde_json::to_value(&c).unwrap(),
        json!({ "name": "pihole", "status": "UP", "running": true })
    );
}

#[test]
fn test_container_error_entry_serialization() {
    let c = ContainerStatus::error("socket not found");
    assert_eq!(
        serde_json::to_value(&c).unwrap(),
        json!({
            "name": "docker error",
            "status": "DOWN",
            "running": false,
            "error": "socket not found"
        })
    );
}

#[test]
fn test_host_metrics_omits_absent_keys() {
    let m = HostMetrics {
        cpu_pct: Some(12.5),
        mem_total: Some(8_000_000_000),
        ..Default::default()
    };
    assert_eq!(
        serde_json::to_value(&m).unwrap(),
        json!({ "cpu_pct": 12.5, "mem_total": 8_000_000_000u64 })
    );
}
