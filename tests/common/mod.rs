// Shared test helpers

#![allow(dead_code)]

use std::path::Path;
use sysmon::config::PiholeConfig;
use sysmon::models::*;

pub fn pihole_config(host: &str) -> PiholeConfig {
    PiholeConfig {
        host: host.to_string(),
        password: "hunter2".into(),
        timeout_secs: 2,
    }
}

/// Writes `<root>/thermal_zoneN/temp` for each `(zone, millidegrees)`.
pub fn write_thermal_zones(root: &Path, zones: &[(usize, &str)]) {
    for (zone, value) in zones {
        let dir = root.join(format!("thermal_zone{}", zone));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("temp"), format!("{}\n", value)).unwrap();
    }
}

/// Fake /proc with loadavg and uptime.
pub fn write_proc(root: &Path, loadavg: Option<&str>, uptime: Option<&str>) {
    std::fs::create_dir_all(root).unwrap();
    if let Some(l) = loadavg {
        std::fs::write(root.join("loadavg"), l).unwrap();
    }
    if let Some(u) = uptime {
        std::fs::write(root.join("uptime"), u).unwrap();
    }
}

pub fn sample_snapshot(generated_at: &str) -> Snapshot {
    Snapshot {
        generated_at: generated_at.to_string(),
        dns_filter_stats: SourceResult::Ok(DnsFilterStats {
            queries_today: 1200,
            ads_blocked_today: 150,
            ads_percentage_today: 12.5,
            domains_being_blocked: 98765,
            queries_forwarded: 700,
            queries_cached: 350,
            unique_clients: 7,
        }),
        host_metrics: HostMetrics {
            load_1: Some(0.52),
            load_5: Some(0.58),
            uptime_str: Some("1d 1h".into()),
            temp_c: Some(45.0),
            ..Default::default()
        },
        containers: vec![
            ContainerStatus::from_status_text("grafana", "Exited (1) 2 hours ago"),
            ContainerStatus::from_status_text("pihole", "Up 3 days"),
        ],
    }
}
