// Host metrics: sysinfo when available, /proc fallback otherwise

mod procfs;
#[cfg(feature = "rich-metrics")]
mod rich;

pub use procfs::ProcfsCollector;
#[cfg(feature = "rich-metrics")]
pub use rich::SysinfoCollector;

use crate::config::{HostBackend, HostConfig};
use crate::models::HostMetrics;
use crate::util::round_to;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Thermal zones probed: thermal_zone0 ..= thermal_zone9.
pub const THERMAL_ZONES: usize = 10;

/// Readings outside (10, 120) °C are treated as unpopulated zones.
const TEMP_MIN_C: f64 = 10.0;
const TEMP_MAX_C: f64 = 120.0;

/// One way of collecting host metrics. `collect` blocks (CPU sampling, file
/// reads) and must be called off the async runtime.
pub trait HostCollector: Send + Sync {
    fn name(&self) -> &'static str;
    fn collect(&self) -> HostMetrics;
}

/// `"{d}d {h}h"` from one day up, `"{h}h {m}m"` below.
pub fn format_uptime(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let mins = (secs % 3_600) / 60;
    if days > 0 {
        format!("{}d {}h", days, hours)
    } else {
        format!("{}h {}m", hours, mins)
    }
}

/// Always `"{d}d {h}h"`; used by the /proc fallback.
pub fn format_uptime_days_hours(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    format!("{}d {}h", days, hours)
}

/// First plausible reading from `<thermal_root>/thermal_zoneN/temp`
/// (millidegrees), in °C rounded to 1 decimal. Stops at the first hit;
/// zones that are missing or unparsable are skipped.
pub fn probe_temperature(thermal_root: &Path) -> Option<f64> {
    (0..THERMAL_ZONES).find_map(|zone| {
        let path = thermal_root
            .join(format!("thermal_zone{}", zone))
            .join("temp");
        let raw = std::fs::read_to_string(&path).ok()?;
        let millis: i64 = raw.trim().parse().ok()?;
        let celsius = millis as f64 / 1000.0;
        (celsius > TEMP_MIN_C && celsius < TEMP_MAX_C).then(|| round_to(celsius, 1))
    })
}

#[cfg(feature = "rich-metrics")]
fn rich_collector(config: &HostConfig) -> Option<Box<dyn HostCollector>> {
    sysinfo::IS_SUPPORTED_SYSTEM.then(|| {
        Box::new(SysinfoCollector::new(std::time::Duration::from_millis(
            config.cpu_sample_ms,
        )))
            as Box<dyn HostCollector>
    })
}

#[cfg(not(feature = "rich-metrics"))]
fn rich_collector(_config: &HostConfig) -> Option<Box<dyn HostCollector>> {
    None
}

/// Picks the collector once at startup.
pub fn select_collector(config: &HostConfig) -> Box<dyn HostCollector> {
    let rich = match config.backend {
        HostBackend::Procfs => None,
        HostBackend::Auto | HostBackend::Sysinfo => rich_collector(config),
    };
    if config.backend == HostBackend::Sysinfo && rich.is_none() {
        warn!("sysinfo backend requested but not supported here; using /proc");
    }
    rich.unwrap_or_else(|| Box::new(ProcfsCollector::new(config.proc_root.clone())))
}

pub struct HostRepo {
    collector: Box<dyn HostCollector>,
    thermal_root: PathBuf,
}

impl HostRepo {
    pub fn new(collector: Box<dyn HostCollector>, thermal_root: impl Into<PathBuf>) -> Self {
        Self {
            collector,
            thermal_root: thermal_root.into(),
        }
    }

    pub fn from_config(config: &HostConfig) -> Self {
        let repo = Self::new(select_collector(config), config.thermal_root.clone());
        info!(collector = repo.collector_name(), "Host metrics collector selected");
        repo
    }

    pub fn collector_name(&self) -> &'static str {
        self.collector.name()
    }

    /// Blocking collection: collector metrics plus the thermal probe.
    pub fn collect(&self) -> HostMetrics {
        let mut metrics = self.collector.collect();
        metrics.temp_c = probe_temperature(&self.thermal_root);
        metrics
    }

    #[instrument(skip(self), fields(repo = "host", operation = "metrics"))]
    pub async fn metrics(self: Arc<Self>) -> HostMetrics {
        match tokio::task::spawn_blocking(move || self.collect()).await {
            Ok(m) => m,
            Err(e) => {
                warn!(source = "host", error = %e, "host metrics task failed");
                HostMetrics::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_uptime_uses_days_from_one_day() {
        assert_eq!(format_uptime(90_000), "1d 1h");
        assert_eq!(format_uptime(86_400), "1d 0h");
    }

    #[test]
    fn format_uptime_uses_hours_minutes_below_one_day() {
        assert_eq!(format_uptime(3_000), "0h 50m");
        assert_eq!(format_uptime(7_260), "2h 1m");
    }

    #[test]
    fn format_uptime_days_hours_has_no_short_form() {
        assert_eq!(format_uptime_days_hours(90_000), "1d 1h");
        assert_eq!(format_uptime_days_hours(3_000), "0d 0h");
    }

    #[test]
    fn procfs_backend_is_honoured() {
        let config = HostConfig {
            backend: HostBackend::Procfs,
            ..Default::default()
        };
        assert_eq!(select_collector(&config).name(), "procfs");
    }
}
