// Fallback host metrics from /proc pseudo-files (no sysinfo needed)

use super::{HostCollector, format_uptime_days_hours};
use crate::models::HostMetrics;
use std::path::PathBuf;
use tracing::debug;

/// Reads load averages and uptime from `<proc_root>/loadavg` and
/// `<proc_root>/uptime`. Each field is independent: a missing or malformed
/// file leaves only that key out.
pub struct ProcfsCollector {
    proc_root: PathBuf,
}

impl ProcfsCollector {
    pub fn new(proc_root: impl Into<PathBuf>) -> Self {
        Self {
            proc_root: proc_root.into(),
        }
    }

    fn read(&self, name: &str) -> Option<String> {
        let path = self.proc_root.join(name);
        match std::fs::read_to_string(&path) {
            Ok(s) => Some(s),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "procfs read failed");
                None
            }
        }
    }
}

impl HostCollector for ProcfsCollector {
    fn name(&self) -> &'static str {
        "procfs"
    }

    fn collect(&self) -> HostMetrics {
        let mut metrics = HostMetrics::default();
        if let Some((one, five)) = self.read("loadavg").as_deref().and_then(parse_loadavg) {
            metrics.load_1 = Some(one);
            metrics.load_5 = Some(five);
        }
        if let Some(secs) = self.read("uptime").as_deref().and_then(parse_uptime) {
            metrics.uptime_str = Some(format_uptime_days_hours(secs));
        }
        metrics
    }
}

/// First two fields of /proc/loadavg ("0.52 0.58 0.59 1/389 12345").
pub(crate) fn parse_loadavg(content: &str) -> Option<(f64, f64)> {
    let mut parts = content.split_whitespace();
    let one = parts.next()?.parse().ok()?;
    let five = parts.next()?.parse().ok()?;
    Some((one, five))
}

/// Whole seconds from the first field of /proc/uptime ("90000.42 350000.10").
pub(crate) fn parse_uptime(content: &str) -> Option<u64> {
    let secs: f64 = content.split_whitespace().next()?.parse().ok()?;
    (secs.is_finite() && secs >= 0.0).then_some(secs as u64)
}
