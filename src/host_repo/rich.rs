// Rich host metrics via sysinfo

use super::{HostCollector, format_uptime};
use crate::models::HostMetrics;
use crate::util::round_to;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use sysinfo::{Disks, System};

pub struct SysinfoCollector {
    sys: Mutex<System>,
    cpu_sample: Duration,
}

impl SysinfoCollector {
    pub fn new(cpu_sample: Duration) -> Self {
        Self {
            sys: Mutex::new(System::new()),
            // sysinfo needs at least this long between refreshes for a usable delta
            cpu_sample: cpu_sample.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL),
        }
    }
}

fn percent(used: u64, total: u64) -> f64 {
    if total > 0 {
        round_to(used as f64 / total as f64 * 100.0, 1)
    } else {
        0.0
    }
}

impl HostCollector for SysinfoCollector {
    fn name(&self) -> &'static str {
        "sysinfo"
    }

    fn collect(&self) -> HostMetrics {
        let mut metrics = HostMetrics::default();

        // A poisoned lock only means an earlier collect panicked; System is still usable.
        let mut sys = self.sys.lock().unwrap_or_else(|e| e.into_inner());
        sys.refresh_cpu_all();
        std::thread::sleep(self.cpu_sample);
        sys.refresh_cpu_all();
        metrics.cpu_pct = Some(round_to(
            (sys.global_cpu_usage() as f64).clamp(0.0, 100.0),
            1,
        ));

        sys.refresh_memory();
        let total = sys.total_memory();
        let available = sys.available_memory();
        metrics.mem_pct = Some(percent(total.saturating_sub(available), total));
        metrics.mem_used = Some(sys.used_memory());
        metrics.mem_total = Some(total);
        drop(sys);

        let disks = Disks::new_with_refreshed_list();
        if let Some(root) = disks.list().iter().find(|d| d.mount_point() == Path::new("/")) {
            let total = root.total_space();
            let used = total.saturating_sub(root.available_space());
            metrics.disk_pct = Some(percent(used, total));
            metrics.disk_used = Some(used);
            metrics.disk_total = Some(total);
        }

        let load = System::load_average();
        metrics.load_1 = Some(round_to(load.one, 2));
        metrics.load_5 = Some(round_to(load.five, 2));

        let now = chrono::Utc::now().timestamp().max(0) as u64;
        let uptime = now.saturating_sub(System::boot_time());
        metrics.uptime_str = Some(format_uptime(uptime));

        metrics
    }
}
