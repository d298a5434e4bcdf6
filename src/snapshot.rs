// Snapshot assembly: one call per adapter, merged into a single document.

use crate::config::AppConfig;
use crate::docker_repo::DockerRepo;
use crate::host_repo::HostRepo;
use crate::models::{ContainerStatus, DnsFilterStats, Snapshot, SourceResult};
use crate::pihole_repo::PiholeRepo;
use chrono::{DateTime, FixedOffset, Offset, Utc};
use std::sync::Arc;
use tracing::{instrument, warn};

/// `now` shifted by a fixed hour offset, as e.g. "3:45 pm".
pub fn format_generated_at(now: DateTime<Utc>, utc_offset_hours: i32) -> String {
    let offset = FixedOffset::east_opt(utc_offset_hours * 3_600).unwrap_or_else(|| Utc.fix());
    now.with_timezone(&offset)
        .format("%-I:%M %p")
        .to_string()
        .to_lowercase()
}

/// Holds the three adapters. An adapter that could not be constructed keeps
/// its error and fills its slot with it on every run.
pub struct SnapshotAssembler {
    pihole: Result<PiholeRepo, String>,
    host: Arc<HostRepo>,
    docker: Result<DockerRepo, String>,
    utc_offset_hours: i32,
}

impl SnapshotAssembler {
    pub fn new(
        pihole: Result<PiholeRepo, String>,
        host: HostRepo,
        docker: Result<DockerRepo, String>,
        utc_offset_hours: i32,
    ) -> Self {
        Self {
            pihole,
            host: Arc::new(host),
            docker,
            utc_offset_hours,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let pihole = PiholeRepo::new(&config.pihole).map_err(|e| {
            warn!(source = "pihole", error = %e, "Pi-hole client unavailable");
            e.to_string()
        });
        let docker = DockerRepo::connect(&config.docker).map_err(|e| {
            warn!(source = "docker", error = %e, "Docker client unavailable");
            e.to_string()
        });
        Self::new(
            pihole,
            HostRepo::from_config(&config.host),
            docker,
            config.display.utc_offset_hours,
        )
    }

    async fn dns_filter_stats(&self) -> SourceResult<DnsFilterStats> {
        match &self.pihole {
            Ok(repo) => repo.stats().await,
            Err(e) => SourceResult::err(e.clone()),
        }
    }

    async fn containers(&self) -> Vec<ContainerStatus> {
        match &self.docker {
            Ok(repo) => repo.statuses().await,
            Err(e) => vec![ContainerStatus::error(e.clone())],
        }
    }

    /// Runs all adapters concurrently; none of them can fail the snapshot.
    #[instrument(skip(self))]
    pub async fn assemble(&self) -> Snapshot {
        let (dns_filter_stats, host_metrics, containers) = tokio::join!(
            self.dns_filter_stats(),
            self.host.clone().metrics(),
            self.containers(),
        );
        Snapshot {
            generated_at: format_generated_at(Utc::now(), self.utc_offset_hours),
            dns_filter_stats,
            host_metrics,
            containers,
        }
    }
}
