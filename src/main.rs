use anyhow::{Context, Result};
use sysmon::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

// Runs once per invocation; scheduling is left to cron or a systemd timer.
#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("{} v{}", version::NAME, version::VERSION);

    let app_config = config::AppConfig::load()?;
    let assembler = snapshot::SnapshotAssembler::from_config(&app_config);
    let snap = assembler.assemble().await;

    let path = app_config.output.path.clone();
    let generated_at = snap.generated_at.clone();
    tokio::task::spawn_blocking(move || publisher::publish(&snap, &path))
        .await
        .context("publisher task")?
        .with_context(|| format!("publishing snapshot to {}", app_config.output.path.display()))?;

    tracing::info!(
        path = %app_config.output.path.display(),
        generated_at = %generated_at,
        "Snapshot published"
    );
    Ok(())
}
