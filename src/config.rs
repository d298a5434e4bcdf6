use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub pihole: PiholeConfig,
    pub docker: DockerConfig,
    pub host: HostConfig,
    pub output: OutputConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PiholeConfig {
    /// Host or host:port; an explicit http(s):// scheme is kept as-is.
    pub host: String,
    pub password: String,
    pub timeout_secs: u64,
}

impl Default for PiholeConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            password: String::new(),
            timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DockerConfig {
    /// Unix socket path; `None` uses the platform default.
    pub socket: Option<String>,
    pub timeout_secs: u64,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            socket: None,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostBackend {
    /// sysinfo when compiled in and supported, else /proc.
    #[default]
    Auto,
    Sysinfo,
    Procfs,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub backend: HostBackend,
    pub proc_root: PathBuf,
    pub thermal_root: PathBuf,
    /// CPU usage sampling window for the sysinfo path.
    pub cpu_sample_ms: u64,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            backend: HostBackend::Auto,
            proc_root: PathBuf::from("/proc"),
            thermal_root: PathBuf::from("/sys/class/thermal"),
            cpu_sample_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("/home/ubuntu/homeassistant/config/www/sysmon.json"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Fixed offset from UTC for `generated_at`; no DST handling.
    pub utc_offset_hours: i32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: -6,
        }
    }
}

const ENV_PIHOLE_HOST: &str = "PIHOLE_HOST";
const ENV_PIHOLE_PASSWORD: &str = "PIHOLE_PASSWORD";
const ENV_OUTPUT: &str = "SYSMON_OUTPUT";
const ENV_UTC_OFFSET: &str = "UTC_OFFSET_HOURS";

/// Loads `.env` from `exe_dir` if one is there, otherwise searches upward
/// from the working directory. Returns the file that was applied. Variables
/// already set in the environment are never overwritten.
pub fn load_env_file(exe_dir: Option<&Path>) -> Option<PathBuf> {
    exe_dir
        .map(|dir| dir.join(".env"))
        .filter(|path| dotenv::from_path(path).is_ok())
        .or_else(|| dotenv::dotenv().ok())
}

impl AppConfig {
    /// Loads `.env` (next to the binary first, then the working directory), then the TOML file named by `CONFIG_FILE` (if set), then
    /// applies environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let exe = std::env::current_exe().ok();
        load_env_file(exe.as_deref().and_then(Path::parent));
        let mut config = match std::env::var("CONFIG_FILE") {
            Ok(path) => {
                let s = std::fs::read_to_string(&path)
                    .map_err(|e| anyhow::anyhow!("reading config {}: {}", path, e))?;
                toml::from_str(&s)?
            }
            Err(_) => AppConfig::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `PIHOLE_HOST`, `PIHOLE_PASSWORD`, `SYSMON_OUTPUT` and
    /// `UTC_OFFSET_HOURS` from `lookup` on top of the current values.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_PIHOLE_HOST) {
            self.pihole.host = host;
        }
        if let Some(password) = lookup(ENV_PIHOLE_PASSWORD) {
            self.pihole.password = password;
        }
        if let Some(path) = lookup(ENV_OUTPUT) {
            self.output.path = PathBuf::from(path);
        }
        if let Some(offset) = lookup(ENV_UTC_OFFSET) {
            self.display.utc_offset_hours = offset.trim().parse().map_err(|e| {
                anyhow::anyhow!("{} must be an integer, got {:?}: {}", ENV_UTC_OFFSET, offset, e)
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.pihole.host.trim().is_empty(),
            "pihole.host must be non-empty"
        );
        anyhow::ensure!(
            self.pihole.timeout_secs > 0,
            "pihole.timeout_secs must be > 0, got {}",
            self.pihole.timeout_secs
        );
        anyhow::ensure!(
            self.docker.timeout_secs > 0,
            "docker.timeout_secs must be > 0, got {}",
            self.docker.timeout_secs
        );
        anyhow::ensure!(
            self.host.cpu_sample_ms > 0,
            "host.cpu_sample_ms must be > 0, got {}",
            self.host.cpu_sample_ms
        );
        anyhow::ensure!(
            !self.output.path.as_os_str().is_empty(),
            "output.path must be non-empty"
        );
        anyhow::ensure!(
            (-12..=14).contains(&self.display.utc_offset_hours),
            "display.utc_offset_hours must be between -12 and 14, got {}",
            self.display.utc_offset_hours
        );
        #[cfg(not(feature = "rich-metrics"))]
        anyhow::ensure!(
            self.host.backend != HostBackend::Sysinfo,
            "host.backend = \"sysinfo\" requires the rich-metrics feature"
        );
        Ok(())
    }
}
