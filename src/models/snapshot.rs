// Published snapshot and per-source result

use serde::{Deserialize, Serialize};

use super::{ContainerStatus, DnsFilterStats, HostMetrics};

/// Error marker for a failed source: serializes as `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceError {
    pub error: String,
}

/// Result of one adapter. Serializes as the payload itself on success and as
/// a `SourceError` object on failure, so the key is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceResult<T> {
    Err(SourceError),
    Ok(T),
}

impl<T> SourceResult<T> {
    pub fn err(message: impl Into<String>) -> Self {
        SourceResult::Err(SourceError {
            error: message.into(),
        })
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, SourceResult::Ok(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SourceResult::Ok(_) => None,
            SourceResult::Err(e) => Some(&e.error),
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for SourceResult<T> {
    fn from(r: Result<T, E>) -> Self {
        match r {
            Ok(v) => SourceResult::Ok(v),
            Err(e) => SourceResult::err(e.to_string()),
        }
    }
}

/// One complete telemetry document, fully regenerated each run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Local wall-clock time, e.g. "3:45 pm".
    pub generated_at: String,
    pub dns_filter_stats: SourceResult<DnsFilterStats>,
    pub host_metrics: HostMetrics,
    pub containers: Vec<ContainerStatus>,
}
