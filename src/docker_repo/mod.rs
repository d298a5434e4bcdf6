// Docker container status via bollard

use crate::config::DockerConfig;
use crate::models::ContainerStatus;
use bollard::Docker;
use bollard::query_parameters::ListContainersOptions;
use bollard::models::ContainerSummary;
use std::time::Duration;
use tracing::{instrument, warn};

#[derive(Debug, thiserror::Error)]
pub enum DockerError {
    #[error("connecting to Docker: {0}")]
    Connect(#[source] bollard::errors::Error),
    #[error("listing containers: {0}")]
    List(#[source] bollard::errors::Error),
    #[error("listing containers timed out after {0:?}")]
    Timeout(Duration),
}

pub struct DockerRepo {
    docker: Docker,
    timeout: Duration,
}

impl DockerRepo {
    pub fn connect(config: &DockerConfig) -> Result<Self, DockerError> {
        let docker = match &config.socket {
            Some(path) => {
                Docker::connect_with_unix(path, config.timeout_secs, bollard::API_DEFAULT_VERSION)
            }
            None => Docker::connect_with_unix_defaults(),
        }
        .map_err(DockerError::Connect)?;
        Ok(Self {
            docker,
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    /// All containers (running or not), stopped first, then by name.
    /// On any failure returns a single synthetic error entry instead.
    #[instrument(skip(self), fields(repo = "docker", operation = "statuses"))]
    pub async fn statuses(&self) -> Vec<ContainerStatus> {
        match self.list().await {
            Ok(c) => c,
            Err(e) => {
                warn!(source = "docker", error = %e, "Docker container list unavailable");
                vec![ContainerStatus::error(e.to_string())]
            }
        }
    }

    pub async fn list(&self) -> Result<Vec<ContainerStatus>, DockerError> {
        let options = ListContainersOptions {
            all: true,
            ..Default::default()
        };
        let containers = tokio::time::timeout(
            self.timeout,
            self.docker.list_containers(Some(options)),
        )
        .await
        .map_err(|_| DockerError::Timeout(self.timeout))?
        .map_err(DockerError::List)?;

        Ok(classify(containers.iter().map(name_and_status)))
    }
}

/// Name without Docker's leading '/', falling back to the id; status text or "unknown".
fn name_and_status(c: &ContainerSummary) -> (String, String) {
    let name = c
        .names
        .as_ref()
        .and_then(|n| n.first())
        .map(|n| n.trim_start_matches('/').to_string())
        .filter(|n| !n.is_empty())
        .or_else(|| c.id.clone())
        .unwrap_or_default();
    let status = c.status.clone().unwrap_or_else(|| "unknown".into());
    (name, status)
}

/// Builds statuses from `(name, status text)` pairs, stopped containers first.
pub fn classify<I>(pairs: I) -> Vec<ContainerStatus>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut out: Vec<ContainerStatus> = pairs
        .into_iter()
        .map(|(name, status)| ContainerStatus::from_status_text(name.trim(), &status))
        .collect();
    out.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContainerState;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(n, s)| (n.to_string(), s.to_string()))
            .collect()
    }

    #[test]
    fn classify_puts_stopped_first_then_name() {
        let out = classify(pairs(&[
            ("b", "Up 2 days"),
            ("a", "Exited (1)"),
            ("c", "Up 5 hours"),
        ]));
        let got: Vec<(&str, ContainerState)> =
            out.iter().map(|c| (c.name.as_str(), c.status)).collect();
        assert_eq!(
            got,
            vec![
                ("a", ContainerState::Down),
                ("b", ContainerState::Up),
                ("c", ContainerState::Up),
            ]
        );
        assert!(!out[0].running);
        assert!(out[1].running && out[2].running);
    }

    #[test]
    fn classify_groups_all_stopped_before_running() {
        let out = classify(pairs(&[
            ("alpha", "Up 1 minute"),
            ("zulu", "Exited (0) 2 hours ago"),
            ("mike", "Created"),
        ]));
        let names: Vec<&str> = out.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["mike", "zulu", "alpha"]);
    }

    #[test]
    fn up_prefix_is_case_insensitive() {
        let out = classify(pairs(&[("x", "UP 3 seconds"), ("y", "up (healthy)")]));
        assert!(out.iter().all(|c| c.running));
    }

    #[test]
    fn status_not_starting_with_up_is_down() {
        let out = classify(pairs(&[("x", "Restarting (1) 5 seconds ago"), ("y", "")]));
        assert!(out.iter().all(|c| !c.running && c.status == ContainerState::Down));
    }

    #[test]
    fn name_and_status_strips_slash_and_defaults() {
        let c = ContainerSummary {
            id: Some("abc123".into()),
            names: Some(vec!["/pihole".into()]),
            status: Some("Up 4 days".into()),
            ..Default::default()
        };
        assert_eq!(name_and_status(&c), ("pihole".into(), "Up 4 days".into()));

        let c = ContainerSummary {
            id: Some("abc123".into()),
            ..Default::default()
        };
        assert_eq!(name_and_status(&c), ("abc123".into(), "unknown".into()));
    }
}
