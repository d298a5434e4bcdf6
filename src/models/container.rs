// Docker container models

use serde::{Deserialize, Serialize};

/// Display status of a container; serializes to uppercase JSON ("UP" / "DOWN").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContainerState {
    Up,
    Down,
}

impl ContainerState {
    /// Classify from Docker status text (e.g. "Up 2 days", "Exited (1) 3 hours ago").
    pub fn from_status_text(s: &str) -> Self {
        let s = s.trim();
        let is_up = s
            .get(..2)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("up"));
        if is_up {
            ContainerState::Up
        } else {
            ContainerState::Down
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerStatus {
    pub name: String,
    pub status: ContainerState,
    pub running: bool,
    /// Only set on the synthetic entry emitted when the runtime could not be queried.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ContainerStatus {
    pub const ERROR_NAME: &'static str = "docker error";

    pub fn from_status_text(name: impl Into<String>, status_text: &str) -> Self {
        let status = ContainerState::from_status_text(status_text);
        Self {
            name: name.into(),
            status,
            running: status == ContainerState::Up,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            name: Self::ERROR_NAME.to_string(),
            status: ContainerState::Down,
            running: false,
            error: Some(message.into()),
        }
    }

    /// Stopped containers first, then by name.
    pub fn sort_key(&self) -> (bool, &str) {
        (self.running, self.name.as_str())
    }
}
