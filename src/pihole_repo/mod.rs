// Pi-hole v6 stats via the authenticated REST API

mod session;

pub use session::Session;

use crate::config::PiholeConfig;
use crate::models::{DnsFilterStats, SourceResult};
use crate::util::round_to;
use serde::Deserialize;
use session::{AuthResponse, SID_HEADER};
use std::time::Duration;
use tracing::{debug, instrument, warn};

#[derive(Debug, thiserror::Error)]
pub enum PiholeError {
    #[error("building HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("unexpected response from {url}: {reason}")]
    Parse { url: String, reason: String },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SummaryResponse {
    queries: QuerySummary,
    gravity: GravitySummary,
    clients: ClientSummary,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QuerySummary {
    total: i64,
    blocked: i64,
    percent_blocked: f64,
    forwarded: i64,
    cached: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GravitySummary {
    domains_being_blocked: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ClientSummary {
    active: i64,
}

impl From<SummaryResponse> for DnsFilterStats {
    fn from(s: SummaryResponse) -> Self {
        DnsFilterStats {
            queries_today: s.queries.total,
            ads_blocked_today: s.queries.blocked,
            ads_percentage_today: round_to(s.queries.percent_blocked, 2),
            domains_being_blocked: s.gravity.domains_being_blocked,
            queries_forwarded: s.queries.forwarded,
            queries_cached: s.queries.cached,
            unique_clients: s.clients.active,
        }
    }
}

/// `http://` is assumed unless `host` carries its own scheme.
pub(crate) fn api_base(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        format!("{}/api", host)
    } else {
        format!("http://{}/api", host)
    }
}

pub struct PiholeRepo {
    client: reqwest::Client,
    base: String,
    password: String,
}

impl PiholeRepo {
    pub fn new(config: &PiholeConfig) -> Result<Self, PiholeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(PiholeError::Client)?;
        Ok(Self {
            client,
            base: api_base(&config.host),
            password: config.password.clone(),
        })
    }

    /// Login, fetch the summary, and always log out again once logged in.
    /// Failures land in the `error` slot; this never returns early past logout.
    #[instrument(skip(self), fields(repo = "pihole", operation = "stats"))]
    pub async fn stats(&self) -> SourceResult<DnsFilterStats> {
        let result = self.fetch_stats().await;
        if let Err(e) = &result {
            warn!(source = "pihole", error = %e, "Pi-hole stats unavailable");
        }
        result.into()
    }

    pub async fn fetch_stats(&self) -> Result<DnsFilterStats, PiholeError> {
        let session = self.login().await?;
        let result = self.fetch_summary(&session).await;
        self.logout(session).await;
        result
    }

    pub async fn login(&self) -> Result<Session, PiholeError> {
        let url = format!("{}/auth", self.base);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "password": self.password }))
            .send()
            .await
            .map_err(|source| PiholeError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PiholeError::Status { url, status });
        }

        let body: AuthResponse = parse_json(&url, response).await?;
        body.into_session().ok_or_else(|| PiholeError::Parse {
            url,
            reason: "no session id in login response".into(),
        })
    }

    async fn fetch_summary(&self, session: &Session) -> Result<DnsFilterStats, PiholeError> {
        let url = format!("{}/stats/summary", self.base);
        let response = self
            .client
            .get(&url)
            .header(SID_HEADER, session.sid())
            .send()
            .await
            .map_err(|source| PiholeError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PiholeError::Status { url, status });
        }

        let summary: SummaryResponse = parse_json(&url, response).await?;
        Ok(summary.into())
    }

    /// Best-effort session invalidation. Failures are only logged at debug.
    pub async fn logout(&self, session: Session) {
        let url = format!("{}/auth", self.base);
        match self
            .client
            .delete(&url)
            .header(SID_HEADER, session.sid())
            .send()
            .await
        {
            Ok(r) if r.status().is_success() => debug!("Pi-hole session closed"),
            Ok(r) => debug!(status = %r.status(), "Pi-hole logout rejected"),
            Err(e) => debug!(error = %e, "Pi-hole logout failed"),
        }
    }
}

async fn parse_json<T: serde::de::DeserializeOwned>(
    url: &str,
    response: reqwest::Response,
) -> Result<T, PiholeError> {
    let body = response
        .text()
        .await
        .map_err(|source| PiholeError::Transport {
            url: url.to_string(),
            source,
        })?;
    serde_json::from_str(&body).map_err(|e| PiholeError::Parse {
        url: url.to_string(),
        reason: e.to_string(),
    })
}
