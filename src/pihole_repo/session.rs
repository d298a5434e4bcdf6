// Pi-hole API session (login -> use -> logout)

use serde::Deserialize;

/// Header carrying the session id on authenticated requests.
pub(super) const SID_HEADER: &str = "sid";

/// Session id from `POST /api/auth`. Only `PiholeRepo::logout` consumes it,
/// so a session cannot be used after it has been surrendered.
#[must_use = "a session must be handed back to PiholeRepo::logout"]
#[derive(Debug)]
pub struct Session {
    sid: String,
}

impl Session {
    pub(super) fn sid(&self) -> &str {
        &self.sid
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct AuthResponse {
    session: AuthSession,
}

#[derive(Debug, Deserialize)]
struct AuthSession {
    #[serde(default)]
    sid: Option<String>,
}

impl AuthResponse {
    /// Session from a login body; `None` when the server did not issue a usable sid.
    pub(super) fn into_session(self) -> Option<Session> {
        self.session
            .sid
            .filter(|sid| !sid.is_empty())
            .map(|sid| Session { sid })
    }
}
