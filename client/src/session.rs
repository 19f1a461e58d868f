//! Client-side session manager.
//!
//! Holds the token pair and keeps the session alive by renewing the access
//! token shortly before its embedded expiry. Renewal failure is treated as an
//! ordinary session end: the state is cleared and the session reverts to
//! anonymous. There is at most one pending renewal timer per session;
//! scheduling a new one cancels the previous one.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;

use crate::api::AuthApi;
use crate::token::decode_expiry;

/// Safety margin: renew this many seconds before the access token expires so
/// the exchange completes while the old token is still valid.
const RENEWAL_MARGIN_SECS: i64 = 5;

#[derive(Default)]
struct SessionState {
    access: Option<String>,
    refresh: Option<String>,
    renewal: Option<JoinHandle<()>>,
}

fn clear(state: &Mutex<SessionState>) {
    let mut state = state.lock().unwrap();
    state.access = None;
    state.refresh = None;
}

/// Manages one user session: token storage, authentication status, and the
/// proactive renewal timer.
pub struct SessionManager {
    api: Arc<dyn AuthApi>,
    state: Arc<Mutex<SessionState>>,
}

impl SessionManager {
    pub fn new(api: Arc<dyn AuthApi>) -> Self {
        SessionManager {
            api,
            state: Arc::new(Mutex::new(SessionState::default())),
        }
    }

    /// Store a freshly issued token pair and schedule renewal.
    pub fn login(&self, access_token: String, refresh_token: String) {
        {
            let mut state = self.state.lock().unwrap();
            state.access = Some(access_token);
            state.refresh = Some(refresh_token);
        }
        self.schedule_renewal();
    }

    /// Restore a persisted session, e.g. after process restart. An unexpired
    /// access token resumes directly; an expired one gets a single immediate
    /// renewal attempt, and if that fails the session stays anonymous.
    pub fn resume(&self, access_token: String, refresh_token: String) {
        // The renewal loop handles both cases: an already-expired token
        // produces a zero wait and therefore one immediate attempt.
        self.login(access_token, refresh_token);
    }

    /// Clear the session and revoke the refresh token server-side.
    pub async fn logout(&self) {
        let refresh = {
            let mut state = self.state.lock().unwrap();
            if let Some(handle) = state.renewal.take() {
                handle.abort();
            }
            state.access = None;
            state.refresh.take()
        };

        if let Some(refresh) = refresh {
            // Best effort: local state is already cleared either way.
            if let Err(err) = self.api.logout(&refresh).await {
                tracing::debug!(%err, "server-side logout failed");
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.lock().unwrap().access.is_some()
    }

    pub fn access_token(&self) -> Option<String> {
        self.state.lock().unwrap().access.clone()
    }

    fn schedule_renewal(&self) {
        let mut state = self.state.lock().unwrap();
        if let Some(previous) = state.renewal.take() {
            previous.abort();
        }
        state.renewal = Some(spawn_renewal(self.api.clone(), self.state.clone()));
    }
}

impl Drop for SessionManager {
    fn drop(&mut self) {
        if let Some(handle) = self.state.lock().unwrap().renewal.take() {
            handle.abort();
        }
    }
}

/// The renewal loop: sleep until shortly before expiry, exchange the refresh
/// token for a new access token, repeat. Any failure ends the session.
fn spawn_renewal(api: Arc<dyn AuthApi>, state: Arc<Mutex<SessionState>>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let access = state.lock().unwrap().access.clone();
            let Some(access) = access else { break };

            let wait = match decode_expiry(&access) {
                Ok(expiry) => {
                    let secs = (expiry - Utc::now()).num_seconds() - RENEWAL_MARGIN_SECS;
                    Duration::from_secs(secs.max(0) as u64)
                }
                Err(err) => {
                    tracing::debug!(%err, "stored access token is unreadable");
                    clear(&state);
                    break;
                }
            };

            tokio::time::sleep(wait).await;

            let refresh = state.lock().unwrap().refresh.clone();
            let Some(refresh) = refresh else { break };

            match api.renew(&refresh).await {
                Ok(new_access) => {
                    tracing::debug!("access token renewed");
                    state.lock().unwrap().access = Some(new_access);
                }
                Err(err) => {
                    tracing::debug!(%err, "renewal failed, ending session");
                    clear(&state);
                    break;
                }
            }
        }
    })
}
