// Path: crates/status/src/session.rs

//! Session and authentication state machines.
//!
//! Three independent machines share one event stream:
//!
//! | event                 | `client_token` | `valid_token` | `require_client_token` |
//! |-----------------------|----------------|---------------|------------------------|
//! | `TokenSet{token}`     | `token`        | `false`       | unchanged              |
//! | `SessionStarted`      | unchanged      | `true`        | unchanged              |
//! | `SessionEnded`        | `""`           | `false`       | unchanged              |
//! | `RequestFailed{401}`  | `""`           | `false`       | `true`                 |
//!
//! `require_client_token` is sticky; only an external flow that supplies a
//! new token and rebuilds the session clears it.

use nodestat_types::app::{CoreEvent, SessionState};

pub fn client_token(prev: &str, event: &CoreEvent) -> String {
    match event {
        CoreEvent::TokenSet { token } => token.clone(),
        CoreEvent::SessionEnded => String::new(),
        e if e.is_unauthorized() => String::new(),
        _ => prev.to_string(),
    }
}

pub fn valid_token(prev: bool, event: &CoreEvent) -> bool {
    match event {
        // A freshly set token is unverified until the next login.
        CoreEvent::TokenSet { .. } => false,
        CoreEvent::SessionStarted => true,
        CoreEvent::SessionEnded => false,
        e if e.is_unauthorized() => false,
        _ => prev,
    }
}

pub fn require_client_token(prev: bool, event: &CoreEvent) -> bool {
    event.is_unauthorized() || prev
}

/// Folds events into [`SessionState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionReducer;

impl SessionReducer {
    pub fn reduce(&self, prev: &SessionState, event: &CoreEvent) -> SessionState {
        if let CoreEvent::RequestFailed {
            http_status,
            code,
            message,
        } = event
        {
            if event.is_unauthorized() {
                tracing::warn!(
                    target: "session",
                    event = "token_rejected",
                    http_status,
                    code = code.as_deref().unwrap_or_default(),
                    message = message.as_deref().unwrap_or_default(),
                    "Node rejected the client token"
                );
            } else {
                tracing::debug!(
                    target: "session",
                    event = "request_failed",
                    http_status,
                    code = code.as_deref().unwrap_or_default(),
                );
            }
        }

        SessionState {
            client_token: client_token(&prev.client_token, event),
            valid_token: valid_token(prev.valid_token, event),
            require_client_token: require_client_token(prev.require_client_token, event),
        }
    }
}
