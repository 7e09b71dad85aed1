//! Relay readiness: `Uninitialized -> Ready | Failed`, driven by `CommandRelay::start`.

use crate::domain::command::Identity;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Why startup could not produce an identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum SetupError {
    #[error("no wallet bridge is available")]
    BridgeMissing,
    #[error("wallet bridge failed to list accounts")]
    AccountsUnavailable,
    #[error("wallet bridge returned no accounts")]
    NoAccounts,
}

impl SetupError {
    /// The user-facing alert raised for this failure.
    pub fn alert(&self) -> Alert {
        match self {
            SetupError::BridgeMissing => Alert::InstallWallet,
            SetupError::AccountsUnavailable => Alert::LogIn,
            SetupError::NoAccounts => Alert::NoAccounts,
        }
    }
}

/// Blocking user-facing messages raised during startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Alert {
    InstallWallet,
    LogIn,
    NoAccounts,
}

impl Alert {
    pub fn message(&self) -> &'static str {
        match self {
            Alert::InstallWallet => "You should download MetaMask/Mist for security reasons",
            Alert::LogIn => "Log in your MetaMask account",
            Alert::NoAccounts => "Cannot get accounts from MetaMask",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum RelayState {
    Uninitialized,
    Ready(Identity),
    Failed(SetupError),
}

impl RelayState {
    pub fn is_ready(&self) -> bool {
        matches!(self, RelayState::Ready(_))
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            RelayState::Ready(identity) => Some(identity),
            _ => None,
        }
    }
}

/// Process-wide relay session. Owned by the relay, never a global.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct Session {
    #[schema(value_type = Object)]
    pub state: RelayState,
    /// Last alert raised by `start`, cleared on a successful start.
    pub last_alert: Option<Alert>,
    /// Number of times `start` has run.
    pub starts: u64,
    pub started_at: Option<DateTime<Utc>>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            state: RelayState::Uninitialized,
            last_alert: None,
            starts: 0,
            started_at: None,
        }
    }
}

impl Session {
    pub(crate) fn mark_ready(&mut self, identity: Identity) {
        self.state = RelayState::Ready(identity);
        self.last_alert = None;
        self.record_start();
    }

    pub(crate) fn mark_failed(&mut self, error: SetupError) {
        self.state = RelayState::Failed(error);
        self.last_alert = Some(error.alert());
        self.record_start();
    }

    fn record_start(&mut self) {
        self.starts += 1;
        self.started_at = Some(Utc::now());
    }
}
