//! Connectivity states

use serde::{Deserialize, Serialize};
use std::fmt;

/// Connectivity state of a single connection or of a policy as a whole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectivityState {
    #[default]
    Idle,
    Connecting,
    Ready,
    TransientFailure,
    Shutdown,
}

impl fmt::Display for ConnectivityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectivityState::Idle => "IDLE",
            ConnectivityState::Connecting => "CONNECTING",
            ConnectivityState::Ready => "READY",
            ConnectivityState::TransientFailure => "TRANSIENT_FAILURE",
            ConnectivityState::Shutdown => "SHUTDOWN",
        };
        f.write_str(name)
    }
}

/// State notification delivered to a policy for one of its connections
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConnectionState {
    pub state: ConnectivityState,
    /// Set when `state` is `TransientFailure`
    pub connection_error: Option<String>,
}

impl ConnectionState {
    pub fn new(state: ConnectivityState) -> Self {
        Self { state, connection_error: None }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self { state: ConnectivityState::TransientFailure, connection_error: Some(error.into()) }
    }
}
