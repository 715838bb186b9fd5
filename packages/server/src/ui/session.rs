//! WebSocket session lifecycle.
//!
//! ```text
//! Connecting -> Authenticating -> Upgrading -> Active -> Closing -> Closed
//!                     |               |
//!                     +---------------+-------------------------> Closed
//! ```

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connecting,
    Authenticating,
    Upgrading,
    Active,
    Closing,
    Closed,
}

impl SessionState {
    pub fn can_transition_to(self, next: SessionState) -> bool {
        use SessionState::*;
        matches!(
            (self, next),
            (Connecting, Authenticating)
                | (Authenticating, Upgrading)
                | (Authenticating, Closed)
                | (Upgrading, Active)
                | (Upgrading, Closed)
                | (Active, Closing)
                | (Closing, Closed)
        )
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Connecting => "connecting",
            SessionState::Authenticating => "authenticating",
            SessionState::Upgrading => "upgrading",
            SessionState::Active => "active",
            SessionState::Closing => "closing",
            SessionState::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Tracks and traces the state of one session.
#[derive(Debug, Clone)]
pub struct SessionLifecycle {
    target: String,
    state: SessionState,
}

impl SessionLifecycle {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            state: SessionState::Connecting,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Move to `next`. Illegal transitions are logged and ignored.
    pub fn advance(&mut self, next: SessionState) -> bool {
        if !self.state.can_transition_to(next) {
            tracing::warn!(
                target_chat = %self.target,
                "Ignoring session transition {} -> {}",
                self.state,
                next
            );
            return false;
        }
        tracing::debug!(target_chat = %self.target, "Session {} -> {}", self.state, next);
        self.state = next;
        true
    }
}
