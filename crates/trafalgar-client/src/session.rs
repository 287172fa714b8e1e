//! # Session Gate
//!
//! Thin pass-through over the authentication collaborator.
//!
//! ```text
//! ┌──────────────┐  presence()   ┌──────────────┐  presence()   ┌──────────┐
//! │    View      │ ────────────► │ SessionGate  │ ────────────► │ Session  │
//! │ Sign In/Out  │  request_*()  │ (no state)   │  sign_in/out  │ Provider │
//! └──────────────┘ ◄──────────── └──────────────┘ ◄──────────── └──────────┘
//!                      errors returned unchanged
//! ```
//!
//! The gate caches nothing: every `presence()` call asks the provider, so a
//! sign-in completed elsewhere shows up on the next snapshot.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};
use ts_rs::TS;

use crate::error::ClientError;

/// Error type produced by a session provider.
///
/// The gate never wraps or translates it.
pub type SessionError = Box<dyn std::error::Error + Send + Sync>;

// =============================================================================
// Session Presence
// =============================================================================

/// Whether a visitor is currently signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SessionPresence {
    Present,
    #[default]
    Absent,
}

impl SessionPresence {
    /// Returns true when a visitor is signed in.
    pub fn is_present(&self) -> bool {
        matches!(self, SessionPresence::Present)
    }
}

impl From<bool> for SessionPresence {
    fn from(signed_in: bool) -> Self {
        if signed_in {
            SessionPresence::Present
        } else {
            SessionPresence::Absent
        }
    }
}

impl fmt::Display for SessionPresence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionPresence::Present => write!(f, "present"),
            SessionPresence::Absent => write!(f, "absent"),
        }
    }
}

impl std::str::FromStr for SessionPresence {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "present" | "signed-in" | "signed_in" => Ok(SessionPresence::Present),
            "absent" | "signed-out" | "signed_out" | "anonymous" => Ok(SessionPresence::Absent),
            other => Err(ClientError::InvalidConfig(format!(
                "Unknown session presence: '{}'. Valid options: present, absent",
                other
            ))),
        }
    }
}

// =============================================================================
// Session Provider
// =============================================================================

/// The external authentication collaborator.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Returns the current presence.
    fn presence(&self) -> SessionPresence;

    /// Starts a sign-in.
    async fn sign_in(&self) -> Result<(), SessionError>;

    /// Ends the current session.
    async fn sign_out(&self) -> Result<(), SessionError>;
}

/// Session provider backed by a flag in memory.
///
/// Sign-in always succeeds; useful for the terminal app and for tests.
#[derive(Debug, Default)]
pub struct InMemorySession {
    signed_in: AtomicBool,
}

impl InMemorySession {
    /// Creates a provider with the given starting presence.
    pub fn new(initial: SessionPresence) -> Self {
        InMemorySession {
            signed_in: AtomicBool::new(initial.is_present()),
        }
    }
}

#[async_trait]
impl SessionProvider for InMemorySession {
    fn presence(&self) -> SessionPresence {
        self.signed_in.load(Ordering::SeqCst).into()
    }

    async fn sign_in(&self) -> Result<(), SessionError> {
        self.signed_in.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), SessionError> {
        self.signed_in.store(false, Ordering::SeqCst);
        Ok(())
    }
}

// =============================================================================
// Session Gate
// =============================================================================

/// Reflects session presence and forwards sign-in/sign-out requests.
#[derive(Clone)]
pub struct SessionGate {
    provider: Arc<dyn SessionProvider>,
}

impl SessionGate {
    /// Wraps a session provider.
    pub fn new(provider: Arc<dyn SessionProvider>) -> Self {
        SessionGate { provider }
    }

    /// Reads presence live from the provider.
    pub fn presence(&self) -> SessionPresence {
        self.provider.presence()
    }

    /// Forwards a sign-in request.
    pub async fn request_sign_in(&self) -> Result<(), SessionError> {
        debug!("Requesting sign-in");
        self.provider.sign_in().await.inspect_err(|e| {
            warn!(error = %e, "Sign-in request failed");
        })
    }

    /// Forwards a sign-out request.
    pub async fn request_sign_out(&self) -> Result<(), SessionError> {
        debug!("Requesting sign-out");
        self.provider.sign_out().await.inspect_err(|e| {
            warn!(error = %e, "Sign-out request failed");
        })
    }
}

impl fmt::Debug for SessionGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionGate")
            .field("presence", &self.presence())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RejectingSession;

    #[async_trait]
    impl SessionProvider for RejectingSession {
        fn presence(&self) -> SessionPresence {
            SessionPresence::Absent
        }

        async fn sign_in(&self) -> Result<(), SessionError> {
            Err("identity provider unavailable".into())
        }

        async fn sign_out(&self) -> Result<(), SessionError> {
            Err("no session to end".into())
        }
    }

    #[tokio::test]
    async fn test_gate_reflects_provider() {
        let gate = SessionGate::new(Arc::new(InMemorySession::default()));
        assert_eq!(gate.presence(), SessionPresence::Absent);

        gate.request_sign_in().await.unwrap();
        assert_eq!(gate.presence(), SessionPresence::Present);

        gate.request_sign_out().await.unwrap();
        assert_eq!(gate.presence(), SessionPresence::Absent);
    }

    #[tokio::test]
    async fn test_provider_errors_pass_through_unchanged() {
        let gate = SessionGate::new(Arc::new(RejectingSession));

        let err = gate.request_sign_in().await.unwrap_err();
        assert_eq!(err.to_string(), "identity provider unavailable");

        let err = gate.request_sign_out().await.unwrap_err();
        assert_eq!(err.to_string(), "no session to end");
    }

    #[test]
    fn test_presence_parsing() {
        assert_eq!("present".parse::<SessionPresence>().unwrap(), SessionPresence::Present);
        assert_eq!(" Absent ".parse::<SessionPresence>().unwrap(), SessionPresence::Absent);
        assert!("maybe".parse::<SessionPresence>().is_err());
        assert_eq!(
            serde_json::to_string(&SessionPresence::Present).unwrap(),
            r#""present""#
        );
    }

    #[test]
    fn test_in_memory_initial_presence() {
        let provider = InMemorySession::new(SessionPresence::Present);
        assert!(provider.presence().is_present());
    }
}
