//! # Session Events
//!
//! Typed channel for session lifecycle signals. The auth module publishes,
//! the cart listens.
//!
//! ```text
//! Auth module ── publish(Logout) ──► SessionEvents ──► CartState::listen ──► clear()
//! ```

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

/// Default number of unread events buffered per subscriber.
///
/// A listener that falls further behind than this clears the cart, so the
/// buffer is sized well above any realistic login/logout burst.
pub const DEFAULT_SESSION_CAPACITY: usize = 64;

/// A session lifecycle signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A shopper signed in.
    Login { user_id: String },
    /// The current session ended; per-user state must go.
    Logout,
}

/// Broadcast channel for [`SessionEvent`]s.
#[derive(Debug, Clone)]
pub struct SessionEvents {
    sender: broadcast::Sender<SessionEvent>,
}

impl SessionEvents {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_SESSION_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        SessionEvents { sender }
    }

    /// Publishes `event`, returning how many subscribers will see it.
    pub fn publish(&self, event: SessionEvent) -> usize {
        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(event)) => {
                debug!(?event, "Session event published with no subscribers");
                0
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_counts_subscribers() {
        let events = SessionEvents::new();
        assert_eq!(events.publish(SessionEvent::Logout), 0);

        let mut a = events.subscribe();
        let _b = events.subscribe();
        assert_eq!(events.publish(SessionEvent::Logout), 2);
        assert_eq!(a.try_recv().unwrap(), SessionEvent::Logout);
    }

    #[test]
    fn test_event_serialization() {
        let json = serde_json::to_string(&SessionEvent::Logout).unwrap();
        assert_eq!(json, r#"{"type":"logout"}"#);

        let login: SessionEvent =
            serde_json::from_str(r#"{"type":"login","user_id":"u-1"}"#).unwrap();
        assert_eq!(
            login,
            SessionEvent::Login {
                user_id: "u-1".to_string()
            }
        );
    }
}
