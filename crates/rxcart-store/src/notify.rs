//! # Notifications
//!
//! Toasts raised by the store. The store only knows the [`Notifier`]
//! trait; the storefront decides where toasts go.

use rxcart_core::Notification;
use tokio::sync::broadcast;
use tracing::trace;

/// Receives toasts from the store.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Fans toasts out to every subscriber.
///
/// Clones share one channel. A toast raised while nobody is subscribed is
/// dropped.
#[derive(Debug, Clone)]
pub struct ToastChannel {
    sender: broadcast::Sender<Notification>,
}

impl ToastChannel {
    /// Creates a channel buffering up to `capacity` unread toasts per
    /// subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        ToastChannel { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }
}

impl Notifier for ToastChannel {
    fn notify(&self, notification: Notification) {
        if self.sender.send(notification).is_err() {
            trace!("Toast dropped: no subscribers");
        }
    }
}

/// Swallows every toast.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _notification: Notification) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use rxcart_core::Severity;

    #[test]
    fn test_toast_channel_delivers_to_subscribers() {
        let channel = ToastChannel::new(8);
        let mut rx = channel.subscribe();

        channel.notify(Notification::success("ORS added to cart"));

        let received = rx.try_recv().unwrap();
        assert_eq!(received.severity, Severity::Success);
        assert_eq!(received.message, "ORS added to cart");
    }

    #[test]
    fn test_toast_channel_without_subscribers_does_not_fail() {
        let channel = ToastChannel::new(0);
        channel.notify(Notification::info("nobody listening"));
    }
}
