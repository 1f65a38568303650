//! Outbound event notifiers.
//!
//! Each notifier turns a completed domain mutation into zero-or-more
//! notifications, one per affected recipient who is currently connected.
//! Delivery is best-effort and at-most-once: an offline recipient is a
//! normal terminal state, and one recipient's write failure never blocks
//! delivery to the others.

pub mod friend;
pub mod like;
pub mod message;

pub use friend::FriendNotifier;
pub use like::LikeNotifier;
pub use message::MessageNotifier;

use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::error::AppResult;
use crate::metrics::{self, outcome};
use crate::websocket::message_types::WsOutboundEvent;
use crate::websocket::registry::ConnectionRegistry;

/// Writes an already-serialized frame to one recipient.
///
/// Offline is success with zero bytes written; a write failure is
/// surfaced to the caller, which decides whether it matters.
async fn deliver(
    registry: &ConnectionRegistry,
    recipient: Uuid,
    tag: &'static str,
    frame: &str,
) -> AppResult<()> {
    let Some(handle) = registry.lookup(recipient).await else {
        debug!(%recipient, event = tag, "recipient offline, skipping notification");
        metrics::WS_NOTIFICATIONS_TOTAL
            .with_label_values(&[tag, outcome::OFFLINE])
            .inc();
        return Ok(());
    };

    match handle.send_text(frame) {
        Ok(()) => {
            metrics::WS_NOTIFICATIONS_TOTAL
                .with_label_values(&[tag, outcome::DELIVERED])
                .inc();
            Ok(())
        }
        Err(err) => {
            metrics::WS_NOTIFICATIONS_TOTAL
                .with_label_values(&[tag, outcome::WRITE_FAILED])
                .inc();
            Err(err)
        }
    }
}

/// Notifies a single recipient, serializing the event first so a bad
/// payload never reaches the wire half-written.
pub(crate) async fn notify_user(
    registry: &ConnectionRegistry,
    recipient: Uuid,
    event: &WsOutboundEvent,
) -> AppResult<()> {
    let frame = event.to_json()?;
    deliver(registry, recipient, event.tag(), &frame).await
}

/// Fans one event out to many recipients. The event is serialized once;
/// each delivery is independent and a failure is logged, not propagated.
pub(crate) async fn notify_each(
    registry: &ConnectionRegistry,
    recipients: &[Uuid],
    event: &WsOutboundEvent,
) {
    let frame = match event.to_json() {
        Ok(frame) => frame,
        Err(err) => {
            error!(event = event.tag(), error = %err, "failed to serialize event, dropping fan-out");
            return;
        }
    };

    for &recipient in recipients {
        if let Err(err) = deliver(registry, recipient, event.tag(), &frame).await {
            warn!(%recipient, event = event.tag(), error = %err, "failed to deliver notification");
        }
    }
}
