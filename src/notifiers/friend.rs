use std::sync::Arc;

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::FriendRequestView;
use crate::services::ProfileService;
use crate::websocket::message_types::WsOutboundEvent;
use crate::websocket::registry::ConnectionRegistry;

use super::notify_user;

/// Notifies users about friend-request activity. Triggered by the
/// gateway's friend endpoints after the domain mutation succeeded.
pub struct FriendNotifier {
    registry: ConnectionRegistry,
    profiles: Arc<dyn ProfileService>,
}

impl FriendNotifier {
    pub fn new(registry: ConnectionRegistry, profiles: Arc<dyn ProfileService>) -> Self {
        Self { registry, profiles }
    }

    pub async fn request_sent(&self, sender_id: Uuid, recipient_id: Uuid) -> AppResult<()> {
        self.notify(sender_id, recipient_id, false).await
    }

    pub async fn request_accepted(&self, sender_id: Uuid, recipient_id: Uuid) -> AppResult<()> {
        self.notify(sender_id, recipient_id, true).await
    }

    async fn notify(&self, sender_id: Uuid, recipient_id: Uuid, accepted: bool) -> AppResult<()> {
        if sender_id == recipient_id {
            return Err(AppError::BadRequest(
                "sender and recipient must be distinct users".into(),
            ));
        }
        // Offline recipients cost nothing: skip the cross-service fetch.
        if !self.registry.is_connected(recipient_id).await {
            return Ok(());
        }

        let sender = self
            .profiles
            .get_public_user_info(sender_id)
            .await
            .map_err(|err| AppError::upstream("get_public_user_info", err))?;
        let view = FriendRequestView { sender };
        let event = if accepted {
            WsOutboundEvent::FriendRequestAccepted(view)
        } else {
            WsOutboundEvent::FriendRequestReceived(view)
        };
        notify_user(&self.registry, recipient_id, &event).await
    }
}
