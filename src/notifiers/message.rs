use std::sync::Arc;

use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{ChatDeleted, MessageDeleted, MessageView, ReadReceipt};
use crate::services::{ChatService, MessageService, ProfileService};
use crate::websocket::message_types::WsOutboundEvent;
use crate::websocket::registry::ConnectionRegistry;

use super::{notify_each, notify_user};

/// Drives the messenger commands: persist through the domain services,
/// then fan the resulting event out to the affected chat participants.
pub struct MessageNotifier {
    registry: ConnectionRegistry,
    messages: Arc<dyn MessageService>,
    chats: Arc<dyn ChatService>,
    profiles: Arc<dyn ProfileService>,
}

impl MessageNotifier {
    pub fn new(
        registry: ConnectionRegistry,
        messages: Arc<dyn MessageService>,
        chats: Arc<dyn ChatService>,
        profiles: Arc<dyn ProfileService>,
    ) -> Self {
        Self {
            registry,
            messages,
            chats,
            profiles,
        }
    }

    /// Persists a new message and notifies the other chat participants
    /// with the message enriched by the sender's public info.
    pub async fn send_message(&self, sender_id: Uuid, chat_id: Uuid, text: &str) -> AppResult<()> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::BadRequest("message text must not be empty".into()));
        }
        if chat_id.is_nil() {
            return Err(AppError::BadRequest("chat id is required".into()));
        }

        let message = self.messages.send_message(sender_id, chat_id, text).await?;
        let sender = self
            .profiles
            .get_public_user_info(sender_id)
            .await
            .map_err(|err| AppError::upstream("get_public_user_info", err))?;
        let participants = self.chats.get_chat_participants(chat_id).await?;

        let recipients: Vec<Uuid> = participants
            .into_iter()
            .filter(|id| *id != sender_id)
            .collect();
        let event = WsOutboundEvent::Message(MessageView::new(message, sender));
        notify_each(&self.registry, &recipients, &event).await;
        Ok(())
    }

    /// Advances the reader's last-read marker and sends a read receipt
    /// to the message's original sender.
    pub async fn mark_read(&self, reader_id: Uuid, chat_id: Uuid, message_id: Uuid) -> AppResult<()> {
        if chat_id.is_nil() || message_id.is_nil() {
            return Err(AppError::BadRequest("chat id and message id are required".into()));
        }

        self.messages.mark_read(reader_id, chat_id, message_id).await?;
        let message = self.messages.get_message_by_id(message_id).await?;
        if message.sender_id == reader_id {
            // Reading your own message produces no receipt.
            return Ok(());
        }

        let event = WsOutboundEvent::MessageRead(ReadReceipt {
            message_id,
            chat_id,
            reader_id,
            read_at: Utc::now(),
        });
        if let Err(err) = notify_user(&self.registry, message.sender_id, &event).await {
            // The read state is already persisted; a failed receipt is
            // only the sender being unreachable.
            warn!(sender = %message.sender_id, error = %err, "failed to deliver read receipt");
        }
        Ok(())
    }

    /// Deletes a message and tells every chat participant to drop it.
    pub async fn delete_message(&self, user_id: Uuid, message_id: Uuid) -> AppResult<()> {
        if message_id.is_nil() {
            return Err(AppError::BadRequest("message id is required".into()));
        }

        let message = self.messages.delete_message(user_id, message_id).await?;
        let participants = self.chats.get_chat_participants(message.chat_id).await?;

        let event = WsOutboundEvent::MessageDelete(MessageDeleted {
            message_id,
            chat_id: message.chat_id,
        });
        notify_each(&self.registry, &participants, &event).await;
        Ok(())
    }

    /// Deletes a whole chat. The acting user must be a participant;
    /// the check happens before the domain call and any fan-out.
    pub async fn delete_chat(&self, user_id: Uuid, chat_id: Uuid) -> AppResult<()> {
        if chat_id.is_nil() {
            return Err(AppError::BadRequest("chat id is required".into()));
        }

        let participants = self.chats.get_chat_participants(chat_id).await?;
        if !participants.contains(&user_id) {
            return Err(AppError::Forbidden);
        }

        self.chats.delete_chat(user_id, chat_id).await?;
        let event = WsOutboundEvent::ChatDelete(ChatDeleted { chat_id });
        notify_each(&self.registry, &participants, &event).await;
        Ok(())
    }
}
