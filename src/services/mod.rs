//! Capability traits for the domain services this core depends on.
//!
//! Each collaborator is one narrow trait so the real-time core can be
//! wired to gRPC clients in the gateway binary and to fakes in tests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{ChatMessage, PublicUserInfo};

#[async_trait]
pub trait MessageService: Send + Sync {
    /// Persists a new message and returns the stored row.
    async fn send_message(&self, sender_id: Uuid, chat_id: Uuid, text: &str)
        -> AppResult<ChatMessage>;

    async fn get_message_by_id(&self, message_id: Uuid) -> AppResult<ChatMessage>;

    /// Deletes a message on behalf of `user_id`; returns the deleted
    /// message so callers can correlate the chat it belonged to.
    async fn delete_message(&self, user_id: Uuid, message_id: Uuid) -> AppResult<ChatMessage>;

    /// Moves `user_id`'s last-read marker in `chat_id` up to `message_id`.
    async fn mark_read(&self, user_id: Uuid, chat_id: Uuid, message_id: Uuid) -> AppResult<()>;
}

#[async_trait]
pub trait ChatService: Send + Sync {
    async fn get_chat_participants(&self, chat_id: Uuid) -> AppResult<Vec<Uuid>>;

    async fn delete_chat(&self, user_id: Uuid, chat_id: Uuid) -> AppResult<()>;
}

#[async_trait]
pub trait ProfileService: Send + Sync {
    async fn get_public_user_info(&self, user_id: Uuid) -> AppResult<PublicUserInfo>;
}

/// Resolves a bearer token to an authenticated user identity.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, token: &str) -> AppResult<Uuid>;
}
