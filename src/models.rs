use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public slice of a user profile, fetched from the profile service and
/// embedded verbatim in outbound payloads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicUserInfo {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// A chat message as returned by the message service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub chat_id: Uuid,
    pub sender_id: Uuid,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

/// Message enriched with the sender's public info, as delivered to
/// chat participants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageView {
    pub id: Uuid,
    pub chat_id: Uuid,
    pub text: String,
    pub sent_at: DateTime<Utc>,
    pub sender: PublicUserInfo,
}

impl MessageView {
    pub fn new(message: ChatMessage, sender: PublicUserInfo) -> Self {
        Self {
            id: message.id,
            chat_id: message.chat_id,
            text: message.text,
            sent_at: message.sent_at,
            sender,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadReceipt {
    pub message_id: Uuid,
    pub chat_id: Uuid,
    pub reader_id: Uuid,
    pub read_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDeleted {
    pub message_id: Uuid,
    pub chat_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatDeleted {
    pub chat_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendRequestView {
    pub sender: PublicUserInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostLikedView {
    pub post_id: Uuid,
    pub liked_by: PublicUserInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentLikedView {
    pub post_id: Uuid,
    pub comment_id: Uuid,
    pub liked_by: PublicUserInfo,
    pub comment_author: PublicUserInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostCommentedView {
    pub post_id: Uuid,
    pub comment_id: Uuid,
    pub commented_by: PublicUserInfo,
}
