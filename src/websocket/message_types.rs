use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    ChatDeleted, CommentLikedView, FriendRequestView, MessageDeleted, MessageView,
    PostCommentedView, PostLikedView, ReadReceipt,
};

/// One inbound client frame: a command tag plus an opaque payload that
/// stays undecoded until the routed handler picks it apart.
#[derive(Debug, Deserialize)]
pub struct CommandFrame {
    #[serde(rename = "type")]
    pub tag: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct SendMessagePayload {
    pub chat_id: Uuid,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct MarkReadPayload {
    pub chat_id: Uuid,
    pub message_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct DeleteMessagePayload {
    pub message_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct DeleteChatPayload {
    pub chat_id: Uuid,
}

/// Outbound event envelope, serialized as
/// `{"type": "<event tag>", "payload": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum WsOutboundEvent {
    #[serde(rename = "message")]
    Message(MessageView),

    #[serde(rename = "message_read")]
    MessageRead(ReadReceipt),

    #[serde(rename = "message_delete")]
    MessageDelete(MessageDeleted),

    #[serde(rename = "chat_delete")]
    ChatDelete(ChatDeleted),

    #[serde(rename = "fr_received")]
    FriendRequestReceived(FriendRequestView),

    #[serde(rename = "fr_accepted")]
    FriendRequestAccepted(FriendRequestView),

    #[serde(rename = "post_liked")]
    PostLiked(PostLikedView),

    #[serde(rename = "comment_liked")]
    CommentLiked(CommentLikedView),

    #[serde(rename = "post_commented")]
    PostCommented(PostCommentedView),

    /// Protocol/command failure reported back on the offending connection.
    #[serde(rename = "error")]
    Error { code: String, message: String },
}

impl WsOutboundEvent {
    /// Event tag as it appears on the wire, used for logging and metrics.
    pub fn tag(&self) -> &'static str {
        match self {
            WsOutboundEvent::Message(_) => "message",
            WsOutboundEvent::MessageRead(_) => "message_read",
            WsOutboundEvent::MessageDelete(_) => "message_delete",
            WsOutboundEvent::ChatDelete(_) => "chat_delete",
            WsOutboundEvent::FriendRequestReceived(_) => "fr_received",
            WsOutboundEvent::FriendRequestAccepted(_) => "fr_accepted",
            WsOutboundEvent::PostLiked(_) => "post_liked",
            WsOutboundEvent::CommentLiked(_) => "comment_liked",
            WsOutboundEvent::PostCommented(_) => "post_commented",
            WsOutboundEvent::Error { .. } => "error",
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
