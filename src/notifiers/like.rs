use std::sync::Arc;

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{CommentLikedView, PostCommentedView, PostLikedView, PublicUserInfo};
use crate::services::ProfileService;
use crate::websocket::message_types::WsOutboundEvent;
use crate::websocket::registry::ConnectionRegistry;

use super::notify_user;

/// Notifies content authors about likes and comments on their posts.
pub struct LikeNotifier {
    registry: ConnectionRegistry,
    profiles: Arc<dyn ProfileService>,
}

impl LikeNotifier {
    pub fn new(registry: ConnectionRegistry, profiles: Arc<dyn ProfileService>) -> Self {
        Self { registry, profiles }
    }

    async fn fetch_profile(&self, user_id: Uuid) -> AppResult<PublicUserInfo> {
        self.profiles
            .get_public_user_info(user_id)
            .await
            .map_err(|err| AppError::upstream("get_public_user_info", err))
    }

    pub async fn post_liked(&self, liker_id: Uuid, author_id: Uuid, post_id: Uuid) -> AppResult<()> {
        if liker_id == author_id || !self.registry.is_connected(author_id).await {
            return Ok(());
        }

        let liked_by = self.fetch_profile(liker_id).await?;
        let event = WsOutboundEvent::PostLiked(PostLikedView { post_id, liked_by });
        notify_user(&self.registry, author_id, &event).await
    }

    pub async fn comment_liked(
        &self,
        liker_id: Uuid,
        comment_author_id: Uuid,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> AppResult<()> {
        if liker_id == comment_author_id || !self.registry.is_connected(comment_author_id).await {
            return Ok(());
        }

        let liked_by = self.fetch_profile(liker_id).await?;
        let comment_author = self.fetch_profile(comment_author_id).await?;
        let event = WsOutboundEvent::CommentLiked(CommentLikedView {
            post_id,
            comment_id,
            liked_by,
            comment_author,
        });
        notify_user(&self.registry, comment_author_id, &event).await
    }

    pub async fn post_commented(
        &self,
        commenter_id: Uuid,
        author_id: Uuid,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> AppResult<()> {
        if commenter_id == author_id || !self.registry.is_connected(author_id).await {
            return Ok(());
        }

        let commented_by = self.fetch_profile(commenter_id).await?;
        let event = WsOutboundEvent::PostCommented(PostCommentedView {
            post_id,
            comment_id,
            commented_by,
        });
        notify_user(&self.registry, author_id, &event).await
    }
}
