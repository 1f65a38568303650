use std::sync::Arc;

use crate::config::Config;
use crate::notifiers::{FriendNotifier, LikeNotifier, MessageNotifier};
use crate::services::{Authenticator, ChatService, MessageService, ProfileService};
use crate::websocket::message_types::{
    DeleteChatPayload, DeleteMessagePayload, MarkReadPayload, SendMessagePayload,
};
use crate::websocket::{commands, CommandRouter, ConnectionRegistry};

/// Composition root for the real-time core. The gateway binary builds
/// one of these with its gRPC-backed collaborators and hands it to the
/// axum router; tests build it with fakes.
#[derive(Clone)]
pub struct AppState {
    pub registry: ConnectionRegistry,
    pub router: Arc<CommandRouter>,
    pub config: Arc<Config>,
    pub auth: Arc<dyn Authenticator>,
    pub message_notifier: Arc<MessageNotifier>,
    pub friend_notifier: Arc<FriendNotifier>,
    pub like_notifier: Arc<LikeNotifier>,
}

impl AppState {
    pub fn new(
        config: Config,
        auth: Arc<dyn Authenticator>,
        messages: Arc<dyn MessageService>,
        chats: Arc<dyn ChatService>,
        profiles: Arc<dyn ProfileService>,
    ) -> Self {
        let registry = ConnectionRegistry::new();
        let message_notifier = Arc::new(MessageNotifier::new(
            registry.clone(),
            messages,
            chats,
            Arc::clone(&profiles),
        ));
        let friend_notifier = Arc::new(FriendNotifier::new(
            registry.clone(),
            Arc::clone(&profiles),
        ));
        let like_notifier = Arc::new(LikeNotifier::new(registry.clone(), profiles));
        let router = Arc::new(build_router(Arc::clone(&message_notifier)));

        Self {
            registry,
            router,
            config: Arc::new(config),
            auth,
            message_notifier,
            friend_notifier,
            like_notifier,
        }
    }
}

/// Registers the full fixed set of inbound commands. Each handler
/// decodes its own payload and delegates to the message notifier.
pub fn build_router(notifier: Arc<MessageNotifier>) -> CommandRouter {
    let mut router = CommandRouter::new();

    {
        let notifier = Arc::clone(&notifier);
        router.register(commands::MESSAGE, move |user_id, payload| {
            let notifier = Arc::clone(&notifier);
            async move {
                let p: SendMessagePayload = serde_json::from_value(payload)?;
                notifier.send_message(user_id, p.chat_id, &p.text).await
            }
        });
    }
    {
        let notifier = Arc::clone(&notifier);
        router.register(commands::MARK_READ, move |user_id, payload| {
            let notifier = Arc::clone(&notifier);
            async move {
                let p: MarkReadPayload = serde_json::from_value(payload)?;
                notifier.mark_read(user_id, p.chat_id, p.message_id).await
            }
        });
    }
    {
        let notifier = Arc::clone(&notifier);
        router.register(commands::DELETE_MESSAGE, move |user_id, payload| {
            let notifier = Arc::clone(&notifier);
            async move {
                let p: DeleteMessagePayload = serde_json::from_value(payload)?;
                notifier.delete_message(user_id, p.message_id).await
            }
        });
    }
    {
        let notifier = Arc::clone(&notifier);
        router.register(commands::DELETE_CHAT, move |user_id, payload| {
            let notifier = Arc::clone(&notifier);
            async move {
                let p: DeleteChatPayload = serde_json::from_value(payload)?;
                notifier.delete_chat(user_id, p.chat_id).await
            }
        });
    }

    router
}
