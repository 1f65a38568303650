#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::extract::ws::Message;
use chrono::Utc;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::sync::Mutex;
use uuid::Uuid;

use gateway_realtime::error::{AppError, AppResult};
use gateway_realtime::models::{ChatMessage, PublicUserInfo};
use gateway_realtime::services::{ChatService, MessageService, ProfileService};
use gateway_realtime::websocket::registry::{ConnectionHandle, ConnectionRegistry};

/// Registers a channel-backed connection for `user_id` and returns the
/// receiving end, i.e. "what this user's client sees".
pub async fn connect(registry: &ConnectionRegistry, user_id: Uuid) -> UnboundedReceiver<Message> {
    let (tx, rx) = mpsc::unbounded_channel();
    registry.add(user_id, ConnectionHandle::new(tx)).await;
    rx
}

/// Drains exactly one text frame and parses it.
pub fn recv_json(rx: &mut UnboundedReceiver<Message>) -> serde_json::Value {
    match rx.try_recv() {
        Ok(Message::Text(text)) => serde_json::from_str(&text).expect("frame should be JSON"),
        other => panic!("expected one text frame, got {other:?}"),
    }
}

pub fn assert_no_frames(rx: &mut UnboundedReceiver<Message>) {
    assert!(rx.try_recv().is_err(), "expected no frames");
}

pub fn public_user(id: Uuid, username: &str) -> PublicUserInfo {
    PublicUserInfo {
        id,
        username: username.to_string(),
        first_name: username.to_string(),
        last_name: "Test".to_string(),
        avatar_url: None,
    }
}

/// Profile service fake: serves canned profiles, counts fetches, and can
/// be switched to fail every call.
#[derive(Default)]
pub struct FakeProfiles {
    profiles: std::sync::Mutex<HashMap<Uuid, PublicUserInfo>>,
    pub fetch_count: AtomicUsize,
    pub fail: AtomicBool,
}

impl FakeProfiles {
    pub fn with_user(self, user: PublicUserInfo) -> Self {
        self.profiles.lock().unwrap().insert(user.id, user);
        self
    }

    pub fn fetches(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileService for FakeProfiles {
    async fn get_public_user_info(&self, user_id: Uuid) -> AppResult<PublicUserInfo> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Upstream("users-service unavailable".into()));
        }
        self.profiles
            .lock()
            .unwrap()
            .get(&user_id)
            .cloned()
            .ok_or(AppError::NotFound)
    }
}

/// Chat service fake: fixed participant lists, records deletions.
#[derive(Default)]
pub struct FakeChats {
    participants: std::sync::Mutex<HashMap<Uuid, Vec<Uuid>>>,
    pub deleted: std::sync::Mutex<Vec<Uuid>>,
}

impl FakeChats {
    pub fn with_chat(self, chat_id: Uuid, participants: Vec<Uuid>) -> Self {
        self.participants.lock().unwrap().insert(chat_id, participants);
        self
    }

    pub fn deleted_chats(&self) -> Vec<Uuid> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatService for FakeChats {
    async fn get_chat_participants(&self, chat_id: Uuid) -> AppResult<Vec<Uuid>> {
        self.participants
            .lock()
            .unwrap()
            .get(&chat_id)
            .cloned()
            .ok_or(AppError::NotFound)
    }

    async fn delete_chat(&self, _user_id: Uuid, chat_id: Uuid) -> AppResult<()> {
        self.deleted.lock().unwrap().push(chat_id);
        Ok(())
    }
}

/// Message service fake: in-memory store with call counters.
#[derive(Default)]
pub struct FakeMessages {
    store: Mutex<HashMap<Uuid, ChatMessage>>,
    pub sent: AtomicUsize,
    pub read_marks: AtomicUsize,
}

impl FakeMessages {
    pub async fn seed(&self, message: ChatMessage) {
        self.store.lock().await.insert(message.id, message);
    }

    pub fn sent_count(&self) -> usize {
        self.sent.load(Ordering::SeqCst)
    }

    pub fn read_mark_count(&self) -> usize {
        self.read_marks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MessageService for FakeMessages {
    async fn send_message(
        &self,
        sender_id: Uuid,
        chat_id: Uuid,
        text: &str,
    ) -> AppResult<ChatMessage> {
        self.sent.fetch_add(1, Ordering::SeqCst);
        let message = ChatMessage {
            id: Uuid::new_v4(),
            chat_id,
            sender_id,
            text: text.to_string(),
            sent_at: Utc::now(),
        };
        self.store.lock().await.insert(message.id, message.clone());
        Ok(message)
    }

    async fn get_message_by_id(&self, message_id: Uuid) -> AppResult<ChatMessage> {
        self.store
            .lock()
            .await
            .get(&message_id)
            .cloned()
            .ok_or(AppError::NotFound)
    }

    async fn delete_message(&self, _user_id: Uuid, message_id: Uuid) -> AppResult<ChatMessage> {
        self.store
            .lock()
            .await
            .remove(&message_id)
            .ok_or(AppError::NotFound)
    }

    async fn mark_read(&self, _user_id: Uuid, _chat_id: Uuid, _message_id: Uuid) -> AppResult<()> {
        self.read_marks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
