//! End-to-end command flow through the composed AppState: router
//! registration, payload decoding, domain calls, and fan-out.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use common::{assert_no_frames, connect, public_user, recv_json, FakeChats, FakeMessages, FakeProfiles};
use gateway_realtime::error::{AppError, AppResult};
use gateway_realtime::services::Authenticator;
use gateway_realtime::{AppState, Config};

struct StaticAuth(Uuid);

#[async_trait]
impl Authenticator for StaticAuth {
    async fn authenticate(&self, token: &str) -> AppResult<Uuid> {
        if token == "valid" {
            Ok(self.0)
        } else {
            Err(AppError::Unauthorized)
        }
    }
}

fn composed_state(chat_id: Uuid, participants: Vec<Uuid>) -> AppState {
    let mut profiles = FakeProfiles::default();
    for id in &participants {
        profiles = profiles.with_user(public_user(*id, "member"));
    }
    AppState::new(
        Config::test_defaults(),
        Arc::new(StaticAuth(participants[0])),
        Arc::new(FakeMessages::default()),
        Arc::new(FakeChats::default().with_chat(chat_id, participants)),
        Arc::new(profiles),
    )
}

#[tokio::test]
async fn all_startup_commands_are_registered() {
    let state = composed_state(Uuid::new_v4(), vec![Uuid::new_v4()]);
    let mut tags = state.router.registered_tags();
    tags.sort_unstable();
    assert_eq!(tags, vec!["delete_chat", "delete_message", "mark_read", "message"]);
}

#[tokio::test]
async fn message_command_flows_from_router_to_recipient_connection() {
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let chat_id = Uuid::new_v4();
    let state = composed_state(chat_id, vec![alice, bob]);

    let mut bob_rx = connect(&state.registry, bob).await;

    state
        .router
        .dispatch(
            alice,
            "message",
            json!({"chat_id": chat_id, "text": "routed hello"}),
        )
        .await
        .unwrap();

    let frame = recv_json(&mut bob_rx);
    assert_eq!(frame["type"], "message");
    assert_eq!(frame["payload"]["text"], "routed hello");
}

#[tokio::test]
async fn malformed_command_payload_is_a_payload_error() {
    let alice = Uuid::new_v4();
    let state = composed_state(Uuid::new_v4(), vec![alice]);

    let err = state
        .router
        .dispatch(alice, "message", json!({"chat_id": "not-a-uuid"}))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Payload(_)));
}

#[tokio::test]
async fn delete_chat_by_outsider_is_rejected_through_the_router() {
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let outsider = Uuid::new_v4();
    let chat_id = Uuid::new_v4();
    let state = composed_state(chat_id, vec![alice, bob]);

    let mut alice_rx = connect(&state.registry, alice).await;

    let err = state
        .router
        .dispatch(outsider, "delete_chat", json!({"chat_id": chat_id}))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
    assert_no_frames(&mut alice_rx);
}
