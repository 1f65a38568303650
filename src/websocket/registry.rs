use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::ws::Message;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::metrics;

/// Write handle for one live connection.
///
/// Wraps the sender side of the connection's outbound queue. The queue is
/// drained by a single writer task that owns the socket sink, so every
/// write to a connection goes through one serialized path; a send error
/// means that task (and the connection) is gone.
#[derive(Clone)]
pub struct ConnectionHandle {
    tx: UnboundedSender<Message>,
}

impl ConnectionHandle {
    pub fn new(tx: UnboundedSender<Message>) -> Self {
        Self { tx }
    }

    pub fn send_text(&self, text: impl Into<String>) -> AppResult<()> {
        self.tx
            .send(Message::Text(text.into()))
            .map_err(|_| AppError::Delivery("connection write queue closed".into()))
    }

    pub fn send_ping(&self) -> AppResult<()> {
        self.tx
            .send(Message::Ping(Vec::new()))
            .map_err(|_| AppError::Delivery("connection write queue closed".into()))
    }

    /// Asks the writer task to close the socket. Best-effort: a queue
    /// that is already gone means the connection is already down.
    pub fn close(&self) {
        let _ = self.tx.send(Message::Close(None));
    }

    /// True when both handles feed the same connection's write queue.
    pub fn is_same(&self, other: &ConnectionHandle) -> bool {
        self.tx.same_channel(&other.tx)
    }
}

/// Single source of truth for "is user X currently reachable, and via
/// which connection". One entry per user; a reconnect replaces the
/// previous handle (last writer wins).
#[derive(Clone, Default)]
pub struct ConnectionRegistry {
    inner: Arc<RwLock<HashMap<Uuid, ConnectionHandle>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or silently replaces) the connection for a user. The
    /// replaced handle is not closed here; the session that owns it
    /// notices on its next write.
    pub async fn add(&self, user_id: Uuid, handle: ConnectionHandle) {
        let mut guard = self.inner.write().await;
        guard.insert(user_id, handle);
        metrics::WS_ACTIVE_CONNECTIONS.set(guard.len() as i64);
    }

    /// Removes the entry if present and closes the connection.
    /// Idempotent: removing an absent user is a no-op.
    pub async fn remove(&self, user_id: Uuid) {
        let removed = {
            let mut guard = self.inner.write().await;
            let removed = guard.remove(&user_id);
            metrics::WS_ACTIVE_CONNECTIONS.set(guard.len() as i64);
            removed
        };
        // Close outside the critical section.
        if let Some(handle) = removed {
            handle.close();
        }
    }

    /// Removes the entry only when it still belongs to `handle`.
    ///
    /// Session and keepalive teardown use this instead of `remove` so a
    /// stale session that dies after a reconnect cannot evict the
    /// replacement connection's entry.
    pub async fn remove_if_same(&self, user_id: Uuid, handle: &ConnectionHandle) {
        let removed = {
            let mut guard = self.inner.write().await;
            match guard.get(&user_id) {
                Some(current) if current.is_same(handle) => {
                    let removed = guard.remove(&user_id);
                    metrics::WS_ACTIVE_CONNECTIONS.set(guard.len() as i64);
                    removed
                }
                _ => None,
            }
        };
        if let Some(handle) = removed {
            handle.close();
        }
    }

    /// Clones the handle out so callers never write while holding the lock.
    pub async fn lookup(&self, user_id: Uuid) -> Option<ConnectionHandle> {
        let guard = self.inner.read().await;
        guard.get(&user_id).cloned()
    }

    pub async fn is_connected(&self, user_id: Uuid) -> bool {
        self.inner.read().await.contains_key(&user_id)
    }

    pub async fn connected_users(&self) -> Vec<Uuid> {
        self.inner.read().await.keys().copied().collect()
    }

    pub async fn connection_count(&self) -> usize {
        self.inner.read().await.len()
    }
}
