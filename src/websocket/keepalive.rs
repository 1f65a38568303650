use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;
use uuid::Uuid;

use super::registry::{ConnectionHandle, ConnectionRegistry};

/// Spawns the heartbeat task for one connection.
///
/// Sends a Ping through the connection's write path at a fixed interval.
/// A failed send means the writer task is gone, so the monitor removes
/// the registry entry and exits. Its lifetime is exactly one connection:
/// the owning session aborts it on every other teardown path.
pub fn spawn(
    registry: ConnectionRegistry,
    user_id: Uuid,
    handle: ConnectionHandle,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick fires immediately; the connection was just
        // established, so skip it.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if handle.send_ping().is_err() {
                debug!(%user_id, "heartbeat write failed, removing connection");
                registry.remove_if_same(user_id, &handle).await;
                break;
            }
        }
    })
}
