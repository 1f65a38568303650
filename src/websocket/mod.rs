pub mod keepalive;
pub mod message_types;
pub mod registry;
pub mod router;
pub mod session;

pub use registry::{ConnectionHandle, ConnectionRegistry};
pub use router::CommandRouter;

/// Inbound command tags recognized by the router.
pub mod commands {
    pub const MESSAGE: &str = "message";
    pub const MARK_READ: &str = "mark_read";
    pub const DELETE_MESSAGE: &str = "delete_message";
    pub const DELETE_CHAT: &str = "delete_chat";
}
