use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::metrics::{self, outcome};

/// Metric label for tags with no registered handler. The tag is client
/// input; counting it verbatim would mint one child counter per bogus
/// tag in the process-wide registry.
const UNKNOWN_COMMAND_LABEL: &str = "unknown";

/// Handler shape shared by every inbound command: authenticated caller
/// identity plus the still-opaque payload.
pub type CommandHandler =
    Arc<dyn Fn(Uuid, serde_json::Value) -> BoxFuture<'static, AppResult<()>> + Send + Sync>;

/// Flat string-keyed dispatch table for inbound client commands.
///
/// Adding a real-time command is one `register` call at startup; the
/// transport loop never changes.
#[derive(Default)]
pub struct CommandRouter {
    handlers: HashMap<String, CommandHandler>,
}

impl CommandRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associates a tag with a handler. Re-registering a tag overwrites
    /// the previous handler (last registration wins).
    pub fn register<F, Fut>(&mut self, tag: impl Into<String>, handler: F)
    where
        F: Fn(Uuid, serde_json::Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<()>> + Send + 'static,
    {
        let boxed: CommandHandler =
            Arc::new(move |user_id, payload| -> BoxFuture<'static, AppResult<()>> {
                Box::pin(handler(user_id, payload))
            });
        self.handlers.insert(tag.into(), boxed);
    }

    /// Looks up the handler for `tag` and invokes it synchronously.
    /// An unregistered tag is an `UnknownCommand` error for the caller
    /// to log or report; it never tears down the read loop.
    pub async fn dispatch(
        &self,
        user_id: Uuid,
        tag: &str,
        payload: serde_json::Value,
    ) -> AppResult<()> {
        let handler = match self.handlers.get(tag) {
            Some(handler) => Arc::clone(handler),
            None => {
                metrics::WS_COMMANDS_TOTAL
                    .with_label_values(&[UNKNOWN_COMMAND_LABEL, outcome::ERROR])
                    .inc();
                return Err(AppError::UnknownCommand(tag.to_string()));
            }
        };

        let result = handler(user_id, payload).await;
        let label = if result.is_ok() {
            outcome::OK
        } else {
            outcome::ERROR
        };
        metrics::WS_COMMANDS_TOTAL
            .with_label_values(&[tag, label])
            .inc();
        result
    }

    pub fn registered_tags(&self) -> Vec<&str> {
        self.handlers.keys().map(String::as_str).collect()
    }
}
