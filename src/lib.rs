pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod notifiers;
pub mod services;
pub mod state;
pub mod websocket;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
pub use websocket::registry::{ConnectionHandle, ConnectionRegistry};
pub use websocket::session::ws_handler;
