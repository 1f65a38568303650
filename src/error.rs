use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("not found")]
    NotFound,

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("upstream service error: {0}")]
    Upstream(String),

    #[error("delivery failed: {0}")]
    Delivery(String),

    #[error("internal error")]
    Internal,
}

impl AppError {
    /// Wraps a collaborator failure with the call that produced it.
    pub fn upstream(context: &str, err: impl std::fmt::Display) -> Self {
        AppError::Upstream(format!("{context}: {err}"))
    }

    /// Machine-readable code carried in the `error` frame sent back to
    /// the client.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config",
            AppError::BadRequest(_) => "bad_request",
            AppError::Unauthorized => "unauthorized",
            AppError::Forbidden => "forbidden",
            AppError::NotFound => "not_found",
            AppError::UnknownCommand(_) => "unknown_command",
            AppError::Payload(_) => "malformed_payload",
            AppError::Upstream(_) => "upstream_error",
            AppError::Delivery(_) => "delivery_failed",
            AppError::Internal => "internal",
        }
    }
}
