use thiserror::Error;

/// Unified error type for the Barista workspace.
#[derive(Error, Debug)]
pub enum BaristaError {
    // ── Config errors ──────────────────────────────────────────
    #[error("config error: {0}")]
    Config(String),

    #[error("config validation failed: {field}: {reason}")]
    ConfigValidation { field: String, reason: String },

    // ── Menu errors ────────────────────────────────────────────
    #[error("menu error: {0}")]
    Menu(String),

    #[error("drink not found: {0}")]
    DrinkNotFound(i64),

    #[error("unprocessable: {0}")]
    Unprocessable(String),

    // ── Server errors ──────────────────────────────────────────
    #[error("server error: {0}")]
    Server(String),

    // ── Generic wrappers ───────────────────────────────────────
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, BaristaError>;
