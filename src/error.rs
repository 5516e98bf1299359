/// Result type for store, checkout and auth operations
pub type PosResult<T> = Result<T, PosError>;

/// Error type shared by every layer below the Tauri commands
#[derive(Debug, thiserror::Error)]
pub enum PosError {
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Insufficient amount: total {total:.2}, received {received:.2}")]
    InsufficientPayment { total: f64, received: f64 },

    #[error("{0}")]
    Auth(String),

    #[error("{0}")]
    Network(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PosError {
    pub fn validation(msg: impl Into<String>) -> Self {
        PosError::Validation(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        PosError::NotFound(what.into())
    }
}
