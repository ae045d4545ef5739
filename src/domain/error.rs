use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("validation: {0}")]
    Validation(String),

    #[error("payment already in progress")]
    AlreadyInProgress,

    /// Error reported by the gateway itself. `status` is the HTTP status it
    /// answered with, or 500 when no response was received.
    #[error("gateway error ({status}): {message}")]
    Gateway {
        status: u16,
        external_id: Option<String>,
        message: String,
        code: Option<String>,
    },

    #[error("provider: {0}")]
    Provider(String),

    #[error("database: {0}")]
    Database(#[from] sqlx::Error),
}
