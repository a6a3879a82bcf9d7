//! Error types for deck loading, tokenization, configuration and startup.

/// Failure to load a deck from its document store.
#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    #[error("Not authorized to read this deck")]
    Unauthorized,

    #[error("Document database returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Could not reach the document database: {0}")]
    Transport(String),

    #[error("Unexpected response from the document database: {0}")]
    Decode(String),

    #[error("Local deck storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Local deck storage is unavailable: {0}")]
    StorageUnavailable(String),
}

/// Failure to exchange card details for a payment method.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("{0}")]
    Invalid(String),

    #[error("{message}")]
    Declined { code: Option<String>, message: String },

    #[error("Could not reach the payment processor: {0}")]
    Transport(String),

    #[error("Unexpected response from the payment processor: {0}")]
    Decode(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value {value:?} for {var}")]
    Invalid { var: &'static str, value: String },
}

/// Anything that stops the application from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to open deck database: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("GUI error: {0}")]
    Gui(#[from] eframe::Error),
}
