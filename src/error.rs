use thiserror::Error;

/// Errors that can occur while browsing recipes
#[derive(Error, Debug)]
pub enum BrowserError {
    /// The recipe service could not be reached or returned garbage
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The recipe service answered with a non-success status
    #[error("Recipe service returned {status} for {url}")]
    Http { status: u16, url: String },

    /// No recipe exists with the requested id
    #[error("Recipe not found: {0}")]
    NotFound(String),

    /// A value supplied by the user was rejected
    #[error("Invalid input: {0}")]
    Validation(String),

    /// An event needed a model that has not been created yet
    #[error("No {0} available yet")]
    MissingState(&'static str),

    /// Reading or writing persisted data failed
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Persisted or received data could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, BrowserError>;
