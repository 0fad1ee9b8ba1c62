use thiserror::Error;

#[derive(Error, Debug)]
pub enum UtilsError {
    #[error("Unhashable element at index {index}: {kind} values cannot be compared")]
    UnhashableElement { index: usize, kind: &'static str },

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, UtilsError>;
