use thiserror::Error;

/// Errors that can occur when starting the hookrelay server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A configuration error (bad file, missing credential, bad value).
    #[error("configuration error: {0}")]
    Config(String),

    /// An I/O error (e.g. binding the listener or reading the config file).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
