use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Status reply other than `OK`, or a top-level error reply
    #[error("{command} rejected for key '{key}': {message}")]
    Rejected {
        command: &'static str,
        key: String,
        message: String,
    },

    /// Error element embedded where a scalar result was expected
    #[error("{command} failed for key '{key}': {message}")]
    ServerData {
        command: &'static str,
        key: String,
        message: String,
    },

    /// Reply shape the operation cannot decode
    #[error("{command} protocol violation for key '{key}': {detail}")]
    ProtocolViolation {
        command: &'static str,
        key: String,
        detail: String,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("ERR Protocol error: {0}")]
    Protocol(String),

    #[error("connection closed by server")]
    ConnectionClosed,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Server-provided message, if this error carries one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Error::Rejected { message, .. } | Error::ServerData { message, .. } => Some(message),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
