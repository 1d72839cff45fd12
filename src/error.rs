use std::fmt;

use crate::source::SourceTag;

#[derive(Debug)]
pub enum SpillError {
    Exhausted { source: SourceTag, position: usize },
    DuplicateIdentifier(i64),
    Config(String),
    Stream(String),
    Serialization(Box<bincode::error::EncodeError>),
    Deserialization(Box<bincode::error::DecodeError>),
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for SpillError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpillError::Exhausted { source, position } => {
                write!(f, "{} stream exhausted at record {}", source, position)
            }
            SpillError::DuplicateIdentifier(id) => write!(f, "duplicate final event id {}", id),
            SpillError::Config(e) => write!(f, "Configuration error: {}", e),
            SpillError::Stream(e) => write!(f, "Stream error: {}", e),
            SpillError::Serialization(e) => write!(f, "Serialization error: {}", e),
            SpillError::Deserialization(e) => write!(f, "Deserialization error: {}", e),
            SpillError::Io(e) => write!(f, "IO error: {}", e),
            SpillError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for SpillError {}

impl From<Box<bincode::error::EncodeError>> for SpillError {
    fn from(err: Box<bincode::error::EncodeError>) -> Self {
        SpillError::Serialization(err)
    }
}

impl From<bincode::error::EncodeError> for SpillError {
    fn from(err: bincode::error::EncodeError) -> Self {
        SpillError::Serialization(Box::new(err))
    }
}

impl From<Box<bincode::error::DecodeError>> for SpillError {
    fn from(err: Box<bincode::error::DecodeError>) -> Self {
        SpillError::Deserialization(err)
    }
}

impl From<bincode::error::DecodeError> for SpillError {
    fn from(err: bincode::error::DecodeError) -> Self {
        SpillError::Deserialization(Box::new(err))
    }
}

impl From<std::io::Error> for SpillError {
    fn from(err: std::io::Error) -> Self {
        SpillError::Io(err)
    }
}

impl From<serde_json::Error> for SpillError {
    fn from(err: serde_json::Error) -> Self {
        SpillError::Json(err)
    }
}
