//! Unified Error Model
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostgateError {
    #[error("PARSE/{0}")]
    Parse(String),

    #[error("PROFILE/{0}")]
    Profile(String),

    #[error("IO/{0}")]
    Io(#[from] std::io::Error),

    #[error("SERIALIZE/{0}")]
    Serialize(#[from] serde_json::Error),
}

impl PostgateError {
    /// The message without its category prefix
    pub fn detail(&self) -> String {
        match self {
            Self::Parse(msg) | Self::Profile(msg) => msg.clone(),
            Self::Io(e) => e.to_string(),
            Self::Serialize(e) => e.to_string(),
        }
    }
}
