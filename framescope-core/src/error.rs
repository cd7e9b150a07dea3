use framescope_meta::MetaError;
use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Frame error: {0}")]
    Frame(#[from] MetaError),

    #[error("Invalid hex in '{field}': {source}")]
    InvalidHex {
        field: String,
        #[source]
        source: hex::FromHexError,
    },

    #[error("Message decode error: {0}")]
    MessageDecode(#[from] prost::DecodeError),

    #[error("Message has no data")]
    MissingMessageData,

    #[error("Message is not a frame action")]
    NotFrameAction,

    #[error("Message hash does not match its data")]
    HashMismatch,

    #[error("Unsupported {what} scheme {value}")]
    UnsupportedScheme { what: &'static str, value: i32 },

    #[error("Invalid signature: {0}")]
    Signature(#[from] ed25519_dalek::SignatureError),

    #[error("Request body has no trustedData.messageBytes")]
    MissingTrustedData,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Config file error: {0}")]
    ConfigFile(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    pub(crate) fn transport(url: &str, source: reqwest::Error) -> Self {
        CoreError::Transport {
            url: url.to_string(),
            source,
        }
    }

    pub(crate) fn hex(field: &str, source: hex::FromHexError) -> Self {
        CoreError::InvalidHex {
            field: field.to_string(),
            source,
        }
    }
}
