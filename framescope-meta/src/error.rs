use thiserror::Error;

pub type MetaResult<T> = Result<T, MetaError>;

/// Errors raised by the encoding side of the codec.
///
/// Decoding never fails: problems found in third-party documents are
/// reported through [`crate::card::DebugReport`] instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetaError {
    #[error("Too many buttons: found {found}, a frame supports at most {max}")]
    TooManyButtons { found: usize, max: usize },

    #[error("Invalid button index {index}: expected a value from 1 to 4")]
    InvalidButtonIndex { index: u32 },

    #[error("Invalid button action '{value}': expected 'post' or 'post_redirect'")]
    InvalidButtonAction { value: String },

    #[error("Invalid frame version '{value}'")]
    InvalidVersion { value: String },

    #[error("Frame URL must not be empty")]
    EmptyUrl,
}
