use thiserror::Error;

pub type Result<T> = std::result::Result<T, SuggestionError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SuggestionError {
    #[error("cursor position {position} out of range [0, {count})")]
    PositionOutOfRange { position: usize, count: usize },

    #[error("operation on a closed cursor")]
    CursorClosed,

    #[error("corpus '{corpus}' failed: {message}")]
    CorpusFailed { corpus: String, message: String },
}
