use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShortcutError>;

#[derive(Error, Debug)]
pub enum ShortcutError {
    #[error("suggestion error: {0}")]
    Suggestion(#[from] omnibox_suggestion::SuggestionError),
}
