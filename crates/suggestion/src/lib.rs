//! # Omnibox Suggestion
//!
//! Leaf data model for the Omnibox suggestion pipeline.
//!
//! ## Architecture
//!
//! ```text
//! Corpus (trait)
//!     │
//!     ├──> suggest(query, max_results) → CorpusResult
//!     │                                      │
//!     │                                      └─> ListSuggestionCursor
//!     │                                            └─> Arc<Suggestion> entries
//!     │
//!     └──> registered in CorporaRegistry (explicitly owned, never ambient)
//! ```
//!
//! A [`SuggestionCursor`] is an ordered, seekable, closable view over the
//! suggestions produced for one user query. [`ListSuggestionCursor`] is the
//! in-memory implementation that promotion strategies append to; entries are
//! reference-counted so views never copy suggestion records.

mod corpus;
mod cursor;
mod error;
mod list;
mod suggestion;

pub use corpus::{Corpus, CorpusMeta, CorpusResult, CorporaRegistry};
pub use cursor::SuggestionCursor;
pub use error::{Result, SuggestionError};
pub use list::ListSuggestionCursor;
pub use suggestion::{SourceId, Suggestion};
