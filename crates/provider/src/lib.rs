//! # Omnibox Provider
//!
//! Asynchronous orchestration of the suggestion pipeline.
//!
//! ## Control flow
//!
//! ```text
//! suggest(query)
//!     │
//!     ├──> CorpusRanker → ordered corpora
//!     │
//!     ├──> one worker task per corpus + one shortcut lookup
//!     │        │ (NamedTaskExecutor, blocking I/O allowed)
//!     │        │
//!     │        └──> unbounded channel ──> publish loop (single consumer)
//!     │                                       │
//!     │                                       ├─> closed? discard late result
//!     │                                       ├─> merge into Suggestions
//!     │                                       ├─> Promoter recomputes view
//!     │                                       └─> revision watch notifies
//!     │
//!     └──> returns Suggestions immediately (expected count set, zero results)
//! ```
//!
//! The provider handles a single query at a time. Issuing a new query closes
//! the superseded [`Suggestions`], which releases its cursors and makes the
//! publish loop drop any result that arrives late (last-check-wins
//! cancellation, never thread interruption).

mod config;
mod error;
mod executor;
mod provider;
mod suggestions;

pub mod testing;

pub use config::ProviderConfig;
pub use error::{ProviderError, Result};
pub use executor::{NamedTaskExecutor, SpawnBlockingExecutor};
pub use provider::SuggestionsProvider;
pub use suggestions::Suggestions;
