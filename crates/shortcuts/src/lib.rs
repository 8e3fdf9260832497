//! # Omnibox Shortcuts
//!
//! Shortcut persistence for the Omnibox suggestion pipeline.
//!
//! A shortcut is a previously chosen suggestion, remembered so it can be
//! resurfaced for similar future queries. Shortcuts are an optimization, not
//! a correctness requirement: callers treat a failing store as "no shortcuts
//! for this query" and degrade gracefully.
//!
//! ```text
//! report_click(cursor, position)
//!     │
//!     └──> click log keyed by (source, shortcut id)
//!              │
//!              └──> shortcuts_for_query(prefix) → cursor ordered by
//!                   click count, then recency
//! ```

mod error;
mod memory;
mod repository;

pub use error::{Result, ShortcutError};
pub use memory::InMemoryShortcutRepository;
pub use repository::ShortcutRepository;
