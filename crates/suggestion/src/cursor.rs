use crate::error::Result;
use crate::suggestion::Suggestion;
use std::sync::Arc;

/// An ordered, randomly-seekable, closable sequence of suggestions for one
/// user query.
///
/// The contract mirrors a database cursor: `move_to` repositions the read
/// position and must stay within `[0, count)`, accessors read at the current
/// position, and `close` releases underlying resources. `close` is
/// idempotent; every other operation on a closed cursor fails with
/// [`SuggestionError::CursorClosed`](crate::SuggestionError::CursorClosed).
pub trait SuggestionCursor {
    /// The query the user typed to produce this cursor. All suggestions in
    /// one cursor share this originating query.
    fn user_query(&self) -> &str;

    /// Number of suggestions in the cursor.
    fn count(&self) -> usize;

    /// Current read position. Starts at 0.
    fn position(&self) -> usize;

    /// Repositions the cursor. Fails fast on out-of-range positions; the
    /// position is never silently clamped.
    fn move_to(&mut self, position: usize) -> Result<()>;

    /// Advances by one. Returns false (without moving) at the last position
    /// or on a closed cursor.
    fn move_to_next(&mut self) -> bool;

    /// The suggestion at the current position.
    fn current(&self) -> Result<Arc<Suggestion>>;

    /// Random access without moving the cursor.
    fn suggestion_at(&self, position: usize) -> Result<Arc<Suggestion>>;

    /// Releases underlying resources. Safe to call more than once.
    fn close(&mut self);

    fn is_closed(&self) -> bool;
}
