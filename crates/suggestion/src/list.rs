use crate::cursor::SuggestionCursor;
use crate::error::{Result, SuggestionError};
use crate::suggestion::Suggestion;
use std::collections::HashSet;
use std::sync::Arc;

/// Mutable, appendable, in-memory suggestion cursor.
///
/// Built incrementally by promotion strategies, then handed out as a
/// read-only view. Entries are reference-counted, so copying a suggestion
/// from one cursor to another clones an `Arc`, not the record.
#[derive(Debug, Clone)]
pub struct ListSuggestionCursor {
    query: String,
    entries: Vec<Arc<Suggestion>>,
    position: usize,
    closed: bool,
    /// (source name, shortcut id) pairs already present, when de-duplication
    /// is on.
    seen: Option<HashSet<(String, String)>>,
}

impl ListSuggestionCursor {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            entries: Vec::new(),
            position: 0,
            closed: false,
            seen: None,
        }
    }

    /// A cursor that rejects a second entry with the same
    /// (source, shortcut id) pair. Entries without a shortcut id are never
    /// considered duplicates.
    pub fn deduping(query: impl Into<String>) -> Self {
        Self {
            seen: Some(HashSet::new()),
            ..Self::new(query)
        }
    }

    pub fn from_suggestions<I>(query: impl Into<String>, suggestions: I) -> Self
    where
        I: IntoIterator<Item = Suggestion>,
    {
        let mut cursor = Self::new(query);
        for suggestion in suggestions {
            cursor.push(suggestion);
        }
        cursor
    }

    /// Appends a suggestion. Returns false if the cursor is closed or the
    /// entry was rejected as a duplicate.
    pub fn push(&mut self, suggestion: Suggestion) -> bool {
        self.push_arc(Arc::new(suggestion))
    }

    pub fn push_arc(&mut self, suggestion: Arc<Suggestion>) -> bool {
        if self.closed {
            log::debug!("push on closed cursor for query '{}'", self.query);
            return false;
        }
        if let Some(seen) = self.seen.as_mut() {
            if let Some((source, id)) = suggestion.dedup_key() {
                if !seen.insert((source.to_string(), id.to_string())) {
                    log::debug!("dropping duplicate suggestion {source}:{id}");
                    return false;
                }
            }
        }
        self.entries.push(suggestion);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Suggestion>> {
        self.entries.iter()
    }
}

impl SuggestionCursor for ListSuggestionCursor {
    fn user_query(&self) -> &str {
        &self.query
    }

    fn count(&self) -> usize {
        self.entries.len()
    }

    fn position(&self) -> usize {
        self.position
    }

    fn move_to(&mut self, position: usize) -> Result<()> {
        if self.closed {
            return Err(SuggestionError::CursorClosed);
        }
        if position >= self.entries.len() {
            return Err(SuggestionError::PositionOutOfRange {
                position,
                count: self.entries.len(),
            });
        }
        self.position = position;
        Ok(())
    }

    fn move_to_next(&mut self) -> bool {
        if self.closed || self.position + 1 >= self.entries.len() {
            return false;
        }
        self.position += 1;
        true
    }

    fn current(&self) -> Result<Arc<Suggestion>> {
        self.suggestion_at(self.position)
    }

    fn suggestion_at(&self, position: usize) -> Result<Arc<Suggestion>> {
        if self.closed {
            return Err(SuggestionError::CursorClosed);
        }
        self.entries
            .get(position)
            .cloned()
            .ok_or(SuggestionError::PositionOutOfRange {
                position,
                count: self.entries.len(),
            })
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.entries.clear();
            self.position = 0;
        }
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggestion::SourceId;

    fn suggestion(source: &str, text: &str) -> Suggestion {
        Suggestion::new(SourceId::new(source), text)
    }

    #[test]
    fn starts_empty_at_position_zero() {
        let cursor = ListSuggestionCursor::new("foo");
        assert_eq!(cursor.count(), 0);
        assert_eq!(cursor.position(), 0);
        assert_eq!(
            cursor.current(),
            Err(SuggestionError::PositionOutOfRange {
                position: 0,
                count: 0
            })
        );
    }

    #[test]
    fn move_to_within_bounds() {
        let mut cursor =
            ListSuggestionCursor::from_suggestions("foo", vec![
                suggestion("s", "a"),
                suggestion("s", "b"),
            ]);
        cursor.move_to(1).unwrap();
        assert_eq!(cursor.current().unwrap().text1, "b");
        assert_eq!(
            cursor.move_to(2),
            Err(SuggestionError::PositionOutOfRange {
                position: 2,
                count: 2
            })
        );
        // A failed move never repositions the cursor.
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn move_to_next_stops_at_end() {
        let mut cursor =
            ListSuggestionCursor::from_suggestions("foo", vec![
                suggestion("s", "a"),
                suggestion("s", "b"),
            ]);
        assert!(cursor.move_to_next());
        assert!(!cursor.move_to_next());
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn close_is_idempotent_and_fails_later_reads() {
        let mut cursor =
            ListSuggestionCursor::from_suggestions("foo", vec![suggestion("s", "a")]);
        cursor.close();
        cursor.close();
        assert!(cursor.is_closed());
        assert_eq!(cursor.current(), Err(SuggestionError::CursorClosed));
        assert_eq!(cursor.move_to(0), Err(SuggestionError::CursorClosed));
        assert!(!cursor.push(suggestion("s", "b")));
    }

    #[test]
    fn deduping_rejects_repeated_shortcut_key() {
        let mut cursor = ListSuggestionCursor::deduping("foo");
        assert!(cursor.push(suggestion("s1", "a").shortcut_id("x")));
        assert!(!cursor.push(suggestion("s1", "a again").shortcut_id("x")));
        assert!(cursor.push(suggestion("s2", "a").shortcut_id("x")));
        assert_eq!(cursor.count(), 2);
    }

    #[test]
    fn deduping_keeps_entries_without_shortcut_id() {
        let mut cursor = ListSuggestionCursor::deduping("foo");
        assert!(cursor.push(suggestion("s1", "a")));
        assert!(cursor.push(suggestion("s1", "a")));
        assert_eq!(cursor.count(), 2);
    }
}
