use crate::error::Result;
use omnibox_suggestion::{CorpusMeta, ListSuggestionCursor, SourceId, Suggestion};
use std::collections::HashMap;

/// Store of previously chosen suggestions, keyed by the query they were
/// chosen under.
///
/// Calls may block (a real store sits on disk or a database); the provider
/// runs lookups on worker tasks. Individual operations are atomic at the
/// store level.
pub trait ShortcutRepository: Send + Sync {
    /// Shortcuts whose originating query starts with `query`, restricted to
    /// `allowed_corpora`, de-duplicated by (source, shortcut id) and ordered
    /// by click count, then recency. Returned suggestions are marked
    /// [`is_shortcut`](Suggestion::is_shortcut).
    fn shortcuts_for_query(
        &self,
        query: &str,
        allowed_corpora: &[CorpusMeta],
    ) -> Result<ListSuggestionCursor>;

    /// Records a click on the suggestion at `position`. Suggestions without
    /// a shortcut id are not shortcuttable and are silently skipped.
    fn report_click(&self, cursor: &ListSuggestionCursor, position: usize) -> Result<()>;

    /// Replaces the stored record for a shortcut with a refreshed version,
    /// or removes it when the source reports the shortcut no longer exists
    /// (`refreshed` is `None`).
    fn update_shortcut(
        &self,
        source: &SourceId,
        shortcut_id: &str,
        refreshed: Option<Suggestion>,
    ) -> Result<()>;

    /// Forgets everything.
    fn clear_history(&self) -> Result<()>;

    /// Total click count per source name, for click-score corpus ranking.
    fn source_click_counts(&self) -> Result<HashMap<String, u64>>;
}
