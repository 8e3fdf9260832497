use crate::promoter::{append_cursor, Promoter};
use omnibox_suggestion::{CorpusResult, ListSuggestionCursor, SuggestionCursor};
use std::sync::Arc;

/// Promotes all shortcuts first, then hands the remaining budget to an
/// optional inner promoter for the corpus results. The inner promoter does
/// not see the shortcuts again.
pub struct ShortcutPromoter {
    next: Option<Arc<dyn Promoter>>,
}

impl ShortcutPromoter {
    pub fn new(next: Option<Arc<dyn Promoter>>) -> Self {
        Self { next }
    }
}

impl Promoter for ShortcutPromoter {
    fn pick_promoted(
        &self,
        shortcuts: Option<&ListSuggestionCursor>,
        results: &[CorpusResult],
        max_promoted: usize,
        promoted: &mut ListSuggestionCursor,
    ) {
        if let Some(shortcuts) = shortcuts {
            append_cursor(shortcuts, promoted, max_promoted);
        }
        if promoted.count() < max_promoted {
            if let Some(next) = &self.next {
                next.pick_promoted(None, results, max_promoted, promoted);
            }
        }
    }
}
