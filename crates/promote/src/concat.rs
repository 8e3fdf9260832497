use crate::promoter::{append_cursor, Promoter};
use omnibox_suggestion::{CorpusResult, ListSuggestionCursor, SuggestionCursor};

/// Promotes shortcuts first, then each corpus result in rank order, with no
/// interleaving, stopping at the budget.
#[derive(Debug, Default)]
pub struct ConcatPromoter;

impl Promoter for ConcatPromoter {
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
        for result in results {
            if promoted.count() >= max_promoted {
                break;
            }
            append_cursor(result, promoted, max_promoted);
        }
    }
}
