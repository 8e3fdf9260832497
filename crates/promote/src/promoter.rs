use omnibox_suggestion::{CorpusResult, ListSuggestionCursor, SuggestionCursor};

/// A promotion strategy.
///
/// Consumes the shortcut cursor and the per-corpus results (in corpus rank
/// order) and appends the selected suggestions to `promoted`, in promotion
/// priority order. `max_promoted` caps the total size of `promoted`, so a
/// strategy invoked on a partially filled cursor only sees the remaining
/// budget. Strategies never fail: missing shortcuts or empty results just
/// produce less output.
pub trait Promoter: Send + Sync {
    fn pick_promoted(
        &self,
        shortcuts: Option<&ListSuggestionCursor>,
        results: &[CorpusResult],
        max_promoted: usize,
        promoted: &mut ListSuggestionCursor,
    );
}

/// Copies suggestions from `cursor` into `promoted` until the budget is
/// reached or the cursor is exhausted. Returns the number actually appended
/// (entries rejected as duplicates do not count).
pub(crate) fn append_cursor<C>(
    cursor: &C,
    promoted: &mut ListSuggestionCursor,
    max_promoted: usize,
) -> usize
where
    C: SuggestionCursor + ?Sized,
{
    let mut appended = 0;
    for position in 0..cursor.count() {
        if promoted.count() >= max_promoted {
            break;
        }
        match cursor.suggestion_at(position) {
            Ok(suggestion) => {
                if promoted.push_arc(suggestion) {
                    appended += 1;
                }
            }
            Err(e) => {
                log::warn!("stopping copy from cursor: {e}");
                break;
            }
        }
    }
    appended
}
