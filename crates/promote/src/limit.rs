use crate::promoter::Promoter;
use omnibox_suggestion::{CorpusResult, ListSuggestionCursor, SuggestionCursor};
use std::collections::HashMap;
use std::sync::Arc;

/// Caps how many shortcuts any single source may contribute, with separate
/// caps for web and non-web sources, then delegates the filtered shortcut
/// cursor to an inner promoter. Excess shortcuts from an over-limit source
/// are dropped, not deferred.
pub struct ShortcutLimitingPromoter {
    max_shortcuts_per_web_source: usize,
    max_shortcuts_per_non_web_source: usize,
    next: Arc<dyn Promoter>,
}

impl ShortcutLimitingPromoter {
    pub fn new(
        max_shortcuts_per_web_source: usize,
        max_shortcuts_per_non_web_source: usize,
        next: Arc<dyn Promoter>,
    ) -> Self {
        Self {
            max_shortcuts_per_web_source,
            max_shortcuts_per_non_web_source,
            next,
        }
    }

    fn filter(&self, shortcuts: &ListSuggestionCursor) -> ListSuggestionCursor {
        let mut per_source: HashMap<String, usize> = HashMap::new();
        let mut filtered = ListSuggestionCursor::new(shortcuts.user_query());
        for suggestion in shortcuts.iter() {
            let cap = if suggestion.source.web {
                self.max_shortcuts_per_web_source
            } else {
                self.max_shortcuts_per_non_web_source
            };
            let taken = per_source
                .entry(suggestion.source.name.clone())
                .or_insert(0);
            if *taken < cap {
                *taken += 1;
                filtered.push_arc(Arc::clone(suggestion));
            } else {
                log::debug!(
                    "dropping shortcut '{}' from '{}' (per-source cap {cap})",
                    suggestion.text1,
                    suggestion.source.name
                );
            }
        }
        filtered
    }
}

impl Promoter for ShortcutLimitingPromoter {
    fn pick_promoted(
        &self,
        shortcuts: Option<&ListSuggestionCursor>,
        results: &[CorpusResult],
        max_promoted: usize,
        promoted: &mut ListSuggestionCursor,
    ) {
        let filtered = shortcuts.map(|shortcuts| self.filter(shortcuts));
        self.next
            .pick_promoted(filtered.as_ref(), results, max_promoted, promoted);
    }
}
