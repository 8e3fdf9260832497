use crate::error::{ProviderError, Result};
use omnibox_promote::Promoter;
use omnibox_suggestion::{CorpusMeta, CorpusResult, ListSuggestionCursor, SuggestionCursor};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;

/// All per-corpus results reported for one query, and the promoted view
/// derived from them.
///
/// Created per query, merged into by the publish loop as corpus tasks
/// complete, closed when superseded by a newer query or when the consumer is
/// done. Handles are cheap clones of one shared aggregate. Once closed, a
/// `Suggestions` never accepts another merge and never notifies again.
#[derive(Clone)]
pub struct Suggestions {
    inner: Arc<Inner>,
}

struct Inner {
    query: String,
    max_promoted: usize,
    promoter: Arc<dyn Promoter>,
    /// The corpora expected to report, in rank order.
    expected_corpora: Vec<CorpusMeta>,
    state: Mutex<State>,
    revision_tx: watch::Sender<u64>,
}

struct State {
    shortcuts: Option<ListSuggestionCursor>,
    /// Reported results, kept in corpus rank order regardless of arrival
    /// order so promotion is deterministic.
    results: Vec<CorpusResult>,
    promoted: ListSuggestionCursor,
    revision: u64,
    closed: bool,
}

impl Suggestions {
    pub(crate) fn new(
        promoter: Arc<dyn Promoter>,
        max_promoted: usize,
        query: impl Into<String>,
        expected_corpora: Vec<CorpusMeta>,
    ) -> Self {
        let query = query.into();
        let (revision_tx, _) = watch::channel(0);
        log::debug!(
            "new Suggestions for '{query}', expecting {} corpora",
            expected_corpora.len()
        );
        let state = State {
            shortcuts: None,
            results: Vec::new(),
            promoted: ListSuggestionCursor::deduping(&query),
            revision: 0,
            closed: false,
        };
        Self {
            inner: Arc::new(Inner {
                query,
                max_promoted,
                promoter,
                expected_corpora,
                state: Mutex::new(state),
                revision_tx,
            }),
        }
    }

    pub fn query(&self) -> &str {
        &self.inner.query
    }

    /// How many corpora were asked.
    pub fn expected_result_count(&self) -> usize {
        self.inner.expected_corpora.len()
    }

    /// How many corpora have replied so far.
    pub fn result_count(&self) -> Result<usize> {
        let state = self.lock();
        if state.closed {
            return Err(ProviderError::Closed);
        }
        Ok(state.results.len())
    }

    /// True once every expected corpus has reported.
    pub fn is_done(&self) -> bool {
        let state = self.lock();
        state.results.len() >= self.inner.expected_corpora.len()
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Snapshot of the current promoted view.
    pub fn promoted(&self) -> Result<ListSuggestionCursor> {
        let state = self.lock();
        if state.closed {
            return Err(ProviderError::Closed);
        }
        Ok(state.promoted.clone())
    }

    /// Observer handle: the value increments every time the promoted view is
    /// republished. Consumers must not block between reads.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.revision_tx.subscribe()
    }

    /// Releases all held cursors. Idempotent; a closed `Suggestions`
    /// discards any result that arrives later.
    pub fn close(&self) {
        let mut state = self.lock();
        if state.closed {
            return;
        }
        log::debug!("closing Suggestions for '{}'", self.inner.query);
        state.closed = true;
        if let Some(shortcuts) = state.shortcuts.as_mut() {
            shortcuts.close();
        }
        for result in state.results.iter_mut() {
            result.close();
        }
        state.results.clear();
        state.promoted.close();
    }

    /// Merges a corpus result. Publish-loop only. A result tagged with the
    /// wrong query counts as empty so the query still completes.
    pub(crate) fn add_corpus_result(&self, result: CorpusResult) {
        let mut state = self.lock();
        if state.closed {
            let mut result = result;
            result.close();
            log::debug!("discarding late result from '{}'", result.meta().name);
            return;
        }
        let result = if result.user_query() == self.inner.query {
            result
        } else {
            log::warn!(
                "corpus '{}' reported for '{}' instead of '{}', counting it as empty",
                result.meta().name,
                result.user_query(),
                self.inner.query
            );
            let mut stale = result;
            stale.close();
            CorpusResult::empty(stale.meta().clone(), &self.inner.query)
        };
        log::debug!(
            "corpus '{}' reported {} suggestions for '{}'",
            result.meta().name,
            result.count(),
            self.inner.query
        );

        // Insert at the corpus's rank position, not at the arrival position.
        let rank = self.rank_of(result.meta());
        let at = state
            .results
            .iter()
            .take_while(|r| self.rank_of(r.meta()) <= rank)
            .count();
        state.results.insert(at, result);

        self.republish(&mut state);
    }

    /// Sets the shortcut cursor. Publish-loop only.
    pub(crate) fn set_shortcuts(&self, shortcuts: ListSuggestionCursor) {
        let mut state = self.lock();
        if state.closed {
            let mut shortcuts = shortcuts;
            shortcuts.close();
            return;
        }
        state.shortcuts = Some(shortcuts);
        self.republish(&mut state);
    }

    fn republish(&self, state: &mut State) {
        let mut promoted = ListSuggestionCursor::deduping(&self.inner.query);
        self.inner.promoter.pick_promoted(
            state.shortcuts.as_ref(),
            &state.results,
            self.inner.max_promoted,
            &mut promoted,
        );
        state.promoted = promoted;
        state.revision += 1;
        self.inner.revision_tx.send_replace(state.revision);
    }

    fn rank_of(&self, meta: &CorpusMeta) -> usize {
        self.inner
            .expected_corpora
            .iter()
            .position(|expected| expected.name == meta.name)
            .unwrap_or(usize::MAX)
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.inner.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if !state.closed && !self.expected_corpora.is_empty() {
            log::warn!("Suggestions for '{}' dropped without close()", self.query);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use omnibox_promote::ConcatPromoter;
    use omnibox_suggestion::{SourceId, Suggestion};
    use pretty_assertions::assert_eq;

    fn corpus_result(name: &str, query: &str, texts: &[&str]) -> CorpusResult {
        let suggestions = texts
            .iter()
            .map(|t| Suggestion::new(SourceId::new(name), *t));
        CorpusResult::new(
            CorpusMeta::new(name),
            ListSuggestionCursor::from_suggestions(query, suggestions),
            true,
        )
    }

    fn suggestions_for(query: &str, corpora: &[&str]) -> Suggestions {
        Suggestions::new(
            Arc::new(ConcatPromoter),
            8,
            query,
            corpora.iter().map(|name| CorpusMeta::new(*name)).collect(),
        )
    }

    fn promoted_texts(suggestions: &Suggestions) -> Vec<String> {
        suggestions
            .promoted()
            .unwrap()
            .iter()
            .map(|s| s.text1.clone())
            .collect()
    }

    #[test]
    fn results_land_in_rank_order_not_arrival_order() {
        let suggestions = suggestions_for("a", &["apps", "contacts"]);
        suggestions.add_corpus_result(corpus_result("contacts", "a", &["alice"]));
        suggestions.add_corpus_result(corpus_result("apps", "a", &["calendar"]));

        assert!(suggestions.is_done());
        assert_eq!(promoted_texts(&suggestions), ["calendar", "alice"]);
    }

    #[test]
    fn unexpected_corpus_sorts_last() {
        let suggestions = suggestions_for("a", &["apps"]);
        suggestions.add_corpus_result(corpus_result("stranger", "a", &["s"]));
        suggestions.add_corpus_result(corpus_result("apps", "a", &["calendar"]));

        assert_eq!(promoted_texts(&suggestions), ["calendar", "s"]);
    }

    #[test]
    fn mismatched_query_counts_as_an_empty_result() {
        let suggestions = suggestions_for("a", &["apps"]);
        suggestions.add_corpus_result(corpus_result("apps", "stale", &["x"]));

        // The mis-tagged payload is dropped, but the corpus still counts
        // toward completion.
        assert!(suggestions.is_done());
        assert_eq!(suggestions.result_count().unwrap(), 1);
        assert!(promoted_texts(&suggestions).is_empty());
    }

    #[test]
    fn late_result_after_close_is_discarded_without_notifying() {
        let suggestions = suggestions_for("a", &["apps"]);
        let rx = suggestions.subscribe();
        suggestions.close();

        suggestions.add_corpus_result(corpus_result("apps", "a", &["calendar"]));
        assert_eq!(*rx.borrow(), 0);
        assert_eq!(suggestions.promoted().unwrap_err(), ProviderError::Closed);
    }

    #[test]
    fn every_merge_bumps_the_revision() {
        let suggestions = suggestions_for("a", &["apps", "contacts"]);
        let rx = suggestions.subscribe();

        suggestions.add_corpus_result(corpus_result("apps", "a", &[]));
        assert_eq!(*rx.borrow(), 1);

        suggestions.set_shortcuts(ListSuggestionCursor::new("a"));
        assert_eq!(*rx.borrow(), 2);
    }
}
