use crate::cursor::SuggestionCursor;
use crate::error::Result;
use crate::list::ListSuggestionCursor;
use crate::suggestion::Suggestion;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// Identity and flags of a corpus, carried alongside each result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusMeta {
    pub name: String,
    pub web: bool,
    /// Default corpora are always queried and share the promoted band.
    pub default_enabled: bool,
}

impl CorpusMeta {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            web: false,
            default_enabled: true,
        }
    }

    pub fn web(mut self, web: bool) -> Self {
        self.web = web;
        self
    }

    pub fn default_enabled(mut self, default_enabled: bool) -> Self {
        self.default_enabled = default_enabled;
        self
    }
}

/// A suggestion cursor scoped to exactly one corpus.
#[derive(Debug, Clone)]
pub struct CorpusResult {
    meta: CorpusMeta,
    cursor: ListSuggestionCursor,
    complete: bool,
}

impl CorpusResult {
    pub fn new(meta: CorpusMeta, cursor: ListSuggestionCursor, complete: bool) -> Self {
        Self {
            meta,
            cursor,
            complete,
        }
    }

    /// An empty result, used when a corpus fails or times out so the query
    /// state machine still completes.
    pub fn empty(meta: CorpusMeta, query: impl Into<String>) -> Self {
        Self {
            meta,
            cursor: ListSuggestionCursor::new(query),
            complete: true,
        }
    }

    pub fn meta(&self) -> &CorpusMeta {
        &self.meta
    }

    /// Whether this is the final, complete result for the query.
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}

impl SuggestionCursor for CorpusResult {
    fn user_query(&self) -> &str {
        self.cursor.user_query()
    }

    fn count(&self) -> usize {
        self.cursor.count()
    }

    fn position(&self) -> usize {
        self.cursor.position()
    }

    fn move_to(&mut self, position: usize) -> Result<()> {
        self.cursor.move_to(position)
    }

    fn move_to_next(&mut self) -> bool {
        self.cursor.move_to_next()
    }

    fn current(&self) -> Result<Arc<Suggestion>> {
        self.cursor.current()
    }

    fn suggestion_at(&self, position: usize) -> Result<Arc<Suggestion>> {
        self.cursor.suggestion_at(position)
    }

    fn close(&mut self) {
        self.cursor.close();
    }

    fn is_closed(&self) -> bool {
        self.cursor.is_closed()
    }
}

/// A named, queryable source of suggestions.
///
/// `suggest` is synchronous from the caller's point of view and may block on
/// arbitrary I/O; the provider runs each corpus on a worker task and bounds
/// nothing here. A corpus is responsible for bounding its own latency.
pub trait Corpus: Send + Sync {
    fn meta(&self) -> &CorpusMeta;

    /// Returns at most `max_results` suggestions for `query`. `only_corpus`
    /// is true when the user restricted the search to this corpus alone.
    fn suggest(&self, query: &str, max_results: usize, only_corpus: bool) -> Result<CorpusResult>;
}

/// Registry of the corpora available for querying.
///
/// Explicitly owned by the provider and shared by handle; rankers re-read it
/// on every call so additions and removals take effect immediately.
#[derive(Default)]
pub struct CorporaRegistry {
    corpora: RwLock<BTreeMap<String, Registered>>,
}

struct Registered {
    corpus: Arc<dyn Corpus>,
    enabled: bool,
}

impl CorporaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, corpus: Arc<dyn Corpus>) {
        let name = corpus.meta().name.clone();
        log::debug!("registering corpus '{name}'");
        self.write()
            .insert(name, Registered {
                corpus,
                enabled: true,
            });
    }

    /// Removes a corpus. Returns false if it was not registered.
    pub fn remove(&self, name: &str) -> bool {
        self.write().remove(name).is_some()
    }

    /// Enables or disables a corpus without unregistering it. Returns false
    /// if it was not registered.
    pub fn set_enabled(&self, name: &str, enabled: bool) -> bool {
        match self.write().get_mut(name) {
            Some(registered) => {
                registered.enabled = enabled;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Corpus>> {
        self.read().get(name).map(|r| Arc::clone(&r.corpus))
    }

    /// Enabled corpora in name order. The order is deterministic so rankers
    /// have a total tie-break to fall back on.
    pub fn enabled_corpora(&self) -> Vec<Arc<dyn Corpus>> {
        self.read()
            .values()
            .filter(|r| r.enabled)
            .map(|r| Arc::clone(&r.corpus))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<String, Registered>> {
        self.corpora.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, BTreeMap<String, Registered>> {
        self.corpora.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggestion::SourceId;

    struct FixedCorpus {
        meta: CorpusMeta,
        texts: Vec<String>,
    }

    impl FixedCorpus {
        fn new(name: &str, texts: &[&str]) -> Arc<dyn Corpus> {
            Arc::new(Self {
                meta: CorpusMeta::new(name),
                texts: texts.iter().map(|t| t.to_string()).collect(),
            })
        }
    }

    impl Corpus for FixedCorpus {
        fn meta(&self) -> &CorpusMeta {
            &self.meta
        }

        fn suggest(
            &self,
            query: &str,
            max_results: usize,
            _only_corpus: bool,
        ) -> Result<CorpusResult> {
            let suggestions = self
                .texts
                .iter()
                .take(max_results)
                .map(|t| Suggestion::new(SourceId::new(&self.meta.name), t));
            Ok(CorpusResult::new(
                self.meta.clone(),
                ListSuggestionCursor::from_suggestions(query, suggestions),
                true,
            ))
        }
    }

    #[test]
    fn registry_reflects_mutation() {
        let registry = CorporaRegistry::new();
        registry.register(FixedCorpus::new("beta", &["b"]));
        registry.register(FixedCorpus::new("alpha", &["a"]));
        let names: Vec<String> = registry
            .enabled_corpora()
            .iter()
            .map(|c| c.meta().name.clone())
            .collect();
        assert_eq!(names, ["alpha", "beta"]);

        assert!(registry.remove("alpha"));
        assert_eq!(registry.enabled_corpora().len(), 1);
        assert!(!registry.remove("alpha"));
    }

    #[test]
    fn disabled_corpus_is_skipped_but_still_registered() {
        let registry = CorporaRegistry::new();
        registry.register(FixedCorpus::new("apps", &["a"]));
        assert!(registry.set_enabled("apps", false));
        assert!(registry.enabled_corpora().is_empty());
        assert!(registry.get("apps").is_some());
    }

    #[test]
    fn corpus_result_bounds_suggestions() {
        let corpus = FixedCorpus::new("apps", &["a", "b", "c"]);
        let result = corpus.suggest("foo", 2, false).unwrap();
        assert_eq!(result.count(), 2);
        assert_eq!(result.user_query(), "foo");
        assert!(result.is_complete());
    }
}
