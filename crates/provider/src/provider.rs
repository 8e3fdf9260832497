use crate::config::ProviderConfig;
use crate::executor::NamedTaskExecutor;
use crate::suggestions::Suggestions;
use omnibox_promote::{CorpusRanker, Promoter};
use omnibox_shortcuts::ShortcutRepository;
use omnibox_suggestion::{Corpus, CorpusMeta, CorpusResult, ListSuggestionCursor};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// What a worker task hands to the publish loop.
enum TaskOutcome {
    Corpus(CorpusResult),
    Shortcuts(ListSuggestionCursor),
}

struct Publication {
    suggestions: Suggestions,
    outcome: TaskOutcome,
}

/// Suggestions provider.
///
/// Handles a single query at a time: a new query closes and supersedes the
/// old one. All merging and promotion happens on one publish loop, so
/// `Suggestions` state needs no coordination beyond the channel handoff.
pub struct SuggestionsProvider {
    config: ProviderConfig,
    executor: Arc<dyn NamedTaskExecutor>,
    ranker: Arc<dyn CorpusRanker>,
    shortcuts: Option<Arc<dyn ShortcutRepository>>,
    all_promoter: Arc<dyn Promoter>,
    single_corpus_promoter: Arc<dyn Promoter>,
    publish_tx: mpsc::UnboundedSender<Publication>,
    publish_loop: Mutex<Option<JoinHandle<()>>>,
    current: Mutex<Option<Suggestions>>,
}

impl SuggestionsProvider {
    /// Starts the publish loop on the current tokio runtime.
    pub fn new(
        config: ProviderConfig,
        executor: Arc<dyn NamedTaskExecutor>,
        ranker: Arc<dyn CorpusRanker>,
        shortcuts: Option<Arc<dyn ShortcutRepository>>,
    ) -> Self {
        let (publish_tx, publish_rx) = mpsc::unbounded_channel();
        let publish_loop = tokio::spawn(Self::publish_loop(publish_rx));
        let all_promoter = config.all_corpora_promoter();
        let single_corpus_promoter = config.single_corpus_promoter();
        Self {
            config,
            executor,
            ranker,
            shortcuts,
            all_promoter,
            single_corpus_promoter,
            publish_tx,
            publish_loop: Mutex::new(Some(publish_loop)),
            current: Mutex::new(None),
        }
    }

    /// Replaces the promoter used when all corpora are queried.
    pub fn with_all_promoter(mut self, promoter: Arc<dyn Promoter>) -> Self {
        self.all_promoter = promoter;
        self
    }

    /// Replaces the promoter used in single-corpus mode.
    pub fn with_single_corpus_promoter(mut self, promoter: Arc<dyn Promoter>) -> Self {
        self.single_corpus_promoter = promoter;
        self
    }

    /// Issues a query. Returns immediately with an empty, observable
    /// [`Suggestions`]; results are merged in as worker tasks complete.
    /// Any in-flight query is closed first, releasing its cursors.
    pub fn suggest(
        &self,
        query: &str,
        single_corpus: Option<Arc<dyn Corpus>>,
        max_promoted: usize,
    ) -> Suggestions {
        let corpora: Vec<Arc<dyn Corpus>> = match &single_corpus {
            Some(corpus) => vec![Arc::clone(corpus)],
            None => self.ranker.ranked_corpora(),
        };
        let metas: Vec<CorpusMeta> = corpora.iter().map(|c| c.meta().clone()).collect();
        let promoter = if single_corpus.is_some() {
            Arc::clone(&self.single_corpus_promoter)
        } else {
            Arc::clone(&self.all_promoter)
        };

        log::debug!("suggest('{query}') across {} corpora", corpora.len());
        let suggestions = Suggestions::new(promoter, max_promoted, query, metas.clone());
        {
            // Close the predecessor and install the replacement under one
            // guard; two racing calls must not both take the same
            // predecessor and leave an unclosed survivor.
            let mut current = self.lock_current();
            if let Some(old) = current.take() {
                old.close();
            }
            *current = Some(suggestions.clone());
        }

        if corpora.is_empty() {
            // Nothing to ask; the query is already complete and empty.
            return suggestions;
        }

        if let Some(repo) = &self.shortcuts {
            self.dispatch_shortcut_lookup(repo, query, metas, &suggestions);
        }

        let only_corpus = single_corpus.is_some();
        for corpus in corpora {
            self.dispatch_corpus_query(corpus, query, only_corpus, &suggestions);
        }
        suggestions
    }

    /// Cancels the in-flight query and stops the publish loop. Idempotent.
    pub fn close(&self) {
        self.cancel_current();
        if let Some(handle) = self.lock_publish_loop().take() {
            handle.abort();
        }
    }

    fn cancel_current(&self) {
        if let Some(old) = self.lock_current().take() {
            old.close();
        }
    }

    fn dispatch_shortcut_lookup(
        &self,
        repo: &Arc<dyn ShortcutRepository>,
        query: &str,
        allowed: Vec<CorpusMeta>,
        suggestions: &Suggestions,
    ) {
        let repo = Arc::clone(repo);
        let tx = self.publish_tx.clone();
        let suggestions = suggestions.clone();
        let query = query.to_string();
        self.executor.execute(
            "shortcuts",
            Box::new(move || {
                // Shortcuts are an optimization: a failing store means no
                // shortcuts, not a failed query.
                let cursor = repo
                    .shortcuts_for_query(&query, &allowed)
                    .unwrap_or_else(|e| {
                        log::warn!("shortcut lookup failed for '{query}': {e}");
                        ListSuggestionCursor::new(&query)
                    });
                let _ = tx.send(Publication {
                    suggestions,
                    outcome: TaskOutcome::Shortcuts(cursor),
                });
            }),
        );
    }

    fn dispatch_corpus_query(
        &self,
        corpus: Arc<dyn Corpus>,
        query: &str,
        only_corpus: bool,
        suggestions: &Suggestions,
    ) {
        let tx = self.publish_tx.clone();
        let suggestions = suggestions.clone();
        let query = query.to_string();
        let max_results = self.config.max_results_per_corpus;
        let name = corpus.meta().name.clone();
        self.executor.execute(
            &name,
            Box::new(move || {
                // A failing corpus still reports (empty), so the query
                // always reaches the complete state.
                let result = corpus
                    .suggest(&query, max_results, only_corpus)
                    .unwrap_or_else(|e| {
                        log::warn!("corpus query failed: {e}");
                        CorpusResult::empty(corpus.meta().clone(), &query)
                    });
                let _ = tx.send(Publication {
                    suggestions,
                    outcome: TaskOutcome::Corpus(result),
                });
            }),
        );
    }

    /// Single consumer of worker outcomes; the only place `Suggestions`
    /// state is mutated.
    async fn publish_loop(mut rx: mpsc::UnboundedReceiver<Publication>) {
        while let Some(Publication {
            suggestions,
            outcome,
        }) = rx.recv().await
        {
            match outcome {
                TaskOutcome::Corpus(result) => suggestions.add_corpus_result(result),
                TaskOutcome::Shortcuts(cursor) => suggestions.set_shortcuts(cursor),
            }
        }
        log::debug!("publish loop stopped");
    }

    fn lock_current(&self) -> std::sync::MutexGuard<'_, Option<Suggestions>> {
        self.current.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_publish_loop(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.publish_loop.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for SuggestionsProvider {
    fn drop(&mut self) {
        self.close();
    }
}
