use omnibox_shortcuts::ShortcutRepository;
use omnibox_suggestion::{CorporaRegistry, Corpus};
use std::collections::HashMap;
use std::sync::Arc;

/// Orders corpora by priority for a query context.
///
/// Implementations re-read the registry on every call so additions and
/// removals since the last call are reflected; the order is total and
/// deterministic for a fixed corpus set.
pub trait CorpusRanker: Send + Sync {
    fn ranked_corpora(&self) -> Vec<Arc<dyn Corpus>>;
}

/// Enabled corpora ordered by name. The simplest deterministic ranker,
/// useful in tests and as the tie-break baseline.
pub struct LexicographicCorpusRanker {
    registry: Arc<CorporaRegistry>,
}

impl LexicographicCorpusRanker {
    pub fn new(registry: Arc<CorporaRegistry>) -> Self {
        Self { registry }
    }
}

impl CorpusRanker for LexicographicCorpusRanker {
    fn ranked_corpora(&self) -> Vec<Arc<dyn Corpus>> {
        // The registry hands corpora out in name order already.
        self.registry.enabled_corpora()
    }
}

/// Ranks web corpora first, then by total shortcut clicks descending, with
/// the name as the final tie-break. A failing shortcut store degrades to
/// all-zero scores rather than failing the ranking.
pub struct ClickScoreCorpusRanker {
    registry: Arc<CorporaRegistry>,
    shortcuts: Arc<dyn ShortcutRepository>,
}

impl ClickScoreCorpusRanker {
    pub fn new(registry: Arc<CorporaRegistry>, shortcuts: Arc<dyn ShortcutRepository>) -> Self {
        Self {
            registry,
            shortcuts,
        }
    }
}

impl CorpusRanker for ClickScoreCorpusRanker {
    fn ranked_corpora(&self) -> Vec<Arc<dyn Corpus>> {
        let scores: HashMap<String, u64> = match self.shortcuts.source_click_counts() {
            Ok(scores) => scores,
            Err(e) => {
                log::warn!("shortcut store unavailable for ranking, using zero scores: {e}");
                HashMap::new()
            }
        };
        let mut corpora = self.registry.enabled_corpora();
        corpora.sort_by(|a, b| {
            let (a, b) = (a.meta(), b.meta());
            b.web
                .cmp(&a.web)
                .then_with(|| {
                    let score_a = scores.get(&a.name).copied().unwrap_or(0);
                    let score_b = scores.get(&b.name).copied().unwrap_or(0);
                    score_b.cmp(&score_a)
                })
                .then_with(|| a.name.cmp(&b.name))
        });
        corpora
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use omnibox_shortcuts::InMemoryShortcutRepository;
    use omnibox_suggestion::{
        CorpusMeta, CorpusResult, ListSuggestionCursor, Result, SourceId, Suggestion,
    };

    struct StubCorpus {
        meta: CorpusMeta,
    }

    impl StubCorpus {
        fn register(registry: &CorporaRegistry, meta: CorpusMeta) {
            registry.register(Arc::new(Self { meta }));
        }
    }

    impl Corpus for StubCorpus {
        fn meta(&self) -> &CorpusMeta {
            &self.meta
        }

        fn suggest(
            &self,
            query: &str,
            _max_results: usize,
            _only_corpus: bool,
        ) -> Result<CorpusResult> {
            Ok(CorpusResult::empty(self.meta.clone(), query))
        }
    }

    fn names(corpora: &[Arc<dyn Corpus>]) -> Vec<String> {
        corpora.iter().map(|c| c.meta().name.clone()).collect()
    }

    #[test]
    fn lexicographic_order_follows_registry() {
        let registry = Arc::new(CorporaRegistry::new());
        StubCorpus::register(&registry, CorpusMeta::new("contacts"));
        StubCorpus::register(&registry, CorpusMeta::new("apps"));

        let ranker = LexicographicCorpusRanker::new(Arc::clone(&registry));
        assert_eq!(names(&ranker.ranked_corpora()), ["apps", "contacts"]);

        // No caching across registry mutation.
        registry.remove("apps");
        assert_eq!(names(&ranker.ranked_corpora()), ["contacts"]);
    }

    #[test]
    fn click_scores_order_non_web_corpora() {
        let registry = Arc::new(CorporaRegistry::new());
        StubCorpus::register(&registry, CorpusMeta::new("apps"));
        StubCorpus::register(&registry, CorpusMeta::new("contacts"));
        StubCorpus::register(&registry, CorpusMeta::new("websearch").web(true));

        let repo = Arc::new(InMemoryShortcutRepository::new());
        let clicked = ListSuggestionCursor::from_suggestions("foo", vec![Suggestion::new(
            SourceId::new("contacts"),
            "alice",
        )
        .shortcut_id("c1")]);
        repo.report_click(&clicked, 0).unwrap();

        let ranker = ClickScoreCorpusRanker::new(registry, repo);
        // Web first, then clicked corpora, then the rest by name.
        assert_eq!(
            names(&ranker.ranked_corpora()),
            ["websearch", "contacts", "apps"]
        );
    }
}
