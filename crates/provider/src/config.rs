use omnibox_promote::{
    ConcatPromoter, Promoter, RankAwarePromoter, ShortcutLimitingPromoter, ShortcutPromoter,
    DEFAULT_CORPUS_STRIPE,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const MAX_PROMOTED_SUGGESTIONS: usize = 8;
const MAX_RESULTS_PER_CORPUS: usize = 50;
const NUM_SUGGESTIONS_ABOVE_KEYBOARD: usize = 4;
const MAX_PROMOTED_CORPORA: usize = 3;
const MAX_SHORTCUTS_PER_WEB_SOURCE: usize = MAX_PROMOTED_SUGGESTIONS;
const MAX_SHORTCUTS_PER_NON_WEB_SOURCE: usize = 2;

/// Configurable parameters of the suggestion pipeline. Every option is
/// independently overridable; the defaults match the shipped behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Upper bound on the promoted suggestion list.
    pub max_promoted_suggestions: usize,
    /// How many results to ask each corpus for.
    pub max_results_per_corpus: usize,
    /// Suggestion slots visible above the onscreen keyboard.
    pub num_suggestions_above_keyboard: usize,
    /// How many top-ranked corpora share the promoted band.
    pub max_promoted_corpora: usize,
    pub max_shortcuts_per_web_source: usize,
    pub max_shortcuts_per_non_web_source: usize,
    /// Suggestions taken from one corpus before the next gets a turn.
    pub corpus_stripe: usize,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            max_promoted_suggestions: MAX_PROMOTED_SUGGESTIONS,
            max_results_per_corpus: MAX_RESULTS_PER_CORPUS,
            num_suggestions_above_keyboard: NUM_SUGGESTIONS_ABOVE_KEYBOARD,
            max_promoted_corpora: MAX_PROMOTED_CORPORA,
            max_shortcuts_per_web_source: MAX_SHORTCUTS_PER_WEB_SOURCE,
            max_shortcuts_per_non_web_source: MAX_SHORTCUTS_PER_NON_WEB_SOURCE,
            corpus_stripe: DEFAULT_CORPUS_STRIPE,
        }
    }
}

impl ProviderConfig {
    /// The promotion pipeline used when all corpora are queried:
    /// per-source shortcut caps, shortcuts first, rank-aware interleaving
    /// for the rest.
    pub fn all_corpora_promoter(&self) -> Arc<dyn Promoter> {
        Arc::new(ShortcutLimitingPromoter::new(
            self.max_shortcuts_per_web_source,
            self.max_shortcuts_per_non_web_source,
            Arc::new(ShortcutPromoter::new(Some(Arc::new(
                RankAwarePromoter::with_stripe(
                    self.num_suggestions_above_keyboard,
                    self.max_promoted_corpora,
                    self.corpus_stripe,
                ),
            )))),
        ))
    }

    /// The promotion pipeline for a search restricted to one corpus:
    /// shortcuts first, then that corpus's results in order.
    pub fn single_corpus_promoter(&self) -> Arc<dyn Promoter> {
        Arc::new(ShortcutPromoter::new(Some(Arc::new(ConcatPromoter))))
    }
}
