//! # Omnibox Promote
//!
//! Promotion strategies: how shortcut results and per-corpus results are
//! merged into one bounded, ordered, de-duplicated suggestion list.
//!
//! ## Strategy family
//!
//! ```text
//! shortcuts ─┐
//!            ├─> Promoter::pick_promoted(…, max_promoted, out)
//! results  ──┘
//!
//! ConcatPromoter            shortcuts, then corpora in rank order
//! ShortcutPromoter          shortcuts first, inner promoter fills the rest
//! ShortcutLimitingPromoter  per-source shortcut caps, then delegates
//! RankAwarePromoter         round-robin stripes across top-ranked corpora
//! ```
//!
//! Strategies compose: the production all-corpora pipeline is
//! `ShortcutLimitingPromoter(ShortcutPromoter(RankAwarePromoter))`, while a
//! single-corpus search uses `ShortcutPromoter(ConcatPromoter)`.
//!
//! [`CorpusRanker`] supplies the corpus order the strategies rely on.

mod concat;
mod limit;
mod promoter;
mod rank_aware;
mod ranker;
mod shortcut;

pub use concat::ConcatPromoter;
pub use limit::ShortcutLimitingPromoter;
pub use promoter::Promoter;
pub use rank_aware::{RankAwarePromoter, DEFAULT_CORPUS_STRIPE};
pub use ranker::{ClickScoreCorpusRanker, CorpusRanker, LexicographicCorpusRanker};
pub use shortcut::ShortcutPromoter;
