use crate::promoter::Promoter;
use omnibox_suggestion::{CorpusResult, ListSuggestionCursor, SuggestionCursor};

/// How many suggestions a top-ranked corpus contributes before the next
/// corpus gets a turn. Overridable through
/// [`RankAwarePromoter::with_stripe`].
pub const DEFAULT_CORPUS_STRIPE: usize = 2;

/// Gives preference to suggestions from higher-ranking corpora.
///
/// Results are consumed in corpus rank order. The top-ranked default
/// corpora (at most `max_promoted_corpora` of them) fill the visible band
/// above the keyboard round-robin, one stripe each; the remaining budget is
/// spread evenly over the lower-ranked corpora; top-up passes consume
/// whatever is left. Output is deterministic for identical inputs.
pub struct RankAwarePromoter {
    slots_above_keyboard: usize,
    max_promoted_corpora: usize,
    corpus_stripe: usize,
}

impl RankAwarePromoter {
    pub fn new(slots_above_keyboard: usize, max_promoted_corpora: usize) -> Self {
        Self::with_stripe(slots_above_keyboard, max_promoted_corpora, DEFAULT_CORPUS_STRIPE)
    }

    pub fn with_stripe(
        slots_above_keyboard: usize,
        max_promoted_corpora: usize,
        corpus_stripe: usize,
    ) -> Self {
        Self {
            slots_above_keyboard,
            max_promoted_corpora,
            corpus_stripe: corpus_stripe.max(1),
        }
    }
}

/// Read position into one corpus result during promotion. Cursors are never
/// repositioned; lanes are index-based views.
struct Lane<'a> {
    result: &'a CorpusResult,
    pos: usize,
}

impl Lane<'_> {
    fn exhausted(&self) -> bool {
        self.pos >= self.result.count()
    }
}

/// One pass over `lanes`, copying up to `stripe` suggestions from each into
/// `promoted`. Returns the number appended.
fn round_robin(
    lanes: &mut [Lane<'_>],
    stripe: usize,
    max_promoted: usize,
    promoted: &mut ListSuggestionCursor,
) -> usize {
    let mut appended = 0;
    for lane in lanes.iter_mut() {
        if promoted.count() >= max_promoted {
            break;
        }
        let mut taken = 0;
        while taken < stripe && !lane.exhausted() && promoted.count() < max_promoted {
            match lane.result.suggestion_at(lane.pos) {
                Ok(suggestion) => {
                    lane.pos += 1;
                    if promoted.push_arc(suggestion) {
                        taken += 1;
                        appended += 1;
                    }
                }
                Err(e) => {
                    log::warn!(
                        "skipping corpus '{}' during promotion: {e}",
                        lane.result.meta().name
                    );
                    lane.pos = lane.result.count();
                }
            }
        }
    }
    appended
}

impl Promoter for RankAwarePromoter {
    fn pick_promoted(
        &self,
        _shortcuts: Option<&ListSuggestionCursor>,
        results: &[CorpusResult],
        max_promoted: usize,
        promoted: &mut ListSuggestionCursor,
    ) {
        // Split the non-empty results into the promoted band (top-ranked
        // default corpora) and the rest.
        let mut band: Vec<Lane<'_>> = Vec::new();
        let mut rest: Vec<Lane<'_>> = Vec::new();
        for result in results {
            if result.count() == 0 {
                continue;
            }
            if result.meta().default_enabled && band.len() < self.max_promoted_corpora {
                band.push(Lane { result, pos: 0 });
            } else {
                rest.push(Lane { result, pos: 0 });
            }
        }

        // Fill the band above the keyboard: every top-ranked corpus gets one
        // stripe per pass, repeating while the visible slots are unfilled.
        if promoted.count() < max_promoted {
            let visible = self.slots_above_keyboard.min(max_promoted);
            round_robin(&mut band, self.corpus_stripe, max_promoted, promoted);
            while promoted.count() < visible {
                if round_robin(&mut band, self.corpus_stripe, max_promoted, promoted) == 0 {
                    break;
                }
            }
        }

        // Spread what is left evenly over the lower-ranked corpora.
        if promoted.count() < max_promoted && !rest.is_empty() {
            let remaining = max_promoted - promoted.count();
            let stripe = (remaining / rest.len()).max(1);
            round_robin(&mut rest, stripe, max_promoted, promoted);
        }

        // Top-up passes consume any leftover budget.
        while promoted.count() < max_promoted {
            let appended = round_robin(&mut band, max_promoted, max_promoted, promoted)
                + round_robin(&mut rest, max_promoted, max_promoted, promoted);
            if appended == 0 {
                break;
            }
        }
    }
}
