use crate::error::Result;
use crate::repository::ShortcutRepository;
use omnibox_suggestion::{
    CorpusMeta, ListSuggestionCursor, SourceId, Suggestion, SuggestionCursor,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Instant;

const DEFAULT_MAX_ENTRIES: usize = 1000;

/// In-memory, bounded click log.
///
/// Ordering is frequency first, recency second: an entry clicked often wins
/// over one clicked recently. When the log is full, the lowest-scoring entry
/// is evicted.
pub struct InMemoryShortcutRepository {
    max_entries: usize,
    entries: Mutex<HashMap<ShortcutKey, ShortcutEntry>>,
}

type ShortcutKey = (String, String);

#[derive(Debug, Clone)]
struct ShortcutEntry {
    suggestion: Suggestion,
    /// The most recent query this shortcut was clicked under.
    query: String,
    clicks: u64,
    last_click: Instant,
}

impl InMemoryShortcutRepository {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_ENTRIES)
    }

    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            max_entries: max_entries.max(1),
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<ShortcutKey, ShortcutEntry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn evict_if_full(entries: &mut HashMap<ShortcutKey, ShortcutEntry>, max_entries: usize) {
        if entries.len() < max_entries {
            return;
        }
        let weakest = entries
            .iter()
            .min_by(|(_, a), (_, b)| {
                (a.clicks, a.last_click).cmp(&(b.clicks, b.last_click))
            })
            .map(|(key, _)| key.clone());
        if let Some(key) = weakest {
            log::debug!("shortcut log full, evicting {}:{}", key.0, key.1);
            entries.remove(&key);
        }
    }
}

impl Default for InMemoryShortcutRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ShortcutRepository for InMemoryShortcutRepository {
    fn shortcuts_for_query(
        &self,
        query: &str,
        allowed_corpora: &[CorpusMeta],
    ) -> Result<ListSuggestionCursor> {
        let entries = self.lock();
        let mut matches: Vec<&ShortcutEntry> = entries
            .values()
            .filter(|entry| entry.query.starts_with(query))
            .filter(|entry| {
                allowed_corpora
                    .iter()
                    .any(|meta| meta.name == entry.suggestion.source.name)
            })
            .collect();
        // Frequency, then recency, then text as the deterministic tail.
        matches.sort_by(|a, b| {
            (b.clicks, b.last_click)
                .cmp(&(a.clicks, a.last_click))
                .then_with(|| a.suggestion.text1.cmp(&b.suggestion.text1))
        });

        let mut cursor = ListSuggestionCursor::new(query);
        for entry in matches {
            cursor.push(entry.suggestion.clone().is_shortcut(true));
        }
        log::debug!(
            "shortcuts_for_query('{query}') -> {} of {} entries",
            cursor.count(),
            entries.len()
        );
        Ok(cursor)
    }

    fn report_click(&self, cursor: &ListSuggestionCursor, position: usize) -> Result<()> {
        let suggestion = cursor.suggestion_at(position)?;
        let Some((source, id)) = suggestion.dedup_key() else {
            log::debug!("ignoring click on unshortcuttable suggestion '{}'", suggestion.text1);
            return Ok(());
        };
        let key = (source.to_string(), id.to_string());
        let query = cursor.user_query().to_string();

        let mut entries = self.lock();
        match entries.get_mut(&key) {
            Some(entry) => {
                entry.clicks += 1;
                entry.last_click = Instant::now();
                entry.query = query;
                entry.suggestion = (*suggestion).clone();
            }
            None => {
                Self::evict_if_full(&mut entries, self.max_entries);
                entries.insert(key, ShortcutEntry {
                    suggestion: (*suggestion).clone(),
                    query,
                    clicks: 1,
                    last_click: Instant::now(),
                });
            }
        }
        Ok(())
    }

    fn update_shortcut(
        &self,
        source: &SourceId,
        shortcut_id: &str,
        refreshed: Option<Suggestion>,
    ) -> Result<()> {
        let key = (source.name.clone(), shortcut_id.to_string());
        let mut entries = self.lock();
        match refreshed {
            Some(suggestion) => {
                if let Some(entry) = entries.get_mut(&key) {
                    entry.suggestion = suggestion;
                }
            }
            None => {
                // The source no longer knows this shortcut; drop it.
                entries.remove(&key);
            }
        }
        Ok(())
    }

    fn clear_history(&self) -> Result<()> {
        self.lock().clear();
        Ok(())
    }

    fn source_click_counts(&self) -> Result<HashMap<String, u64>> {
        let entries = self.lock();
        let mut counts: HashMap<String, u64> = HashMap::new();
        for entry in entries.values() {
            *counts.entry(entry.suggestion.source.name.clone()).or_default() += entry.clicks;
        }
        Ok(counts)
    }
}
