//! Deterministic test doubles for the orchestration layer.

use crate::executor::NamedTaskExecutor;
use omnibox_suggestion::{
    Corpus, CorpusMeta, CorpusResult, ListSuggestionCursor, Result, SourceId, Suggestion,
};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Executor that queues tasks and runs them only when stepped, so tests
/// control exactly when each corpus "completes".
#[derive(Default)]
pub struct StepExecutor {
    queue: Mutex<VecDeque<(String, Box<dyn FnOnce() + Send>)>>,
}

impl StepExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the oldest queued task on the calling thread. Returns false if
    /// the queue was empty.
    pub fn run_next(&self) -> bool {
        let next = self.queue.lock().unwrap_or_else(|e| e.into_inner()).pop_front();
        match next {
            Some((name, task)) => {
                log::debug!("step executor running '{name}'");
                task();
                true
            }
            None => false,
        }
    }

    pub fn pending(&self) -> usize {
        self.queue.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl NamedTaskExecutor for StepExecutor {
    fn execute(&self, name: &str, task: Box<dyn FnOnce() + Send>) {
        self.queue
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back((name.to_string(), task));
    }
}

/// Corpus with a fixed suggestion list, echoed back for every query.
pub struct FixedCorpus {
    meta: CorpusMeta,
    texts: Vec<String>,
}

impl FixedCorpus {
    pub fn new(name: &str, texts: &[&str]) -> Self {
        Self {
            meta: CorpusMeta::new(name),
            texts: texts.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn with_meta(meta: CorpusMeta, texts: &[&str]) -> Self {
        Self {
            meta,
            texts: texts.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl Corpus for FixedCorpus {
    fn meta(&self) -> &CorpusMeta {
        &self.meta
    }

    fn suggest(&self, query: &str, max_results: usize, _only_corpus: bool) -> Result<CorpusResult> {
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

/// Corpus whose every query fails, for error-isolation tests.
pub struct FailingCorpus {
    meta: CorpusMeta,
}

impl FailingCorpus {
    pub fn new(name: &str) -> Self {
        Self {
            meta: CorpusMeta::new(name),
        }
    }
}

impl Corpus for FailingCorpus {
    fn meta(&self) -> &CorpusMeta {
        &self.meta
    }

    fn suggest(
        &self,
        _query: &str,
        _max_results: usize,
        _only_corpus: bool,
    ) -> Result<CorpusResult> {
        Err(omnibox_suggestion::SuggestionError::CorpusFailed {
            corpus: self.meta.name.clone(),
            message: "simulated failure".to_string(),
        })
    }
}
