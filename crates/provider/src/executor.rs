/// Runs named tasks on worker threads.
///
/// Corpus queries are arbitrary blocking I/O, so they must never run on the
/// async runtime's core threads. The name identifies the corpus for logging;
/// there is no ordering guarantee between tasks.
pub trait NamedTaskExecutor: Send + Sync {
    fn execute(&self, name: &str, task: Box<dyn FnOnce() + Send>);
}

/// Production executor backed by the tokio blocking pool.
pub struct SpawnBlockingExecutor {
    handle: tokio::runtime::Handle,
}

impl SpawnBlockingExecutor {
    /// Captures the current runtime. Panics outside a tokio runtime, like
    /// any `Handle::current` caller.
    pub fn new() -> Self {
        Self {
            handle: tokio::runtime::Handle::current(),
        }
    }

    pub fn with_handle(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }
}

impl Default for SpawnBlockingExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl NamedTaskExecutor for SpawnBlockingExecutor {
    fn execute(&self, name: &str, task: Box<dyn FnOnce() + Send>) {
        log::debug!("dispatching worker task '{name}'");
        self.handle.spawn_blocking(task);
    }
}
