//! # Store Configuration

/// Tunables for the block store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Maximum number of deletions accumulated in one engine batch while
    /// pruning. Bounds batch memory and keeps engine commit latency flat
    /// when pruning millions of records.
    pub prune_batch_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            prune_batch_size: 1000,
        }
    }
}

impl StoreConfig {
    /// Configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the prune batch bound.
    pub fn with_prune_batch_size(mut self, size: usize) -> Self {
        self.prune_batch_size = size;
        self
    }
}
