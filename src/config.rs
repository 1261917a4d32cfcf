use crate::block::{BlockId, CANDIDATES_PER_BLOCK};
use crate::error::SearchError;

/// 16-byte key mixed into every checksum derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedKey(pub [u8; 16]);

impl FixedKey {
    /// Key used by Audible AAX files (`77214d4b196a87cd520045fd20a51d67`).
    pub const AUDIBLE: FixedKey = FixedKey([
        0x77, 0x21, 0x4d, 0x4b, 0x19, 0x6a, 0x87, 0xcd, 0x52, 0x00, 0x45, 0xfd, 0x20, 0xa5, 0x1d,
        0x67,
    ]);
}

impl Default for FixedKey {
    fn default() -> Self {
        Self::AUDIBLE
    }
}

/// Runtime parameters for one search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// First block to search.
    pub start_block: BlockId,
    /// Last block to search, inclusive.
    pub end_block: BlockId,
    /// Number of worker threads.
    pub workers: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            start_block: BlockId::MIN,
            end_block: BlockId::MAX,
            workers: available_workers(),
        }
    }
}

impl SearchConfig {
    pub fn new(start_block: u8, end_block: u8, workers: usize) -> Self {
        Self {
            start_block: BlockId(start_block),
            end_block: BlockId(end_block),
            workers,
        }
    }

    /// Reject ranges and worker counts the scheduler cannot run.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.start_block > self.end_block {
            return Err(SearchError::Config(format!(
                "start block {} is after end block {}",
                self.start_block, self.end_block
            )));
        }
        if self.workers == 0 {
            return Err(SearchError::Config("worker count must be at least 1".into()));
        }
        Ok(())
    }

    /// Number of blocks in the searched range.
    pub fn block_count(&self) -> usize {
        if self.start_block > self.end_block {
            return 0;
        }
        (self.end_block.0 - self.start_block.0) as usize + 1
    }

    pub fn blocks(&self) -> impl Iterator<Item = BlockId> {
        BlockId::range(self.start_block, self.end_block)
    }

    pub fn total_combinations(&self) -> u64 {
        self.block_count() as u64 * CANDIDATES_PER_BLOCK as u64
    }

    /// Even share of the keyspace per worker. Display only.
    pub fn combinations_per_worker(&self) -> u64 {
        self.total_combinations() / self.workers.max(1) as u64
    }
}

/// Parallelism reported by the OS, at least 1.
pub fn available_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_range_counts() {
        let cfg = SearchConfig::new(0, 255, 4);
        assert_eq!(cfg.block_count(), 256);
        assert_eq!(cfg.total_combinations(), 1 << 32);
        assert_eq!(cfg.combinations_per_worker(), 1 << 30);
    }

    #[test]
    fn single_block_range() {
        let cfg = SearchConfig::new(255, 255, 3);
        assert_eq!(cfg.block_count(), 1);
        assert_eq!(cfg.blocks().collect::<Vec<_>>(), vec![BlockId(255)]);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn inverted_range_rejected() {
        let cfg = SearchConfig::new(10, 9, 1);
        assert!(matches!(cfg.validate(), Err(SearchError::Config(_))));
        assert_eq!(cfg.block_count(), 0);
    }

    #[test]
    fn zero_workers_rejected() {
        assert!(SearchConfig::new(0, 0, 0).validate().is_err());
    }
}
