//! Keyspace partitioning.
//!
//! The 2^32 keyspace splits into 256 blocks keyed by the leading byte. Each
//! block enumerates its trailing three bytes as a big-endian counter from
//! `000000` to `ffffff`, so "N% through block B" always means the same
//! candidates.

use std::fmt;
use std::iter::FusedIterator;

use crate::types::ActivationBytes;

/// Candidates sharing one leading byte.
pub const CANDIDATES_PER_BLOCK: u32 = 1 << 24;

/// Leading byte of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u8);

impl BlockId {
    pub const MIN: BlockId = BlockId(0);
    pub const MAX: BlockId = BlockId(u8::MAX);

    /// Inclusive range of block ids; empty when `start > end`.
    pub fn range(start: BlockId, end: BlockId) -> impl Iterator<Item = BlockId> {
        (start.0..=end.0).map(BlockId)
    }

    /// Lazily enumerate every candidate in this block.
    pub fn candidates(self) -> BlockCandidates {
        BlockCandidates::new(self)
    }

    /// Label used in progress output, e.g. `1c000000-1cffffff`.
    pub fn span_label(self) -> String {
        format!("{:02x}000000-{:02x}ffffff", self.0, self.0)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Ordered enumeration of one block's candidates.
///
/// Restartable by calling [`BlockId::candidates`] again.
#[derive(Debug, Clone)]
pub struct BlockCandidates {
    block: BlockId,
    next: u32,
}

impl BlockCandidates {
    pub fn new(block: BlockId) -> Self {
        Self { block, next: 0 }
    }

    /// Number of candidates yielded so far.
    pub fn searched(&self) -> u32 {
        self.next
    }
}

impl Iterator for BlockCandidates {
    type Item = ActivationBytes;

    #[inline]
    fn next(&mut self) -> Option<ActivationBytes> {
        if self.next >= CANDIDATES_PER_BLOCK {
            return None;
        }
        let offset = self.next;
        self.next += 1;
        Some(ActivationBytes::from_u32(((self.block.0 as u32) << 24) | offset))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (CANDIDATES_PER_BLOCK - self.next) as usize;
        (left, Some(left))
    }

    fn nth(&mut self, n: usize) -> Option<ActivationBytes> {
        let left = (CANDIDATES_PER_BLOCK - self.next) as usize;
        if n >= left {
            self.next = CANDIDATES_PER_BLOCK;
            return None;
        }
        self.next += n as u32;
        self.next()
    }
}

impl ExactSizeIterator for BlockCandidates {}

impl FusedIterator for BlockCandidates {}
