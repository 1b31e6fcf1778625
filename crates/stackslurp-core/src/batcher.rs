use stackslurp_types::{Result, SlurpError};
use std::slice::Chunks;

/// Most messages the queue accepts in a single post
pub const MAX_BATCH_SIZE: usize = 10;

/// Split `items` into consecutive groups of `size`, the last possibly shorter.
///
/// The returned iterator borrows `items` and is `Clone`, so it can be
/// restarted from the beginning.
///
/// # Panics
///
/// Panics if `size` is 0.
pub fn chunks<T>(items: &[T], size: usize) -> Chunks<'_, T> {
    items.chunks(size)
}

/// Fixed-size batching with the size validated once up front
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batcher {
    size: usize,
}

impl Batcher {
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(SlurpError::ConfigInvalid(
                "batch size must be at least 1".to_string(),
            ));
        }
        Ok(Self { size })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn batches<'a, T>(&self, items: &'a [T]) -> Chunks<'a, T> {
        chunks(items, self.size)
    }

    /// Number of batches `len` items split into
    pub fn batch_count(&self, len: usize) -> usize {
        len.div_ceil(self.size)
    }
}

impl Default for Batcher {
    fn default() -> Self {
        Self {
            size: MAX_BATCH_SIZE,
        }
    }
}
