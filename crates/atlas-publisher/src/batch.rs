//! Size-bounded grouping of write requests.

use std::num::NonZeroUsize;

/// Iterator adaptor yielding contiguous groups of at most `size` items.
///
/// Groups are produced lazily and preserve input order. Only the last group
/// may be shorter than `size`.
#[derive(Debug)]
pub struct Batches<I> {
    iter: I,
    size: NonZeroUsize,
}

impl<I: Iterator> Iterator for Batches<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let batch: Vec<I::Item> = self.iter.by_ref().take(self.size.get()).collect();
        (!batch.is_empty()).then_some(batch)
    }
}

/// Group `items` into batches of at most `size`.
pub fn batches<I: IntoIterator>(items: I, size: NonZeroUsize) -> Batches<I::IntoIter> {
    Batches {
        iter: items.into_iter(),
        size,
    }
}
