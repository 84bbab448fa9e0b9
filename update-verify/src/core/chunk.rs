//! Deterministic partitioning of work into near-equal contiguous chunks.

use std::ops::Range;

/// Index range of chunk `this_chunk` (1-indexed) when `len` items are split
/// into `chunks` contiguous groups.
///
/// Every chunk gets `len / chunks` items and the first `len % chunks` chunks
/// get one extra. Returns `None` if `chunks == 0` or `this_chunk` is outside
/// `1..=chunks`.
pub fn chunk_range(len: usize, chunks: usize, this_chunk: usize) -> Option<Range<usize>> {
    if chunks == 0 || this_chunk == 0 || this_chunk > chunks {
        return None;
    }
    let min_size = len / chunks;
    let extra = len % chunks;
    let index = this_chunk - 1;
    let start = index * min_size + index.min(extra);
    let size = if index < extra { min_size + 1 } else { min_size };
    Some(start..start + size)
}

/// Slice of `items` belonging to chunk `this_chunk`, or `None` if out of range.
pub fn chunk<T>(items: &[T], chunks: usize, this_chunk: usize) -> Option<&[T]> {
    chunk_range(items.len(), chunks, this_chunk).map(|range| &items[range])
}
