//! Even contiguous index-range partitioning for static work distribution.

use std::ops::Range;

/// Chunk length that splits `total` items into at most `parts` contiguous
/// chunks, all but the last of equal size.
///
/// Returns at least 1 so the result is always a valid chunk size.
pub fn chunk_len(total: usize, parts: usize) -> usize {
    ((total + parts - 1) / parts).max(1)
}

/// Split `0..total` into exactly `parts` disjoint contiguous ranges covering
/// every index, with sizes differing by at most one.
///
/// The first `total % parts` ranges hold the extra item; when `parts`
/// exceeds `total`, the trailing ranges come out empty. `parts` must be at
/// least 1.
pub fn block_ranges(total: usize, parts: usize) -> Vec<Range<usize>> {
    let base = total / parts;
    let rem = total % parts;
    let mut ranges = Vec::with_capacity(parts);
    let mut start = 0;
    for r in 0..parts {
        let len = base + usize::from(r < rem);
        ranges.push(start..start + len);
        start += len;
    }
    ranges
}
