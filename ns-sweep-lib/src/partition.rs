//! Work partitioning for the concurrent scan fan-out.

use std::ops::Range;

/// Split `[0, len)` into `chunks` contiguous ranges of `len / chunks`
/// elements each, plus one terminal range absorbing the remainder of the
/// integer division.
///
/// The returned ranges partition the index space exactly: no index is
/// omitted, none is duplicated, and order is preserved within each range.
/// When `len < chunks` the leading ranges are all empty and the whole list
/// lands in the terminal range; callers accept that degenerate shape rather
/// than erroring.
pub fn chunk_ranges(len: usize, chunks: usize) -> Vec<Range<usize>> {
    let chunks = chunks.max(1);
    let chunk_size = len / chunks;

    let mut ranges = Vec::with_capacity(chunks + 1);
    for i in 0..chunks {
        ranges.push(i * chunk_size..(i + 1) * chunk_size);
    }
    // Terminal remainder chunk, possibly empty when len divides evenly.
    ranges.push(chunks * chunk_size..len);
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Flatten ranges and assert they cover [0, len) exactly, in order.
    fn assert_exact_partition(len: usize, chunks: usize) {
        let ranges = chunk_ranges(len, chunks);
        assert_eq!(ranges.len(), chunks.max(1) + 1);

        let covered: Vec<usize> = ranges.iter().cloned().flatten().collect();
        let expected: Vec<usize> = (0..len).collect();
        assert_eq!(
            covered, expected,
            "partition of len={} chunks={} must cover every index once, in order",
            len, chunks
        );
    }

    #[test]
    fn test_even_division() {
        assert_exact_partition(100, 10);
        let ranges = chunk_ranges(100, 10);
        assert!(ranges.last().unwrap().is_empty());
    }

    #[test]
    fn test_remainder_goes_to_terminal_chunk() {
        assert_exact_partition(103, 10);
        let ranges = chunk_ranges(103, 10);
        assert_eq!(*ranges.last().unwrap(), 100..103);
    }

    #[test]
    fn test_fewer_elements_than_chunks() {
        assert_exact_partition(3, 10);
        let ranges = chunk_ranges(3, 10);
        // All leading chunks are empty, the terminal chunk holds everything.
        assert!(ranges[..10].iter().all(|r| r.is_empty()));
        assert_eq!(*ranges.last().unwrap(), 0..3);
    }

    #[test]
    fn test_empty_list() {
        assert_exact_partition(0, 10);
    }

    #[test]
    fn test_single_chunk() {
        assert_exact_partition(7, 1);
        let ranges = chunk_ranges(7, 1);
        assert_eq!(ranges[0], 0..7);
        assert!(ranges[1].is_empty());
    }

    #[test]
    fn test_zero_chunks_treated_as_one() {
        assert_exact_partition(5, 0);
    }

    #[test]
    fn test_various_shapes() {
        for len in [0, 1, 2, 9, 10, 11, 999, 1000, 1001, 9357] {
            for chunks in [1, 2, 3, 7, 1000] {
                assert_exact_partition(len, chunks);
            }
        }
    }
}
