//! Bubble sort and its odd-even transposition variant.

use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use tracing::{debug, instrument, trace};

/// Classic bubble sort: `n - 1` passes of adjacent compare-swaps.
pub fn bubble_sort_sequential<T: Ord>(seq: &mut [T]) {
    let n = seq.len();
    for i in 0..n.saturating_sub(1) {
        for j in 0..n - i - 1 {
            if seq[j] > seq[j + 1] {
                seq.swap(j, j + 1);
            }
        }
    }
}

/// Odd-even transposition sort.
///
/// Each cycle runs an odd phase (pairs starting at 1, 3, 5, ...) followed by
/// an even phase (pairs starting at 0, 2, 4, ...). The pairs of one phase
/// are disjoint and are compare-swapped concurrently. The sort stops after
/// the first cycle in which no worker swapped.
///
/// Returns the number of cycles run, counting the final one without swaps.
#[instrument(level = "debug", skip(seq), fields(len = seq.len()))]
pub fn bubble_sort_parallel<T: Ord + Send>(seq: &mut [T]) -> usize {
    if seq.len() < 2 {
        return 0;
    }

    let swapped = AtomicBool::new(true);
    let mut cycles = 0;

    while swapped.swap(false, Ordering::Relaxed) {
        transpose_phase(&mut seq[1..], &swapped);
        transpose_phase(seq, &swapped);
        cycles += 1;
        trace!(cycles, "odd-even cycle done");
    }

    debug!(cycles, "odd-even transposition finished");
    cycles
}

/// Compare-swaps every pair `(2k, 2k + 1)` of `seq` in parallel.
///
/// A trailing single element has no partner and is left alone.
fn transpose_phase<T: Ord + Send>(seq: &mut [T], swapped: &AtomicBool) {
    seq.par_chunks_mut(2).for_each(|pair| {
        if pair.len() == 2 && pair[0] > pair[1] {
            pair.swap(0, 1);
            swapped.store(true, Ordering::Relaxed);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_input_takes_one_cycle() {
        let mut seq = vec![1, 2, 3, 4, 5];
        assert_eq!(bubble_sort_parallel(&mut seq), 1);
        assert_eq!(seq, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_two_elements() {
        let mut seq = vec![2, 1];
        bubble_sort_parallel(&mut seq);
        assert_eq!(seq, vec![1, 2]);

        let mut seq = vec![2, 1];
        bubble_sort_sequential(&mut seq);
        assert_eq!(seq, vec![1, 2]);
    }

    #[test]
    fn test_reversed_input_within_cycle_bound() {
        let mut seq: Vec<i32> = (0..33).rev().collect();
        let cycles = bubble_sort_parallel(&mut seq);
        assert_eq!(seq, (0..33).collect::<Vec<_>>());
        assert!(cycles <= 33, "took {} cycles", cycles);
    }
}
