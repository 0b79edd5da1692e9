//! Merge sort, sequential and fork-join.

use tracing::{debug, instrument};

/// Recursion depth below which the parallel sort forks both halves.
pub const FORK_DEPTH: usize = 3;

/// Stable merge of the sorted runs `seq[..mid]` and `seq[mid..]`.
///
/// Both runs are copied into their own buffer first; on equal keys the
/// element of the left run is written first.
pub fn merge<T: Ord + Copy>(seq: &mut [T], mid: usize) {
    let left = seq[..mid].to_vec();
    let right = seq[mid..].to_vec();

    let (mut i, mut j) = (0, 0);
    for slot in seq.iter_mut() {
        let take_left = match (left.get(i), right.get(j)) {
            (Some(l), Some(r)) => l <= r,
            (Some(_), None) => true,
            (None, _) => false,
        };
        if take_left {
            *slot = left[i];
            i += 1;
        } else {
            *slot = right[j];
            j += 1;
        }
    }
}

/// Left half takes the extra element of an odd-length run.
fn midpoint(len: usize) -> usize {
    len.div_ceil(2)
}

/// Classic top-down merge sort.
pub fn merge_sort_sequential<T: Ord + Copy>(seq: &mut [T]) {
    if seq.len() < 2 {
        return;
    }
    let mid = midpoint(seq.len());
    let (left, right) = seq.split_at_mut(mid);
    merge_sort_sequential(left);
    merge_sort_sequential(right);
    merge(seq, mid);
}

/// Fork-join merge sort forking down to [`FORK_DEPTH`].
///
/// Returns the number of sequential leaf sorts, see
/// [`merge_sort_parallel_bounded`].
pub fn merge_sort_parallel<T: Ord + Copy + Send>(seq: &mut [T]) -> usize {
    merge_sort_parallel_bounded(seq, FORK_DEPTH)
}

/// Fork-join merge sort with an explicit fan-out cutoff.
///
/// Calls at depth `< fork_depth` sort their halves as two `rayon::join`
/// tasks; a call reaching `fork_depth` sorts its run sequentially as one
/// leaf. The merge always runs after both halves are sorted and is never
/// split.
///
/// Returns the number of leaves: `2^fork_depth` once the input has at least
/// that many elements, fewer for shorter input (single elements above the
/// boundary need no sort), and 1 for `fork_depth == 0`.
#[instrument(level = "debug", skip(seq), fields(len = seq.len()))]
pub fn merge_sort_parallel_bounded<T: Ord + Copy + Send>(seq: &mut [T], fork_depth: usize) -> usize {
    let leaves = sort_at_depth(seq, 0, fork_depth);
    debug!(leaves, "merge sort finished");
    leaves
}

fn sort_at_depth<T: Ord + Copy + Send>(seq: &mut [T], depth: usize, fork_depth: usize) -> usize {
    if depth >= fork_depth {
        merge_sort_sequential(seq);
        return 1;
    }
    if seq.len() < 2 {
        return 0;
    }

    let mid = midpoint(seq.len());
    let (left, right) = seq.split_at_mut(mid);
    let (left_leaves, right_leaves) = rayon::join(
        || sort_at_depth(left, depth + 1, fork_depth),
        || sort_at_depth(right, depth + 1, fork_depth),
    );

    merge(seq, mid);
    left_leaves + right_leaves
}
