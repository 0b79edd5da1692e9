//! Sequential vs. parallel comparison harness
//!
//! For every configured size: generate one random array, sort four copies
//! (bubble and merge, sequential and parallel), and check that all four
//! copies end up identical and sorted.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument};

use crate::application::services::sorting::{SortRun, SortService};
use crate::application::{ApplicationError, ApplicationResult};
use crate::config::BenchConfig;
use crate::domain::sort::{is_sorted, Execution, SortAlgorithm};

/// Results for one array size.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub size: usize,
    /// Leading elements of the unsorted input
    pub original_preview: Vec<i32>,
    /// One entry per variant with the leading elements of its output
    pub runs: Vec<(SortRun, Vec<i32>)>,
}

/// Generate `size` values drawn uniformly from `0..max_value`.
pub fn random_array<R: Rng>(rng: &mut R, size: usize, max_value: i32) -> Vec<i32> {
    (0..size).map(|_| rng.random_range(0..max_value)).collect()
}

/// Service running the four-way comparison.
pub struct BenchmarkService {
    sorter: SortService,
    config: BenchConfig,
}

impl BenchmarkService {
    pub fn new(sorter: SortService, config: BenchConfig) -> Self {
        Self { sorter, config }
    }

    /// Compare all variants for every configured size.
    #[instrument(level = "debug", skip(self))]
    pub fn run(&self) -> ApplicationResult<Vec<Comparison>> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        self.config
            .sizes
            .iter()
            .map(|&size| {
                let input = random_array(&mut rng, size, self.config.max_value);
                self.compare(&input)
            })
            .collect()
    }

    /// Sort four copies of `input` and verify they agree.
    pub fn compare(&self, input: &[i32]) -> ApplicationResult<Comparison> {
        let size = input.len();
        info!("comparing sort variants: size={}", size);

        let results = self
            .sorter
            .sort_each(input, &SortAlgorithm::ALL, &Execution::ALL);

        let reference = results.first().map(|(_, sorted)| sorted.as_slice());
        let agree = results
            .iter()
            .all(|(_, sorted)| Some(sorted.as_slice()) == reference && is_sorted(sorted));
        if !agree {
            return Err(ApplicationError::SortMismatch { size });
        }
        debug!("compare: all {} variants agree", results.len());

        let preview = self.config.preview;
        Ok(Comparison {
            size,
            original_preview: input.iter().take(preview).copied().collect(),
            runs: results
                .into_iter()
                .map(|(run, sorted)| (run, sorted.into_iter().take(preview).collect()))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::pool::WorkerPool;

    #[test]
    fn given_seed_when_generating_then_values_are_reproducible_and_in_range() {
        let a = random_array(&mut StdRng::seed_from_u64(1), 100, 50);
        let b = random_array(&mut StdRng::seed_from_u64(1), 100, 50);
        assert_eq!(a, b);
        assert!(a.iter().all(|v| (0..50).contains(v)));
    }

    #[test]
    fn given_small_sizes_when_running_then_reports_each_size() {
        let config = BenchConfig {
            sizes: vec![0, 1, 64],
            max_value: 100,
            preview: 5,
            seed: Some(3),
        };
        let sorter = SortService::new(WorkerPool::new(2).unwrap(), 3);
        let comparisons = BenchmarkService::new(sorter, config).run().unwrap();

        let sizes: Vec<usize> = comparisons.iter().map(|c| c.size).collect();
        assert_eq!(sizes, vec![0, 1, 64]);
        let last = &comparisons[2];
        assert_eq!(last.original_preview.len(), 5);
        assert_eq!(last.runs.len(), 4);
        assert!(last.runs.iter().all(|(_, head)| head == &last.runs[0].1));
    }
}
