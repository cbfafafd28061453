//! Tuning constants and strategy selection of a sort invocation.

use crate::{Executor, Partition, Policy};
use std::{num::NonZeroUsize, thread};

/// Ranges shorter than this are sorted with insertion sort by default.
pub const INSERTION_THRESHOLD: usize = 30;

/// Returns the host's available parallelism, falling back to a single worker if it is unknown.
///
/// This is the worker budget used when none is specified.
pub fn default_workers() -> usize {
	match thread::available_parallelism() {
		Ok(workers) => workers.get(),
		Err(err) => {
			log::warn!("available parallelism unknown, sorting sequentially: {err}");
			NonZeroUsize::MIN.get()
		}
	}
}

/// Configuration of a sort invocation.
///
/// # Examples
///
/// ```
/// use ndarray_par_sort::{Config, Halving, Partition, Policy, ndarray::arr1, sort_with};
///
/// let config = Config::new()
/// 	.workers(4)
/// 	.threshold(16)
/// 	.partition(Partition::TwoPass)
/// 	.policy(Policy::Static(Halving::Inclusive));
///
/// let mut v = arr1(&[3, 1, 2, 3, 1, 2]);
/// sort_with(v.view_mut(), i32::lt, &config);
/// assert_eq!(v, arr1(&[1, 1, 2, 2, 3, 3]));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Config {
	/// Ranges shorter than this are sorted sequentially with insertion sort.
	///
	/// Any value preserves correctness, values below 2 behave like 2. Defaults to
	/// [`INSERTION_THRESHOLD`].
	pub threshold: usize,
	/// Number of workers the sort may occupy including the calling one.
	///
	/// Zero behaves like one, which sorts sequentially. Defaults to [`default_workers`].
	pub workers: usize,
	/// Partitioning algorithm of each recursion step.
	pub partition: Partition,
	/// Tracking of the worker budget across the recursion.
	pub policy: Policy,
	/// How offloaded sub-ranges reach other workers.
	pub executor: Executor,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			threshold: INSERTION_THRESHOLD,
			workers: default_workers(),
			partition: Partition::default(),
			policy: Policy::default(),
			executor: Executor::default(),
		}
	}
}

impl Config {
	/// Same as [`Config::default`].
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}
	/// Sets [`threshold`](Config::threshold).
	#[must_use]
	pub fn threshold(mut self, threshold: usize) -> Self {
		self.threshold = threshold;
		self
	}
	/// Sets [`workers`](Config::workers).
	#[must_use]
	pub fn workers(mut self, workers: usize) -> Self {
		self.workers = workers;
		self
	}
	/// Sets [`partition`](Config::partition).
	#[must_use]
	pub fn partition(mut self, partition: Partition) -> Self {
		self.partition = partition;
		self
	}
	/// Sets [`policy`](Config::policy).
	#[must_use]
	pub fn policy(mut self, policy: Policy) -> Self {
		self.policy = policy;
		self
	}
	/// Sets [`executor`](Config::executor).
	#[must_use]
	pub fn executor(mut self, executor: Executor) -> Self {
		self.executor = executor;
		self
	}
}

#[cfg(test)]
mod test {
	use super::{Config, INSERTION_THRESHOLD, default_workers};
	use crate::{Executor, Halving, Partition, Policy};

	#[test]
	fn defaults() {
		let config = Config::default();
		assert_eq!(config.threshold, INSERTION_THRESHOLD);
		assert_eq!(config.workers, default_workers());
		assert!(config.workers >= 1);
		assert_eq!(config.partition, Partition::TwoPointer);
		assert_eq!(config.policy, Policy::Static(Halving::Exclusive));
		assert_eq!(config.executor, Executor::Threads);
	}

	#[test]
	fn builder() {
		let config = Config::new()
			.threshold(8)
			.workers(3)
			.partition(Partition::NthElement)
			.policy(Policy::Dynamic);
		assert_eq!(config.threshold, 8);
		assert_eq!(config.workers, 3);
		assert_eq!(config.partition, Partition::NthElement);
		assert_eq!(config.policy, Policy::Dynamic);
	}
}
