//! In-place parallel quicksort with a bounded worker budget for one-dimensional (sub)views into
//! *n*-dimensional arrays of arbitrary memory layout (e.g., non-contiguous).
//!
//! The range is partitioned around a median-of-three pivot, the left sub-range is offloaded to
//! another worker as long as the worker budget permits, and the right sub-range is sorted on the
//! calling worker. Every offloaded sub-range is joined before its parent returns, and a panic on
//! any worker propagates to the caller. Sub-ranges are disjoint mutable views, hence workers never
//! alias.
//!
//! # Example
//!
//! ```
//! use ndarray_par_sort::{ParSort1Ext, ndarray::arr2};
//!
//! // 2-dimensional array of 4 rows and 5 columns.
//! let mut v = arr2(&[[-5, 4, 1, -3,  2],   // row 0, axis 0
//!                    [ 8, 3, 2,  4,  8],   // row 1, axis 0
//!                    [38, 9, 3,  0,  3],   // row 2, axis 0
//!                    [ 4, 9, 0,  8, -1]]); // row 3, axis 0
//!
//! // Mutable subview into the last column, which is non-contiguous.
//! let mut column = v.column_mut(4);
//! column.par_quick_sort();
//!
//! assert!(v == arr2(&[[-5, 4, 1, -3, -1],
//!                     [ 8, 3, 2,  4,  2],
//!                     [38, 9, 3,  0,  3],
//!                     [ 4, 9, 0,  8,  8]]));
//! ```
//!
//! Plain slices are sorted through a view:
//!
//! ```
//! use ndarray_par_sort::{ndarray::ArrayViewMut1, sort};
//!
//! let mut v = vec![5, 3, 8, 1, 9, 2];
//! sort(ArrayViewMut1::from(&mut v[..]), i32::lt, 1);
//! assert_eq!(v, [1, 2, 3, 5, 8, 9]);
//! ```
//!
//! # Strategies
//!
//! | [`Partition`]  | Split                                   | Elements equal to the pivot   |
//! |----------------|-----------------------------------------|-------------------------------|
//! | `TwoPointer`   | data-dependent                          | only the pivot is settled     |
//! | `TwoPass`      | data-dependent                          | all settled, never recursed   |
//! | `NthElement`   | halves, depth at most ⌈log₂ *n*⌉        | only the midpoint is settled  |
//!
//! | [`Policy`]     | Worker accounting                                                     |
//! |----------------|-----------------------------------------------------------------------|
//! | `Static`       | budget halved and handed down by value, no synchronization            |
//! | `Dynamic`      | one atomic counter, workers are reused once their sub-range is sorted |
//!
//! # Features
//!
//!   * `stacker` grows the stack of deeply recursing workers on demand. Enabled by `default`.
//!   * `rayon` adds `Executor::Rayon` offloading to the current Rayon thread pool.

#![deny(
	missing_docs,
	rustdoc::broken_intra_doc_links,
	rustdoc::missing_crate_level_docs
)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod budget;
mod config;
mod dispatch;
mod executor;
mod insertion_sort;
mod partition;
mod pivot;
mod select;

pub use crate::{
	budget::{Halving, Policy},
	config::{Config, INSERTION_THRESHOLD, default_workers},
	executor::Executor,
	partition::Partition,
};

use crate::dispatch::par_quick_sort;
use core::cmp::Ordering::{self, Less};
use ndarray::{ArrayBase, ArrayViewMut1, DataMut, Ix1};

pub use ndarray;

/// Sorts `v` with the two-pointer partition and a statically halved budget of `workers`.
///
/// `is_less` must define a strict weak ordering, otherwise the resulting order is unspecified. The
/// sort is unstable.
///
/// # Examples
///
/// ```
/// use ndarray_par_sort::{default_workers, ndarray::arr1, sort};
///
/// let mut v = arr1(&[5, 3, 8, 1, 9, 2]);
/// sort(v.view_mut(), i32::lt, default_workers());
/// assert_eq!(v, arr1(&[1, 2, 3, 5, 8, 9]));
/// ```
pub fn sort<T, F>(v: ArrayViewMut1<'_, T>, is_less: F, workers: usize)
where
	T: Send,
	F: Fn(&T, &T) -> bool + Sync,
{
	sort_with(v, is_less, &Config::new().workers(workers));
}

/// Sorts `v` with the two-pass partition and a statically halved budget of `workers`.
///
/// Elements equal to a pivot are settled in one go, which pays off for inputs with many
/// duplicates.
///
/// # Examples
///
/// ```
/// use ndarray_par_sort::{ndarray::arr1, sort_partition};
///
/// let mut v = arr1(&[2, 1, 2, 1, 2, 1]);
/// sort_partition(v.view_mut(), |a: &i32, b: &i32| b < a, 2);
/// assert_eq!(v, arr1(&[2, 2, 2, 1, 1, 1]));
/// ```
pub fn sort_partition<T, F>(v: ArrayViewMut1<'_, T>, is_less: F, workers: usize)
where
	T: Send,
	F: Fn(&T, &T) -> bool + Sync,
{
	let config = Config::new()
		.workers(workers)
		.partition(Partition::TwoPass);
	sort_with(v, is_less, &config);
}

/// Sorts `v` by selecting the midpoint element in each step with a statically halved budget of
/// `workers`.
///
/// Every split is perfectly balanced, so each worker receives an equal share of the range.
///
/// # Examples
///
/// ```
/// use ndarray_par_sort::{ndarray::arr1, sort_nth_element};
///
/// let mut v = arr1(&[0.5, -1.0, 3.25, 0.0]);
/// sort_nth_element(v.view_mut(), f64::lt, 4);
/// assert_eq!(v, arr1(&[-1.0, 0.0, 0.5, 3.25]));
/// ```
pub fn sort_nth_element<T, F>(v: ArrayViewMut1<'_, T>, is_less: F, workers: usize)
where
	T: Send,
	F: Fn(&T, &T) -> bool + Sync,
{
	let config = Config::new()
		.workers(workers)
		.partition(Partition::NthElement);
	sort_with(v, is_less, &config);
}

/// Sorts `v` with the two-pointer partition and a budget of `workers` shared through an atomic
/// counter.
///
/// Workers are returned to the budget as soon as their sub-range is sorted and get reused by
/// whichever part of the recursion claims them next.
///
/// # Examples
///
/// ```
/// use ndarray_par_sort::{ndarray::Array1, sort_dynamic};
///
/// let mut v = Array1::from_iter((0..1000u32).rev());
/// sort_dynamic(v.view_mut(), u32::lt, 4);
/// assert_eq!(v, Array1::from_iter(0..1000u32));
/// ```
pub fn sort_dynamic<T, F>(v: ArrayViewMut1<'_, T>, is_less: F, workers: usize)
where
	T: Send,
	F: Fn(&T, &T) -> bool + Sync,
{
	let config = Config::new().workers(workers).policy(Policy::Dynamic);
	sort_with(v, is_less, &config);
}

/// Sorts `v` as configured by `config`.
///
/// # Panics
///
/// Resumes the panic of `is_less` raised on any worker once every worker of this invocation
/// completed. `v` is left in an unspecified order but still holds every element exactly once.
///
/// # Examples
///
/// ```
/// use ndarray_par_sort::{Config, Partition, Policy, ndarray::arr1, sort_with};
///
/// let config = Config::new()
/// 	.workers(8)
/// 	.partition(Partition::NthElement)
/// 	.policy(Policy::Dynamic);
///
/// let mut v = arr1(&["delta", "alpha", "charlie", "bravo"]);
/// sort_with(v.view_mut(), |a: &&str, b: &&str| a < b, &config);
/// assert_eq!(v, arr1(&["alpha", "bravo", "charlie", "delta"]));
/// ```
pub fn sort_with<T, F>(v: ArrayViewMut1<'_, T>, is_less: F, config: &Config)
where
	T: Send,
	F: Fn(&T, &T) -> bool + Sync,
{
	par_quick_sort(v, is_less, config);
}

/// Extension trait for 1-dimensional [`ArrayBase<S, Ix1>`](`ArrayBase`) array or (sub)view with
/// arbitrary memory layout (e.g., non-contiguous) providing in-place parallel quicksort.
///
/// The methods without a [`Config`] use [`Config::default`], that is the two-pointer partition
/// with a statically halved budget of [`default_workers`].
pub trait ParSort1Ext<A, S>
where
	S: DataMut<Elem = A>,
{
	/// Sorts the array in parallel.
	///
	/// This sort is unstable (i.e., may reorder equal elements), in-place (i.e., does not
	/// allocate), and *O*(*n* \* log(*n*)) on average.
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_par_sort::{ParSort1Ext, ndarray::arr1};
	///
	/// let mut v = arr1(&[-5, 4, 1, -3, 2]);
	///
	/// v.par_quick_sort();
	/// assert!(v == arr1(&[-5, -3, 1, 2, 4]));
	/// ```
	fn par_quick_sort(&mut self)
	where
		A: Ord + Send;
	/// Sorts the array in parallel with a comparator function.
	///
	/// The comparator function must define a total ordering for the elements in the array. If
	/// the ordering is not total, the order of the elements is unspecified.
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_par_sort::{ParSort1Ext, ndarray::arr1};
	///
	/// let mut v = arr1(&[5, 4, 1, 3, 2]);
	/// v.par_quick_sort_by(|a, b| a.cmp(b));
	/// assert!(v == arr1(&[1, 2, 3, 4, 5]));
	///
	/// // reverse sorting
	/// v.par_quick_sort_by(|a, b| b.cmp(a));
	/// assert!(v == arr1(&[5, 4, 3, 2, 1]));
	/// ```
	fn par_quick_sort_by<F>(&mut self, compare: F)
	where
		A: Send,
		F: Fn(&A, &A) -> Ordering + Sync;
	/// Sorts the array in parallel with a key extraction function.
	///
	/// The key function is called twice per comparison.
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_par_sort::{ParSort1Ext, ndarray::arr1};
	///
	/// let mut v = arr1(&[-5i32, 4, 1, -3, 2]);
	///
	/// v.par_quick_sort_by_key(|k| k.abs());
	/// assert!(v == arr1(&[1, 2, -3, 4, -5]));
	/// ```
	fn par_quick_sort_by_key<K, F>(&mut self, f: F)
	where
		A: Send,
		K: Ord,
		F: Fn(&A) -> K + Sync;
	/// Sorts the array in parallel with an "is less" function as configured by `config`.
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_par_sort::{Config, ParSort1Ext, Partition, ndarray::arr1};
	///
	/// let mut v = arr1(&[3, 1, 3, 2, 1, 3]);
	/// let config = Config::new().workers(2).partition(Partition::TwoPass);
	/// v.par_quick_sort_with(i32::lt, &config);
	/// assert!(v == arr1(&[1, 1, 2, 3, 3, 3]));
	/// ```
	fn par_quick_sort_with<F>(&mut self, is_less: F, config: &Config)
	where
		A: Send,
		F: Fn(&A, &A) -> bool + Sync;
}

impl<A, S> ParSort1Ext<A, S> for ArrayBase<S, Ix1>
where
	S: DataMut<Elem = A>,
{
	#[inline]
	fn par_quick_sort(&mut self)
	where
		A: Ord + Send,
	{
		par_quick_sort(self.view_mut(), A::lt, &Config::default());
	}
	#[inline]
	fn par_quick_sort_by<F>(&mut self, compare: F)
	where
		A: Send,
		F: Fn(&A, &A) -> Ordering + Sync,
	{
		par_quick_sort(
			self.view_mut(),
			|a: &A, b: &A| compare(a, b) == Less,
			&Config::default(),
		);
	}
	#[inline]
	fn par_quick_sort_by_key<K, F>(&mut self, f: F)
	where
		A: Send,
		K: Ord,
		F: Fn(&A) -> K + Sync,
	{
		par_quick_sort(
			self.view_mut(),
			|a: &A, b: &A| f(a).lt(&f(b)),
			&Config::default(),
		);
	}
	#[inline]
	fn par_quick_sort_with<F>(&mut self, is_less: F, config: &Config)
	where
		A: Send,
		F: Fn(&A, &A) -> bool + Sync,
	{
		par_quick_sort(self.view_mut(), is_less, config);
	}
}

#[cfg(test)]
mod test {
	use super::{
		Config, Halving, ParSort1Ext, Partition, Policy, sort, sort_dynamic, sort_nth_element,
		sort_partition, sort_with,
	};
	use ndarray::{Array1, ArrayViewMut1, arr1, arr2};
	use quickcheck_macros::quickcheck;
	use rand::{Rng, SeedableRng, rngs::StdRng};

	type SortFn = fn(ArrayViewMut1<'_, i64>, fn(&i64, &i64) -> bool, usize);

	const VARIANTS: [SortFn; 4] = [sort, sort_partition, sort_nth_element, sort_dynamic];

	fn random(len: usize, seed: u64) -> Vec<i64> {
		let mut rng = StdRng::seed_from_u64(seed);
		(0..len).map(|_| rng.random_range(-1000..1000)).collect()
	}

	#[quickcheck]
	fn sorted(xs: Vec<i64>) {
		let mut expected = xs.clone();
		expected.sort_unstable();
		for variant in VARIANTS {
			let mut array = Array1::from_vec(xs.clone());
			variant(array.view_mut(), i64::lt, 4);
			assert_eq!(array.to_vec(), expected);
		}
	}

	#[quickcheck]
	fn idempotent(xs: Vec<i64>) {
		let mut array = Array1::from_vec(xs);
		sort(array.view_mut(), i64::lt, 3);
		let once = array.clone();
		sort(array.view_mut(), i64::lt, 3);
		assert_eq!(array, once);
	}

	#[test]
	fn budget_invariant() {
		let xs = random(5_000, 11);
		for variant in VARIANTS {
			let mut reference = Array1::from_vec(xs.clone());
			variant(reference.view_mut(), i64::lt, 1);
			for workers in 2..=8 {
				let mut array = Array1::from_vec(xs.clone());
				variant(array.view_mut(), i64::lt, workers);
				assert_eq!(array, reference);
			}
		}
	}

	#[test]
	fn small_sequential() {
		let mut v = arr1(&[5, 3, 8, 1, 9, 2]);
		sort(v.view_mut(), i32::lt, 1);
		assert_eq!(v, arr1(&[1, 2, 3, 5, 8, 9]));
	}

	#[test]
	fn empty() {
		for variant in VARIANTS {
			for workers in [0, 1, 8] {
				let mut v = Array1::<i64>::from_vec(Vec::new());
				variant(v.view_mut(), i64::lt, workers);
				assert!(v.is_empty());
			}
		}
	}

	#[test]
	fn duplicates_two_pass() {
		let mut v = Array1::from_elem(200, 9i64);
		sort_partition(v.view_mut(), i64::lt, 4);
		assert_eq!(v, Array1::from_elem(200, 9i64));
	}

	#[test]
	fn dynamic_random() {
		let xs = random(10_000, 12);
		let mut expected = xs.clone();
		expected.sort_unstable();
		let mut v = Array1::from_vec(xs);
		sort_dynamic(v.view_mut(), i64::lt, 4);
		assert_eq!(v.to_vec(), expected);
	}

	#[test]
	fn descending_nth_element() {
		let mut v = Array1::from_iter((0..10_000i64).rev());
		sort_nth_element(v.view_mut(), |a, b| b < a, 8);
		assert_eq!(v, Array1::from_iter((0..10_000i64).rev()));

		let mut v = Array1::from_iter(0..10_000i64);
		sort_nth_element(v.view_mut(), |a, b| b < a, 8);
		assert_eq!(v, Array1::from_iter((0..10_000i64).rev()));
	}

	#[test]
	fn threshold_does_not_matter() {
		let xs = random(3_000, 13);
		let mut expected = xs.clone();
		expected.sort_unstable();
		for threshold in [0, 1, 2, 3, 30, 5_000] {
			for partition in [Partition::TwoPointer, Partition::TwoPass, Partition::NthElement] {
				let config = Config::new()
					.threshold(threshold)
					.workers(4)
					.partition(partition)
					.policy(Policy::Static(Halving::Inclusive));
				let mut v = Array1::from_vec(xs.clone());
				sort_with(v.view_mut(), i64::lt, &config);
				assert_eq!(v.to_vec(), expected);
			}
		}
	}

	#[test]
	fn adversarial_patterns() {
		let len = 10_000;
		let patterns: Vec<Vec<i64>> = vec![
			(0..len).collect(),
			(0..len).rev().collect(),
			(0..len).map(|i| i % 2).collect(),
			(0..len).map(|i| if i < len / 2 { i } else { len - i }).collect(),
			(0..len).map(|i| (i * 7919) % 101).collect(),
		];
		for xs in patterns {
			let mut expected = xs.clone();
			expected.sort_unstable();
			for variant in VARIANTS {
				let mut v = Array1::from_vec(xs.clone());
				variant(v.view_mut(), i64::lt, 8);
				assert_eq!(v.to_vec(), expected);
			}
		}
	}

	#[test]
	fn slices() {
		let mut v = random(1_000, 14);
		sort_dynamic(ArrayViewMut1::from(&mut v[..]), i64::lt, 4);
		assert!(v.windows(2).all(|w| w[0] <= w[1]));
	}

	#[test]
	fn extension_trait() {
		let mut v = arr2(&[[3, 9], [1, 8], [2, 7]]);
		v.column_mut(0).par_quick_sort();
		v.column_mut(1).par_quick_sort_by(|a, b| b.cmp(a));
		assert_eq!(v, arr2(&[[1, 9], [2, 8], [3, 7]]));

		let mut v = arr1(&["ccc", "a", "bb"]);
		v.par_quick_sort_by_key(|s| s.len());
		assert_eq!(v, arr1(&["a", "bb", "ccc"]));

		let mut v = Array1::from_vec(random(2_000, 15));
		let config = Config::new().workers(4).policy(Policy::Dynamic);
		v.par_quick_sort_with(|a: &i64, b: &i64| a < b, &config);
		assert!(v.windows(2).into_iter().all(|w| w[0] <= w[1]));
	}

	#[cfg(feature = "rayon")]
	#[test]
	fn rayon_executor() {
		let xs = random(10_000, 16);
		let mut expected = xs.clone();
		expected.sort_unstable();
		for policy in [Policy::Static(Halving::Exclusive), Policy::Dynamic] {
			let config = Config::new()
				.workers(8)
				.policy(policy)
				.executor(crate::Executor::Rayon);
			let mut v = Array1::from_vec(xs.clone());
			sort_with(v.view_mut(), i64::lt, &config);
			assert_eq!(v.to_vec(), expected);
		}
	}
}
