//! Derivative work of [`core::slice::select`] licensed under `MIT OR Apache-2.0`.
//!
//! [`core::slice::select`]: https://doc.rust-lang.org/src/core/slice/select.rs.html

use crate::{insertion_sort::insertion_sort, partition::partition_two_pointer};
use core::cmp::{
	self,
	Ordering::{Equal, Greater, Less},
};
use ndarray::{ArrayViewMut1, Axis, s};

// For slices of up to this length it's probably faster to simply sort them.
const MAX_INSERTION: usize = 10;

/// Reorders `v` such that the element at `index` is at its final sorted position.
///
/// Every element before `index` is not after it and every element behind `index` is not before
/// it.
///
/// # Panics
///
/// Panics when `index >= v.len()`.
pub fn partition_at_index<T, F>(mut v: ArrayViewMut1<'_, T>, mut index: usize, is_less: &F)
where
	F: Fn(&T, &T) -> bool,
{
	if index >= v.len() {
		panic!(
			"partition_at_index index {} greater than length of slice {}",
			index,
			v.len()
		);
	}

	// Limit the amount of imbalanced partitions and fall back to heap selection afterwards. The
	// limit is constant since `ilog2(len)` would result in O(n log n) time complexity.
	let mut limit = 16;

	loop {
		let len = v.len();

		if len <= MAX_INSERTION {
			insertion_sort(v, is_less);
			return;
		}

		if limit == 0 {
			heap_select(v, index, is_less);
			return;
		}

		let mid = partition_two_pointer(v.view_mut(), is_less);
		if cmp::min(mid, len - mid) < len / 8 {
			limit -= 1;
		}

		// Split the slice into `left`, `pivot`, and `right`.
		let (left, right) = v.split_at(Axis(0), mid);
		let (_, right) = right.split_at(Axis(0), 1);

		match mid.cmp(&index) {
			Less => {
				v = right;
				index = index - mid - 1;
			}
			Greater => v = left,
			// The pivot landed on `index`, everything before is not after it and everything behind
			// is not before it.
			Equal => return,
		}
	}
}

/// Selects the element at `index` by popping the greatest elements off a binary heap until
/// `index` is reached, which is *O*(*n* \* log(*n*)) worst-case.
#[cold]
fn heap_select<T, F>(mut v: ArrayViewMut1<'_, T>, index: usize, is_less: &F)
where
	F: Fn(&T, &T) -> bool,
{
	// This binary heap respects the invariant `parent >= child`.
	let sift_down = |mut v: ArrayViewMut1<'_, T>, mut node| {
		loop {
			let mut child = 2 * node + 1;
			if child >= v.len() {
				break;
			}

			// Choose the greater child.
			if child + 1 < v.len() && is_less(&v[child], &v[child + 1]) {
				child += 1;
			}

			// Stop if the invariant holds at `node`.
			if !is_less(&v[node], &v[child]) {
				break;
			}

			v.swap(node, child);
			node = child;
		}
	};

	for i in (0..v.len() / 2).rev() {
		sift_down(v.view_mut(), i);
	}

	// Pop maximal elements until the last pop puts the greatest of the `index + 1` smallest
	// elements into place.
	for end in (index..v.len()).rev() {
		v.swap(0, end);
		sift_down(v.slice_mut(s![..end]), 0);
	}
}

#[cfg(test)]
mod test {
	use super::{heap_select, partition_at_index};
	use ndarray::{Array1, arr1};
	use quickcheck::TestResult;
	use quickcheck_macros::quickcheck;

	#[quickcheck]
	fn at_index(xs: Vec<u32>, index: usize) -> TestResult {
		if xs.is_empty() {
			return TestResult::discard();
		}
		let index = index % xs.len();
		let mut sorted = xs.clone();
		sorted.sort_unstable();
		let mut array = arr1(&xs);
		partition_at_index(array.view_mut(), index, &u32::lt);
		let value = array[index];
		assert_eq!(value, sorted[index]);
		for left in array.slice(ndarray::s![..index]) {
			assert!(*left <= value);
		}
		for right in array.slice(ndarray::s![index..]) {
			assert!(value <= *right);
		}
		TestResult::passed()
	}

	#[quickcheck]
	fn heap(xs: Vec<i64>, index: usize) -> TestResult {
		if xs.is_empty() {
			return TestResult::discard();
		}
		let index = index % xs.len();
		let mut sorted = xs.clone();
		sorted.sort_unstable();
		let mut array = Array1::from_vec(xs);
		heap_select(array.view_mut(), index, &i64::lt);
		let value = array[index];
		assert_eq!(value, sorted[index]);
		assert!(array.iter().take(index).all(|x| *x <= value));
		assert!(array.iter().skip(index).all(|x| value <= *x));
		TestResult::passed()
	}

	#[test]
	fn midpoint_of_descending() {
		let mut array = Array1::from_iter((0..1000).rev());
		partition_at_index(array.view_mut(), 500, &i32::lt);
		assert_eq!(array[500], 500);
	}

	#[test]
	#[should_panic(expected = "greater than length")]
	fn out_of_bounds() {
		let mut array = arr1(&[1, 2, 3]);
		partition_at_index(array.view_mut(), 3, &i32::lt);
	}
}
