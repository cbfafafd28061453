//! Derivative work of [`core::slice::sort`] licensed under `MIT OR Apache-2.0`.
//!
//! [`core::slice::sort`]: https://doc.rust-lang.org/src/core/slice/sort.rs.html

use core::cmp;
use ndarray::ArrayViewMut1;

/// Sorts `v` using insertion sort, which is *O*(*n*^2) worst-case.
///
/// The minimum is moved to the front first so it acts as a sentinel for the backward shifts.
pub fn insertion_sort<T, F>(mut v: ArrayViewMut1<'_, T>, is_less: &F)
where
	F: Fn(&T, &T) -> bool,
{
	let len = v.len();
	if len < 2 {
		return;
	}

	let min = v.iter().enumerate().min_by(from_is_less(is_less)).map(|(i, _)| i);
	if let Some(min) = min {
		v.swap(0, min);
	}

	for i in 2..len {
		// Shift `v[i]` to the left until it meets an element it is not less than. The sentinel at
		// `v[0]` stops the loop for valid orderings, `j > 1` stops it for invalid ones.
		let mut j = i;
		while j > 1 && is_less(&v[j], &v[j - 1]) {
			v.swap(j - 1, j);
			j -= 1;
		}
	}
}

/// helper function used to find the index of the min/max element
/// using e.g. `v.iter().enumerate().min_by(from_is_less(&is_less))`
pub fn from_is_less<T>(
	is_less: &impl Fn(&T, &T) -> bool,
) -> impl Fn(&(usize, &T), &(usize, &T)) -> cmp::Ordering + '_ {
	|&(_, x), &(_, y)| {
		if is_less(x, y) {
			cmp::Ordering::Less
		} else {
			cmp::Ordering::Greater
		}
	}
}
