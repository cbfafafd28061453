//! Partition strategies reordering a range around a median-of-three pivot.
//!
//! Every strategy returns a pair `(mid1, mid2)` with `mid1 <= mid2` dividing `v` into elements not
//! after the pivot `v[..mid1]`, settled elements `v[mid1..mid2]` and elements not before the pivot
//! `v[mid2..]`. Only `v[..mid1]` and `v[mid2..]` need further sorting.

use crate::{pivot::choose_pivot, select::partition_at_index};
use ndarray::{ArrayViewMut1, Axis, IndexLonger};

/// Partitioning algorithm used by each recursion step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Partition {
	/// Classic Hoare-style partition with two cursors converging from both ends.
	///
	/// Settles the pivot slot only, elements equal to the pivot stay in both sub-ranges. Fewest
	/// passes but no special treatment of duplicate-heavy input.
	#[default]
	TwoPointer,
	/// Three-way partition in two passes: elements before the pivot, then elements equal to it,
	/// then elements after it.
	///
	/// The block of elements equal to the pivot is excluded from further recursion.
	TwoPass,
	/// Selects the element belonging at the midpoint, splitting into two halves of equal size.
	///
	/// Costs more per step but guarantees a recursion depth of at most ⌈log₂ *n*⌉.
	NthElement,
}

impl Partition {
	/// Partitions `v` with this strategy and returns the sub-range boundaries `(mid1, mid2)`.
	///
	/// `v` must hold at least two elements.
	pub(crate) fn apply<T, F>(self, v: ArrayViewMut1<'_, T>, is_less: &F) -> (usize, usize)
	where
		F: Fn(&T, &T) -> bool,
	{
		debug_assert!(v.len() >= 2);
		match self {
			Partition::TwoPointer => {
				let mid = partition_two_pointer(v, is_less);
				(mid, mid + 1)
			}
			Partition::TwoPass => partition_two_pass(v, is_less),
			Partition::NthElement => {
				let mid = v.len() / 2;
				partition_at_index(v, mid, is_less);
				(mid, mid)
			}
		}
	}
}

/// Partitions `v` into elements not after the median-of-three pivot, the pivot, and elements not
/// before it.
///
/// Returns the final index of the pivot. `v` must not be empty.
pub fn partition_two_pointer<T, F>(mut v: ArrayViewMut1<'_, T>, is_less: &F) -> usize
where
	F: Fn(&T, &T) -> bool,
{
	let pivot = choose_pivot(v.view(), is_less);

	let mid = {
		let mut v = v.view_mut();
		// Place the pivot at the beginning of slice and borrow it from a view of its own while the
		// remainder gets reordered.
		v.swap(0, pivot);
		let (pivot, mut v) = v.split_at(Axis(0), 1);
		let pivot: &T = pivot.index(0);

		let mut l = 0;
		let mut r = v.len();
		loop {
			// Find the first element not less than the pivot.
			while l < r && is_less(&v[l], pivot) {
				l += 1;
			}
			// Find the last element not greater than the pivot.
			while l < r && is_less(pivot, &v[r - 1]) {
				r -= 1;
			}

			// Are we done?
			if l >= r {
				break;
			}

			// Exchange the pair unless it is equal. Both cursors move either way so runs of
			// elements equal to the pivot get split evenly.
			if is_less(&v[r - 1], &v[l]) {
				v.swap(l, r - 1);
			}
			l += 1;
			r -= 1;
		}

		// `v[..l]` is not after the pivot and, since `l >= r`, `v[l..]` is not before it.
		l
	};

	// Place the pivot between the two partitions.
	v.swap(0, mid);
	mid
}

/// Partitions `v` into elements less than, equal to, and greater than the median-of-three pivot.
///
/// Returns the bounds `(mid1, mid2)` of the elements equal to the pivot. `v` must not be empty.
pub fn partition_two_pass<T, F>(mut v: ArrayViewMut1<'_, T>, is_less: &F) -> (usize, usize)
where
	F: Fn(&T, &T) -> bool,
{
	let pivot = choose_pivot(v.view(), is_less);

	let (less, equal) = {
		let mut v = v.view_mut();
		v.swap(0, pivot);
		let (pivot, mut v) = v.split_at(Axis(0), 1);
		let pivot: &T = pivot.index(0);

		let less = partition_in_place(v.view_mut(), |x| is_less(x, pivot));
		let (_, rest) = v.split_at(Axis(0), less);
		let equal = partition_in_place(rest, |x| !is_less(pivot, x));
		(less, equal)
	};

	// The pivot heads the block of elements equal to it.
	v.swap(0, less);
	(less, less + 1 + equal)
}

/// Reorders `v` so that all elements satisfying `pred` precede all elements that don't.
///
/// Returns the number of elements satisfying `pred`. The relative order is not preserved.
pub fn partition_in_place<T, P>(mut v: ArrayViewMut1<'_, T>, mut pred: P) -> usize
where
	P: FnMut(&T) -> bool,
{
	let mut l = 0;
	let mut r = v.len();
	loop {
		while l < r && pred(&v[l]) {
			l += 1;
		}
		while l < r && !pred(&v[r - 1]) {
			r -= 1;
		}
		if l >= r {
			return l;
		}
		v.swap(l, r - 1);
		l += 1;
		r -= 1;
	}
}
