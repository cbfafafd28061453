//! Median-of-three pivot selection.

use ndarray::ArrayView1;

/// Chooses a pivot among the first, the middle and the last element of `v`.
///
/// Returns the index of the sampled element that is neither the minimum nor the maximum of the
/// three. `v` must not be empty.
pub fn choose_pivot<T, F>(v: ArrayView1<'_, T>, is_less: &F) -> usize
where
	F: Fn(&T, &T) -> bool,
{
	let len = v.len();
	median_idx(v, is_less, 0, len / 2, len - 1)
}

/// returns the index pointing to the median of the 3
/// elements `v[a]`, `v[b]` and `v[c]`
///
/// Equal elements are resolved by position, so the same arrangement of values always yields the
/// same index.
pub fn median_idx<T, F: Fn(&T, &T) -> bool>(
	v: ArrayView1<'_, T>,
	is_less: &F,
	mut a: usize,
	b: usize,
	mut c: usize,
) -> usize {
	if is_less(&v[c], &v[a]) {
		core::mem::swap(&mut a, &mut c);
	}
	if is_less(&v[c], &v[b]) {
		return c;
	}
	if is_less(&v[b], &v[a]) {
		return a;
	}
	b
}
