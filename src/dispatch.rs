//! Recursion into disjoint `split_at` views joined across workers is derived from
//! [`rayon::slice::quicksort`] licensed under `MIT OR Apache-2.0`.
//!
//! [`rayon::slice::quicksort`]: https://docs.rs/rayon/latest/src/rayon/slice/quicksort.rs.html

use crate::{
	Config, Executor, Partition, Policy,
	budget::{Budget, ReleaseOnDrop, Static, WorkerCounter},
	insertion_sort::insertion_sort,
};
use core::mem;
use ndarray::{ArrayViewMut1, Axis};

/// Parameters shared by every frame of one sort invocation.
pub(crate) struct Context<'a, F> {
	pub is_less: &'a F,
	pub threshold: usize,
	pub partition: Partition,
	pub executor: Executor,
}

/// Summary of the recursion below a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Stats {
	/// Deepest frame, the top-level frame has depth zero.
	pub depth: u32,
	/// Number of partition calls.
	pub partitions: usize,
	/// Number of sub-ranges offloaded to another worker.
	pub offloads: usize,
	/// Number of ranges sorted with insertion sort.
	pub leaves: usize,
}

impl Stats {
	fn merge(self, other: Self) -> Self {
		Self {
			depth: self.depth.max(other.depth),
			partitions: self.partitions + other.partitions,
			offloads: self.offloads + other.offloads,
			leaves: self.leaves + other.leaves,
		}
	}
}

/// Sorts `v` according to `config`, seeding the configured budget policy.
pub(crate) fn par_quick_sort<T, F>(v: ArrayViewMut1<'_, T>, is_less: F, config: &Config) -> Stats
where
	T: Send,
	F: Fn(&T, &T) -> bool + Sync,
{
	// Sorting has no meaningful behavior on zero-sized types.
	if mem::size_of::<T>() == 0 {
		return Stats::default();
	}

	let len = v.len();
	let ctx = Context {
		is_less: &is_less,
		threshold: config.threshold,
		partition: config.partition,
		executor: config.executor,
	};
	log::debug!(
		"sorting {len} elements with {} workers, {:?} partition, {:?} policy",
		config.workers,
		config.partition,
		config.policy,
	);
	let stats = match config.policy {
		Policy::Static(halving) => {
			let budget = Static {
				workers: config.workers,
				halving,
			};
			recurse(v, &ctx, budget, 0)
		}
		Policy::Dynamic => {
			let counter = WorkerCounter::new(config.workers);
			let stats = recurse(v, &ctx, counter.share(), 0);
			debug_assert_eq!(counter.available(), config.workers);
			stats
		}
	};
	log::debug!(
		"sorted {len} elements: depth {}, {} partitions, {} offloads, {} leaves",
		stats.depth,
		stats.partitions,
		stats.offloads,
		stats.leaves,
	);
	stats
}

/// Sorts `v` recursively.
///
/// The left sub-range is offloaded whenever `budget` grants a worker, the right sub-range is
/// always sorted on the current worker. Returns after every offloaded sub-range completed.
pub(crate) fn recurse<T, F, B>(
	mut v: ArrayViewMut1<'_, T>,
	ctx: &Context<'_, F>,
	budget: B,
	depth: u32,
) -> Stats
where
	T: Send,
	F: Fn(&T, &T) -> bool + Sync,
	B: Budget,
{
	let len = v.len();
	let here = Stats {
		depth,
		..Stats::default()
	};

	if len == 0 {
		return here;
	}

	// Short ranges get sorted using insertion sort.
	if len < ctx.threshold.max(2) {
		insertion_sort(v, ctx.is_less);
		return Stats { leaves: 1, ..here };
	}

	let (mid1, mid2) = ctx.partition.apply(v.view_mut(), ctx.is_less);
	let here = Stats {
		partitions: 1,
		..here
	};

	// Split the range into `left`, settled elements, and `right`.
	let (left, right) = v.split_at(Axis(0), mid1);
	let (_, right) = right.split_at(Axis(0), mid2 - mid1);

	match budget.split() {
		Some((offloaded, inline)) => {
			log::trace!(
				"depth {depth}: offloading {} elements, keeping {}",
				left.len(),
				right.len()
			);
			// The guard moves along with the offloaded work and releases its worker on completion
			// or unwinding, even if the work never starts.
			let release = ReleaseOnDrop(offloaded);
			// Released workers get claimed again further down, so the offloading frames on one
			// stack are not bounded by the budget.
			let (l, r) = ctx.executor.join(
				move || {
					let release = release;
					grow(|| recurse(left, ctx, release.0, depth + 1))
				},
				|| grow(|| recurse(right, ctx, inline, depth + 1)),
			);
			Stats {
				offloads: 1,
				..here
			}
			.merge(l)
			.merge(r)
		}
		None => {
			let l = grow(|| recurse(left, ctx, budget, depth + 1));
			let r = grow(|| recurse(right, ctx, budget, depth + 1));
			here.merge(l).merge(r)
		}
	}
}

/// Runs `f`, growing the stack beforehand if it is running low.
#[cfg(feature = "stacker")]
#[inline]
fn grow<R>(f: impl FnOnce() -> R) -> R {
	const RED_ZONE: usize = 64 * 1024;
	const STACK_SIZE: usize = 1024 * 1024;
	stacker::maybe_grow(RED_ZONE, STACK_SIZE, f)
}

/// Runs `f`.
#[cfg(not(feature = "stacker"))]
#[inline]
fn grow<R>(f: impl FnOnce() -> R) -> R {
	f()
}
