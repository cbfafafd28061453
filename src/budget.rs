//! Worker budget policies deciding whether a sub-range gets offloaded to another worker.

use core::sync::atomic::{
	AtomicUsize,
	Ordering::{AcqRel, Acquire},
};

/// Rounding of the static budget granted to an offloaded sub-range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Halving {
	/// Grants ⌈(*n* - 1) / 2⌉ of the *n* remaining workers to the offloaded sub-range.
	#[default]
	Exclusive,
	/// Grants ⌈*n* / 2⌉ of the *n* remaining workers to the offloaded sub-range.
	Inclusive,
}

impl Halving {
	fn granted(self, workers: usize) -> usize {
		match self {
			Halving::Exclusive => (workers - 1).div_ceil(2),
			Halving::Inclusive => workers.div_ceil(2),
		}
	}
}

/// How the worker budget is tracked across the recursion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Policy {
	/// A plain count handed down by value and halved whenever a sub-range gets offloaded.
	///
	/// Needs no synchronization, but workers granted to a small sub-range are not reused elsewhere.
	Static(Halving),
	/// A counter shared by every frame of one sort invocation, claimed before and released after
	/// each offload.
	///
	/// Adapts to unbalanced recursion at the cost of atomic operations on each decision.
	Dynamic,
}

impl Default for Policy {
	fn default() -> Self {
		Policy::Static(Halving::default())
	}
}

/// Budget carried by each recursive frame.
pub(crate) trait Budget: Copy + Send + Sync {
	/// Tries to claim a worker for offloading.
	///
	/// Returns the budgets of the offloaded and of the inline sub-range or `None` if both have to
	/// be processed on the current worker.
	fn split(self) -> Option<(Self, Self)>;
	/// Returns the worker claimed by [`split`](Budget::split) once the offloaded work completed.
	fn release(self);
}

/// Statically divided budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Static {
	pub workers: usize,
	pub halving: Halving,
}

impl Budget for Static {
	fn split(self) -> Option<(Self, Self)> {
		if self.workers <= 1 {
			return None;
		}
		let granted = self.halving.granted(self.workers);
		Some((
			Static {
				workers: granted,
				..self
			},
			Static {
				workers: self.workers - granted,
				..self
			},
		))
	}
	fn release(self) {}
}

/// Counter of available workers shared by one sort invocation.
#[derive(Debug)]
pub(crate) struct WorkerCounter {
	available: AtomicUsize,
	workers: usize,
}

impl WorkerCounter {
	pub fn new(workers: usize) -> Self {
		Self {
			available: AtomicUsize::new(workers),
			workers,
		}
	}
	/// Currently available workers.
	pub fn available(&self) -> usize {
		self.available.load(Acquire)
	}
	/// Budget handle referring to this counter.
	pub fn share(&self) -> Shared<'_> {
		Shared { counter: self }
	}
	/// Decrements the counter if the decremented value is still greater than one.
	///
	/// Decrementing and checking is a single atomic operation, so concurrent claims can never push
	/// the counter below that floor.
	fn try_claim(&self) -> bool {
		self.available
			.fetch_update(AcqRel, Acquire, |available| {
				(available > 2).then(|| available - 1)
			})
			.is_ok()
	}
	fn release(&self) {
		let previous = self.available.fetch_add(1, AcqRel);
		debug_assert!(previous < self.workers, "worker released twice");
	}
}

/// Budget backed by a [`WorkerCounter`].
#[derive(Clone, Copy, Debug)]
pub(crate) struct Shared<'a> {
	counter: &'a WorkerCounter,
}

impl Budget for Shared<'_> {
	fn split(self) -> Option<(Self, Self)> {
		self.counter.try_claim().then_some((self, self))
	}
	fn release(self) {
		self.counter.release();
	}
}

/// Releases the budget of an offloaded sub-range when dropped.
///
/// Owned by the offloaded work so the worker is returned exactly once, whether the work completes
/// or unwinds.
pub(crate) struct ReleaseOnDrop<B: Budget>(pub B);

impl<B: Budget> Drop for ReleaseOnDrop<B> {
	fn drop(&mut self) {
		self.0.release();
	}
}
