//! Mechanisms running an offloaded sub-range on another worker.

use std::{panic, thread};

/// How an offloaded sub-range reaches another worker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Executor {
	/// Spawns a scoped OS thread per offload.
	#[default]
	Threads,
	/// Offers the sub-range to the current Rayon thread pool for stealing.
	#[cfg(feature = "rayon")]
	Rayon,
}

impl Executor {
	/// Runs `offloaded` on another worker while running `inline` on the current one.
	///
	/// Returns once both completed. A panic of either closure is resumed after both completed,
	/// so no worker outlives the call.
	pub(crate) fn join<A, B, RA, RB>(self, offloaded: A, inline: B) -> (RA, RB)
	where
		A: FnOnce() -> RA + Send,
		B: FnOnce() -> RB + Send,
		RA: Send,
		RB: Send,
	{
		match self {
			Executor::Threads => thread::scope(|scope| {
				let handle = scope.spawn(offloaded);
				// Should `inline` unwind, the scope still joins `handle` before propagating.
				let inline = inline();
				match handle.join() {
					Ok(offloaded) => (offloaded, inline),
					Err(payload) => panic::resume_unwind(payload),
				}
			}),
			#[cfg(feature = "rayon")]
			Executor::Rayon => {
				let (inline, offloaded) = rayon::join(inline, offloaded);
				(offloaded, inline)
			}
		}
	}
}
